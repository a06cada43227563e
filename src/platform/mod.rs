//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging backend and panic reporting
//! - Canvas surface, animation-frame scheduling and resize events (web only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Install the logger for the current target. Calling it twice is harmless.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::debug!("logger already installed");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if env_logger::try_init().is_err() {
            log::debug!("logger already installed");
        }
    }
}
