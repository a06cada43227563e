//! Greeting Backdrop entry point
//!
//! On the web, mounts the backdrop named by `?bg=` on the page's `#canvas`.
//! Natively, runs a headless preview against the command recorder.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;

    use greeting_backdrop::platform::{self, web};
    use web_sys::UrlSearchParams;

    thread_local! {
        static HANDLE: RefCell<Option<web::BackdropHandle>> = const { RefCell::new(None) };
    }

    fn requested_background() -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("bg"))
            .unwrap_or_else(|| "particles".to_string())
    }

    pub fn run() {
        platform::init_logging();

        let background = requested_background();
        log::info!("Greeting backdrop starting with '{background}'");

        match web::mount_backdrop("canvas", &background) {
            Ok(handle) => HANDLE.with(|slot| {
                // Replacing an earlier handle unmounts it
                slot.borrow_mut().replace(handle);
            }),
            Err(err) => log::error!("failed to mount backdrop: {err:?}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    greeting_backdrop::platform::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = preview::run(&args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod preview {
    use greeting_backdrop::driver::ManualScheduler;
    use greeting_backdrop::renderer::CommandRecorder;
    use greeting_backdrop::sim::Viewport;
    use greeting_backdrop::{Backdrop, BackdropResult, SurfaceConfig};

    const DEFAULT_FRAMES: u64 = 120;
    const DEFAULT_WIDTH: u32 = 800;
    const DEFAULT_HEIGHT: u32 = 600;
    const SUMMARY_EVERY: u64 = 30;

    fn arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
        match args.get(index) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("ignoring unparsable argument '{raw}'");
                default
            }),
            None => default,
        }
    }

    /// `[preset-or-json] [frames] [width] [height]`
    pub fn run(args: &[String]) -> BackdropResult<()> {
        let config = SurfaceConfig::resolve(args.first().map_or("particles", String::as_str))?;
        let frames = arg(args, 1, DEFAULT_FRAMES);
        let viewport = Viewport::new(arg(args, 2, DEFAULT_WIDTH), arg(args, 3, DEFAULT_HEIGHT));

        let mut scheduler = ManualScheduler::new();
        let mut backdrop = Backdrop::mount(&config, CommandRecorder::default(), viewport, &mut scheduler);

        let mut rendered = 0u64;
        while rendered < frames && scheduler.advance() {
            if rendered == frames / 2 {
                // Exercise the reseed path halfway through
                let resized = Viewport::new(viewport.height, viewport.width);
                log::info!("resizing to {}x{}", resized.width, resized.height);
                backdrop.on_resize(resized);
            }

            let stats = backdrop.on_tick(&mut scheduler);
            let commands = backdrop.surface_mut().map_or(0, |s| s.take().len());
            rendered += 1;

            if let Some(stats) = stats
                && (rendered % SUMMARY_EVERY == 0 || rendered == frames)
            {
                log::info!(
                    "frame {rendered}: {} shapes, {} lines, {commands} draw calls",
                    stats.shapes,
                    stats.lines
                );
            }
        }

        backdrop.unmount(&mut scheduler);
        log::info!("{} preview finished after {rendered} frames", config.variant().display_name());
        Ok(())
    }
}
