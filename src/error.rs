//! Error types for backdrop configuration
//!
//! Only configuration parsing can fail. The per-frame path (update, render,
//! scheduling) is infallible and degrades to no-op frames instead.

/// Convenience result type used by configuration APIs.
pub type BackdropResult<T> = Result<T, BackdropError>;

/// Everything that can go wrong while building a [`crate::SurfaceConfig`].
#[derive(thiserror::Error, Debug)]
pub enum BackdropError {
    /// A color string that is not `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()` or `rgba()`.
    #[error("invalid color `{0}`")]
    InvalidColor(String),

    /// A preset name that is not one of [`crate::config::PRESETS`].
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    /// Malformed JSON configuration.
    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BackdropError {
    /// Build a [`BackdropError::InvalidColor`] value.
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Self::InvalidColor(input.into())
    }
}
