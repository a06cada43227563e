//! Greeting Backdrop - animated canvas backgrounds
//!
//! Core modules:
//! - `sim`: Entity pools, seeding and the per-frame update step
//! - `renderer`: Draw-surface abstraction and the per-frame render step
//! - `driver`: Redraw loop with explicit cancellation
//! - `backdrop`: Surface controller tying one mount together
//! - `config`: Variant options, presets and JSON parsing
//! - `platform`: Browser/native platform abstraction

pub mod backdrop;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use backdrop::Backdrop;
pub use color::Color;
pub use config::{PRESETS, SurfaceConfig, Variant};
pub use error::{BackdropError, BackdropResult};

use glam::Vec2;

/// Engine constants
pub mod consts {
    /// Smallest extent used for seeding, so a 0x0 viewport still yields finite positions
    pub const MIN_SEED_EXTENT: f32 = 1.0;
    /// Hexagon cell size floor (lattice step must stay positive)
    pub const MIN_CELL_SIZE: f32 = 1.0;
    /// Terrain sample spacing floor
    pub const MIN_TERRAIN_RESOLUTION: f32 = 1.0;

    pub const HEXAGON_SIDES: usize = 6;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
