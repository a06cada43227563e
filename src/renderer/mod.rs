//! Canvas rendering module
//!
//! The render step paints through the [`DrawSurface`] trait; the browser canvas
//! implements it in `platform::web`, the [`CommandRecorder`] everywhere else.

pub mod recorder;
pub mod render;
pub mod shapes;
pub mod surface;

pub use recorder::{CommandRecorder, DrawCommand};
pub use render::{FrameStats, render_frame};
pub use surface::DrawSurface;
