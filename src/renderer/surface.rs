//! Immediate-mode 2D drawing surface
//!
//! Mirrors the subset of the HTML canvas 2D context the backdrops need, so the
//! browser context maps onto it one call per method.

use glam::Vec2;

use crate::color::Color;
use crate::sim::Viewport;

/// A drawing target the render step paints into
pub trait DrawSurface {
    /// Match the backing pixel size to the viewport
    fn resize(&mut self, viewport: Viewport);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    fn clear_rect(&mut self, origin: Vec2, size: Vec2);

    fn begin_path(&mut self);
    fn move_to(&mut self, point: Vec2);
    fn line_to(&mut self, point: Vec2);
    fn quadratic_curve_to(&mut self, control: Vec2, end: Vec2);
    /// Circular arc, angles in radians
    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);
    fn fill(&mut self, color: Color);
    fn stroke(&mut self, color: Color, width: f32);

    /// Draw text at `at`, with a `font_px` serif font
    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f32, color: Color);
    fn set_shadow(&mut self, color: Color, blur: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
}
