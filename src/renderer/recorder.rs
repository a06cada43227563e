//! Draw surface that records commands instead of rasterizing
//!
//! Used by the headless preview binary and by tests to inspect what a frame
//! would have drawn.

use glam::Vec2;

use super::surface::DrawSurface;
use crate::color::Color;
use crate::sim::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(Viewport),
    FillRect { origin: Vec2, size: Vec2, color: Color },
    ClearRect { origin: Vec2, size: Vec2 },
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadraticCurveTo { control: Vec2, end: Vec2 },
    Arc { center: Vec2, radius: f32, start: f32, end: f32 },
    ClosePath,
    Fill(Color),
    Stroke { color: Color, width: f32 },
    FillText { text: String, at: Vec2, font_px: f32, color: Color },
    SetShadow { color: Color, blur: f32 },
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
}

#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    /// Drain everything recorded so far
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// Number of `fill` calls (shapes), not counting rect fills
    pub fn fills(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Fill(_)))
    }

    /// Number of `stroke` calls (lines)
    pub fn strokes(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    pub fn texts(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::FillText { .. }))
    }
}

impl DrawSurface for CommandRecorder {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.commands.push(DrawCommand::Resize(viewport));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::ClearRect { origin, size });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Vec2) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Vec2) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn quadratic_curve_to(&mut self, control: Vec2, end: Vec2) {
        self.commands.push(DrawCommand::QuadraticCurveTo { control, end });
    }

    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start,
            end,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn stroke(&mut self, color: Color, width: f32) {
        self.commands.push(DrawCommand::Stroke { color, width });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f32, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            font_px,
            color,
        });
    }

    fn set_shadow(&mut self, color: Color, blur: f32) {
        self.commands.push(DrawCommand::SetShadow { color, blur });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }
}
