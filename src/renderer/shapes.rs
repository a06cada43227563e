//! Path builders for 2D primitives

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::surface::DrawSurface;
use crate::color::Color;
use crate::consts::HEXAGON_SIDES;
use crate::polar_to_cartesian;

/// Filled circle
pub fn circle<S: DrawSurface + ?Sized>(surface: &mut S, center: Vec2, radius: f32, color: Color) {
    surface.begin_path();
    surface.arc(center, radius, 0.0, TAU);
    surface.fill(color);
}

/// Stroked straight line
pub fn line<S: DrawSurface + ?Sized>(surface: &mut S, from: Vec2, to: Vec2, color: Color, width: f32) {
    surface.begin_path();
    surface.move_to(from);
    surface.line_to(to);
    surface.stroke(color, width);
}

/// Vertices of a flat-sided hexagon, starting at angle 0 and stepping 60°
pub fn hexagon_vertices(center: Vec2, size: f32) -> [Vec2; HEXAGON_SIDES] {
    let step = PI / 3.0;
    std::array::from_fn(|i| center + polar_to_cartesian(size, step * i as f32))
}

/// Filled hexagon with circumradius `size`
pub fn hexagon<S: DrawSurface + ?Sized>(surface: &mut S, center: Vec2, size: f32, color: Color) {
    let vertices = hexagon_vertices(center, size);
    surface.begin_path();
    surface.move_to(vertices[0]);
    for &v in &vertices[1..] {
        surface.line_to(v);
    }
    surface.close_path();
    surface.fill(color);
}

/// Filled region under a ridge line, smoothed with quadratic curves.
///
/// Each segment uses the previous sample as its control point and ends at the
/// midpoint between samples, so the curve passes near every sample without
/// overshooting.
pub fn terrain<S: DrawSurface + ?Sized>(surface: &mut S, ridge: &[Vec2], size: Vec2, color: Color) {
    let Some(&first) = ridge.first() else {
        return;
    };

    surface.begin_path();
    surface.move_to(Vec2::new(0.0, size.y));
    surface.line_to(first);
    for pair in ridge.windows(2) {
        let (prev, current) = (pair[0], pair[1]);
        surface.quadratic_curve_to(prev, (prev + current) / 2.0);
    }
    surface.line_to(Vec2::new(size.x, size.y));
    surface.close_path();
    surface.fill(color);
}

/// Glyph drawn at `pos`, rotated by `rotation_deg`, with a colored glow
pub fn glyph<S: DrawSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    pos: Vec2,
    rotation_deg: f32,
    font_px: f32,
    color: Color,
    glow: f32,
) {
    surface.save();
    surface.translate(pos);
    surface.rotate(rotation_deg * PI / 180.0);
    surface.set_shadow(color, glow);
    surface.fill_text(text, Vec2::ZERO, font_px, color);
    surface.restore();
}
