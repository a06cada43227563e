//! Render step: paint one frame of a scene
//!
//! Erase-and-redraw: every frame starts with a full-surface background fill.
//! Relation matching happens here because it consumes the per-frame connection
//! counters that the update step reset.

use glam::Vec2;

use super::shapes;
use super::surface::DrawSurface;
use crate::color::Color;
use crate::sim::{
    CircuitBoard, HexGrid, ParticleField, PetalShower, Scene, TerrainLayers, Viewport,
    connect_particles,
};

/// What a frame drew
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Entity shapes drawn (circles, hexagons, glyphs, terrain layers, pulses)
    pub shapes: usize,
    /// Relation lines and circuit edges drawn
    pub lines: usize,
}

/// Paint `scene` onto `surface`
pub fn render_frame<S: DrawSurface + ?Sized>(
    scene: &mut Scene,
    viewport: Viewport,
    surface: &mut S,
) -> FrameStats {
    let size = viewport.size();
    fill_background(surface, scene.background(), size);

    match scene {
        Scene::Particles(field) => draw_particles(surface, field),
        Scene::Hexagons(grid) => draw_hexagons(surface, grid),
        Scene::Circuit(board) => draw_circuit(surface, board),
        Scene::Terrain(terrain) => draw_terrain(surface, terrain, size),
        Scene::Petals(shower) => draw_petals(surface, shower),
    }
}

/// Fill (or clear, for a transparent background) the whole surface
pub fn fill_background<S: DrawSurface + ?Sized>(surface: &mut S, background: Color, size: Vec2) {
    if background.is_transparent() {
        surface.clear_rect(Vec2::ZERO, size);
    } else {
        surface.fill_rect(Vec2::ZERO, size, background);
    }
}

fn draw_particles<S: DrawSurface + ?Sized>(surface: &mut S, field: &mut ParticleField) -> FrameStats {
    let cfg = &field.config;
    let mut stats = FrameStats::default();

    if cfg.connect {
        let relations = connect_particles(&mut field.particles, cfg.connect_distance, cfg.max_connections);
        for relation in &relations {
            let alpha = cfg.line_color.a * relation.strength * cfg.line_opacity;
            shapes::line(
                surface,
                relation.from,
                relation.to,
                cfg.line_color.with_alpha(alpha),
                cfg.line_width,
            );
        }
        stats.lines = relations.len();
    }

    for p in &field.particles {
        shapes::circle(surface, p.pos, p.radius, cfg.color);
    }
    stats.shapes = field.particles.len();
    stats
}

fn draw_hexagons<S: DrawSurface + ?Sized>(surface: &mut S, grid: &HexGrid) -> FrameStats {
    let cfg = &grid.config;
    for cell in &grid.cells {
        let size = cfg.cell_size * (0.6 + 0.3 * cell.intensity);
        let color = cfg.primary.lerp(cfg.secondary, cell.intensity);
        shapes::hexagon(surface, cell.center, size, color);
    }
    FrameStats {
        shapes: grid.cells.len(),
        lines: 0,
    }
}

fn draw_circuit<S: DrawSurface + ?Sized>(surface: &mut S, board: &CircuitBoard) -> FrameStats {
    let cfg = &board.config;
    let mut stats = FrameStats::default();

    for edge in &board.edges {
        let (Some(source), Some(target)) = (board.nodes.get(edge.source), board.nodes.get(edge.target))
        else {
            continue;
        };
        shapes::line(surface, source.pos, target.pos, cfg.line_color, cfg.line_width);
        let pulse = source.pos.lerp(target.pos, edge.progress);
        shapes::circle(surface, pulse, cfg.node_size / 2.0, cfg.node_color);
        stats.lines += 1;
        stats.shapes += 1;
    }

    for node in &board.nodes {
        shapes::circle(surface, node.pos, cfg.node_size, cfg.node_color);
    }
    stats.shapes += board.nodes.len();
    stats
}

fn draw_terrain<S: DrawSurface + ?Sized>(
    surface: &mut S,
    terrain: &TerrainLayers,
    size: Vec2,
) -> FrameStats {
    let mut stats = FrameStats::default();
    for layer in terrain.layers.iter().filter(|l| !l.ridge.is_empty()) {
        shapes::terrain(surface, &layer.ridge, size, layer.color);
        stats.shapes += 1;
    }
    stats
}

fn draw_petals<S: DrawSurface + ?Sized>(surface: &mut S, shower: &PetalShower) -> FrameStats {
    let cfg = &shower.config;
    for petal in &shower.petals {
        shapes::glyph(
            surface,
            &cfg.glyph,
            petal.pos,
            petal.rotation,
            petal.size,
            petal.color,
            cfg.shadow_blur,
        );
    }
    FrameStats {
        shapes: shower.petals.len(),
        lines: 0,
    }
}
