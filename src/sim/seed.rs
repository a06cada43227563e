//! Entity pool seeding
//!
//! Each variant has its own seed rule. Positions are uniform over the seeding
//! bounds except for the hexagon lattice, which is laid out deterministically
//! with a one-cell margin and only randomizes each cell's phase.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{CircuitEdge, CircuitNode, EntityIds, HexCell, Particle, Petal, TerrainLayer};
use crate::color::Color;
use crate::config::{CircuitConfig, HexagonConfig, ParticlesConfig, PetalConfig, TerrainConfig};
use crate::consts::MIN_CELL_SIZE;

/// Uniform sample in `[lo, hi)`; tolerates `lo >= hi` (returns values between them)
#[inline]
fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Uniform point in `[0, bounds.x) x [0, bounds.y)`
#[inline]
fn point_in(rng: &mut impl Rng, bounds: Vec2) -> Vec2 {
    Vec2::new(rng.random::<f32>() * bounds.x, rng.random::<f32>() * bounds.y)
}

pub fn seed_particles(
    cfg: &ParticlesConfig,
    bounds: Vec2,
    rng: &mut impl Rng,
    ids: &mut EntityIds,
) -> Vec<Particle> {
    (0..cfg.count)
        .map(|_| Particle {
            id: ids.allocate(),
            pos: point_in(rng, bounds),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * cfg.speed,
                (rng.random::<f32>() - 0.5) * cfg.speed,
            ),
            radius: uniform(rng, cfg.radius_min, cfg.radius_max),
            connections: 0,
        })
        .collect()
}

/// Lattice geometry for a given cell size: `(row_step, col_step)`
pub fn hex_steps(cell_size: f32) -> (f32, f32) {
    let size = cell_size.max(MIN_CELL_SIZE);
    (size * 3f32.sqrt(), size * 1.5)
}

/// Exclusive upper row/column index of the lattice covering `bounds`.
///
/// Rows and columns both start at -1, so the lattice has `(rows + 1) * (cols + 1)` cells.
pub fn hex_lattice_extent(cell_size: f32, bounds: Vec2) -> (i32, i32) {
    let (row_step, col_step) = hex_steps(cell_size);
    let rows = (bounds.y / row_step + 2.0).ceil() as i32;
    let cols = (bounds.x / col_step + 2.0).ceil() as i32;
    (rows, cols)
}

/// Number of cells [`seed_hex_lattice`] produces for `bounds`
pub fn hex_lattice_len(cell_size: f32, bounds: Vec2) -> usize {
    let (rows, cols) = hex_lattice_extent(cell_size, bounds);
    ((rows + 1) * (cols + 1)) as usize
}

pub fn seed_hex_lattice(
    cfg: &HexagonConfig,
    bounds: Vec2,
    rng: &mut impl Rng,
    ids: &mut EntityIds,
) -> Vec<HexCell> {
    let (row_step, col_step) = hex_steps(cfg.cell_size);
    let (rows, cols) = hex_lattice_extent(cfg.cell_size, bounds);
    let mut cells = Vec::with_capacity(hex_lattice_len(cfg.cell_size, bounds));

    for row in -1..rows {
        for col in -1..cols {
            // Odd columns sit half a row lower
            let stagger = if col.rem_euclid(2) == 0 { 0.0 } else { row_step / 2.0 };
            cells.push(HexCell {
                id: ids.allocate(),
                center: Vec2::new(col as f32 * col_step, row as f32 * row_step + stagger),
                phase_offset: rng.random::<f32>() * TAU,
                intensity: 0.0,
            });
        }
    }

    cells
}

pub fn seed_petals(
    cfg: &PetalConfig,
    bounds: Vec2,
    rng: &mut impl Rng,
    ids: &mut EntityIds,
) -> Vec<Petal> {
    (0..cfg.count)
        .map(|_| {
            let pos = point_in(rng, bounds);
            let size = uniform(rng, cfg.size_min, cfg.size_max);
            let fall_speed = uniform(rng, cfg.fall_min, cfg.fall_max);
            let drift = uniform(rng, -cfg.drift_max, cfg.drift_max);
            let rotation = uniform(rng, 0.0, 360.0);
            let color = if cfg.palette.is_empty() {
                Color::WHITE
            } else {
                cfg.palette[rng.random_range(0..cfg.palette.len())]
            };
            Petal {
                id: ids.allocate(),
                pos,
                fall_speed,
                drift,
                rotation,
                size,
                color,
            }
        })
        .collect()
}

/// Nodes plus, for every node, `min_edges..=max_edges` edges to distinct other nodes
pub fn seed_circuit(
    cfg: &CircuitConfig,
    bounds: Vec2,
    rng: &mut impl Rng,
    ids: &mut EntityIds,
) -> (Vec<CircuitNode>, Vec<CircuitEdge>) {
    let nodes: Vec<CircuitNode> = (0..cfg.node_count)
        .map(|_| CircuitNode {
            id: ids.allocate(),
            pos: point_in(rng, bounds),
        })
        .collect();

    let max_edges = cfg.max_edges.max(cfg.min_edges);
    let mut edges = Vec::new();
    for source in 0..nodes.len() {
        let wanted = rng.random_range(cfg.min_edges..=max_edges);
        let mut targets: Vec<usize> = (0..nodes.len()).filter(|&j| j != source).collect();

        for _ in 0..wanted {
            if targets.is_empty() {
                break;
            }
            let target = targets.swap_remove(rng.random_range(0..targets.len()));
            edges.push(CircuitEdge {
                source,
                target,
                speed: uniform(rng, cfg.edge_speed_min, cfg.edge_speed_max),
                progress: 0.0,
            });
        }
    }

    (nodes, edges)
}

/// One layer per configured color; ridges are sampled by the update step
pub fn seed_terrain(cfg: &TerrainConfig, ids: &mut EntityIds) -> Vec<TerrainLayer> {
    cfg.layers
        .iter()
        .enumerate()
        .map(|(index, &color)| TerrainLayer {
            id: ids.allocate(),
            index,
            color,
            ridge: Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_particles_within_bounds_and_ranges() {
        let cfg = ParticlesConfig::default();
        let bounds = Vec2::new(800.0, 600.0);
        let particles = seed_particles(&cfg, bounds, &mut rng(), &mut EntityIds::default());

        assert_eq!(particles.len(), cfg.count);
        for p in &particles {
            assert!(p.pos.x >= 0.0 && p.pos.x < bounds.x);
            assert!(p.pos.y >= 0.0 && p.pos.y < bounds.y);
            assert!(p.vel.x.abs() <= cfg.speed / 2.0);
            assert!(p.vel.y.abs() <= cfg.speed / 2.0);
            assert!(p.radius >= cfg.radius_min && p.radius < cfg.radius_max);
            assert_eq!(p.connections, 0);
        }
    }

    #[test]
    fn test_zero_count_seeds_nothing() {
        let cfg = ParticlesConfig {
            count: 0,
            ..Default::default()
        };
        let particles = seed_particles(&cfg, Vec2::ONE, &mut rng(), &mut EntityIds::default());
        assert!(particles.is_empty());
    }

    #[test]
    fn test_hex_lattice_has_margin() {
        let cfg = HexagonConfig::default();
        let bounds = Vec2::new(800.0, 600.0);
        let cells = seed_hex_lattice(&cfg, bounds, &mut rng(), &mut EntityIds::default());

        assert_eq!(cells.len(), hex_lattice_len(cfg.cell_size, bounds));
        let min_x = cells.iter().map(|c| c.center.x).fold(f32::INFINITY, f32::min);
        let min_y = cells.iter().map(|c| c.center.y).fold(f32::INFINITY, f32::min);
        let max_x = cells.iter().map(|c| c.center.x).fold(f32::NEG_INFINITY, f32::max);
        let max_y = cells.iter().map(|c| c.center.y).fold(f32::NEG_INFINITY, f32::max);
        assert!(min_x < 0.0 && min_y < 0.0);
        assert!(max_x > bounds.x && max_y > bounds.y);
        assert!(cells.iter().all(|c| (0.0..TAU).contains(&c.phase_offset)));
    }

    #[test]
    fn test_hex_lattice_staggers_odd_columns() {
        let cfg = HexagonConfig::default();
        let cells = seed_hex_lattice(&cfg, Vec2::new(100.0, 100.0), &mut rng(), &mut EntityIds::default());
        let (row_step, col_step) = hex_steps(cfg.cell_size);

        // Column -1 is odd and therefore staggered
        let first = &cells[0];
        assert_eq!(first.center.x, -col_step);
        assert!((first.center.y - (-row_step + row_step / 2.0)).abs() < 1e-4);
        // Column 0 is not
        assert_eq!(cells[1].center, Vec2::new(0.0, -row_step));
    }

    #[test]
    fn test_hex_lattice_survives_zero_cell_size() {
        let cfg = HexagonConfig {
            cell_size: 0.0,
            ..Default::default()
        };
        let bounds = Vec2::new(10.0, 10.0);
        let cells = seed_hex_lattice(&cfg, bounds, &mut rng(), &mut EntityIds::default());
        assert_eq!(cells.len(), hex_lattice_len(0.0, bounds));
    }

    #[test]
    fn test_circuit_edges_target_distinct_other_nodes() {
        let cfg = CircuitConfig::default();
        let (nodes, edges) =
            seed_circuit(&cfg, Vec2::new(800.0, 600.0), &mut rng(), &mut EntityIds::default());
        assert_eq!(nodes.len(), cfg.node_count);

        for source in 0..nodes.len() {
            let outgoing: Vec<_> = edges.iter().filter(|e| e.source == source).collect();
            assert!((cfg.min_edges..=cfg.max_edges).contains(&outgoing.len()));
            let targets: HashSet<usize> = outgoing.iter().map(|e| e.target).collect();
            assert_eq!(targets.len(), outgoing.len());
            assert!(!targets.contains(&source));
        }
        for edge in &edges {
            assert!(edge.speed >= cfg.edge_speed_min && edge.speed < cfg.edge_speed_max);
        }
    }

    #[test]
    fn test_single_node_circuit_has_no_edges() {
        let cfg = CircuitConfig {
            node_count: 1,
            ..Default::default()
        };
        let (nodes, edges) = seed_circuit(&cfg, Vec2::ONE, &mut rng(), &mut EntityIds::default());
        assert_eq!(nodes.len(), 1);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_petals_pick_palette_colors() {
        let cfg = PetalConfig::default();
        let petals = seed_petals(&cfg, Vec2::new(400.0, 400.0), &mut rng(), &mut EntityIds::default());
        assert_eq!(petals.len(), cfg.count);
        for petal in &petals {
            assert!(cfg.palette.contains(&petal.color));
            assert!(petal.drift >= -cfg.drift_max && petal.drift < cfg.drift_max);
            assert!((0.0..360.0).contains(&petal.rotation));
        }
    }

    #[test]
    fn test_terrain_layer_per_color() {
        let cfg = TerrainConfig::default();
        let layers = seed_terrain(&cfg, &mut EntityIds::default());
        assert_eq!(layers.len(), cfg.layers.len());
        assert!(layers.iter().enumerate().all(|(i, l)| l.index == i));
    }

    proptest! {
        #[test]
        fn prop_pool_size_matches_density(
            count in 0usize..300,
            width in 0u32..3000,
            height in 0u32..3000,
            seed in any::<u64>(),
        ) {
            let bounds = Vec2::new(width as f32, height as f32).max(Vec2::ONE);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ids = EntityIds::default();

            let particles = seed_particles(
                &ParticlesConfig { count, ..Default::default() }, bounds, &mut rng, &mut ids);
            prop_assert_eq!(particles.len(), count);

            let petals = seed_petals(
                &PetalConfig { count, ..Default::default() }, bounds, &mut rng, &mut ids);
            prop_assert_eq!(petals.len(), count);

            let (nodes, _) = seed_circuit(
                &CircuitConfig { node_count: count, ..Default::default() }, bounds, &mut rng, &mut ids);
            prop_assert_eq!(nodes.len(), count);

            for p in particles {
                prop_assert!(p.pos.is_finite());
                prop_assert!(p.pos.x >= 0.0 && p.pos.y >= 0.0);
            }
        }
    }
}
