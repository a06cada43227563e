//! Per-frame update step
//!
//! One call to [`tick`] advances every entity of the scene by one frame. The
//! frame is the time unit: speeds are expressed per frame, not per second.

use glam::Vec2;
use rand::Rng;

use super::state::{CircuitBoard, HexGrid, ParticleField, PetalShower, Scene, SurfaceState, TerrainLayers};
use super::terrain::sample_ridge;

/// Advance the surface state by one frame
pub fn tick(state: &mut SurfaceState) {
    state.frame += 1;
    let size = state.viewport.size();

    let (scene, rng) = state.scene_and_rng();
    match scene {
        Scene::Particles(field) => step_particles(field, size),
        Scene::Hexagons(grid) => step_hexagons(grid),
        Scene::Circuit(board) => step_circuit(board),
        Scene::Terrain(terrain) => step_terrain(terrain, size),
        Scene::Petals(shower) => step_petals(shower, size, rng),
    }
}

/// Linear motion with reactive edge bounce; also resets connection counters
pub fn step_particles(field: &mut ParticleField, size: Vec2) {
    let moving = field.config.movement;
    for p in &mut field.particles {
        if moving {
            p.pos += p.vel;
            if p.pos.x < 0.0 || p.pos.x > size.x {
                p.vel.x = -p.vel.x;
            }
            if p.pos.y < 0.0 || p.pos.y > size.y {
                p.vel.y = -p.vel.y;
            }
        }
        p.connections = 0;
    }
}

pub fn step_hexagons(grid: &mut HexGrid) {
    grid.time += grid.config.pulse_speed;
    for cell in &mut grid.cells {
        cell.intensity = 0.5 + 0.5 * (grid.time + cell.phase_offset).sin();
    }
}

pub fn step_circuit(board: &mut CircuitBoard) {
    board.time += board.config.animation_speed;
    for edge in &mut board.edges {
        edge.progress = (board.time * edge.speed).rem_euclid(1.0);
    }
}

pub fn step_terrain(terrain: &mut TerrainLayers, size: Vec2) {
    terrain.time += terrain.config.speed;
    for layer in &mut terrain.layers {
        layer.ridge = sample_ridge(&terrain.config, layer.index, terrain.time, size);
    }
}

/// Fall, drift and spin; respawn above the top edge after leaving the bottom
pub fn step_petals(shower: &mut PetalShower, size: Vec2, rng: &mut impl Rng) {
    let cfg = &shower.config;
    for petal in &mut shower.petals {
        petal.pos.y += petal.fall_speed;
        petal.pos.x += petal.drift;
        petal.rotation += cfg.spin;

        if petal.pos.y > size.y {
            petal.pos.y = cfg.respawn_y;
            petal.pos.x = rng.random::<f32>() * size.x;
        }
        if petal.pos.x > size.x || petal.pos.x < 0.0 {
            petal.drift = -petal.drift;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParticlesConfig, SurfaceConfig, Variant};
    use crate::sim::state::{Particle, Viewport};
    use proptest::prelude::*;

    fn particle_state(cfg: ParticlesConfig, viewport: Viewport, seed: u64) -> SurfaceState {
        SurfaceState::with_seed(&SurfaceConfig::Particles(cfg), viewport, seed)
    }

    #[test]
    fn test_particle_bounces_off_left_edge() {
        let mut state = particle_state(
            ParticlesConfig {
                count: 0,
                ..Default::default()
            },
            Viewport::new(100, 100),
            1,
        );
        let Scene::Particles(field) = &mut state.scene else {
            unreachable!()
        };
        field.particles.push(Particle {
            id: 99,
            pos: Vec2::new(0.2, 50.0),
            vel: Vec2::new(-0.5, 0.0),
            radius: 1.0,
            connections: 2,
        });

        tick(&mut state);
        let Scene::Particles(field) = &state.scene else {
            unreachable!()
        };
        let p = &field.particles[0];
        // Overshoot by one frame, then the velocity is flipped
        assert!(p.pos.x < 0.0);
        assert_eq!(p.vel.x, 0.5);
        assert_eq!(p.connections, 0);

        tick(&mut state);
        let Scene::Particles(field) = &state.scene else {
            unreachable!()
        };
        assert!(field.particles[0].pos.x > 0.0);
    }

    #[test]
    fn test_static_particles_do_not_move() {
        let mut state = particle_state(
            ParticlesConfig {
                movement: false,
                ..Default::default()
            },
            Viewport::new(400, 300),
            5,
        );
        let before = state.scene.positions();
        for _ in 0..10 {
            tick(&mut state);
        }
        assert_eq!(state.scene.positions(), before);
        assert_eq!(state.frame, 10);
    }

    #[test]
    fn test_hexagon_intensity_follows_sine() {
        let mut state =
            SurfaceState::with_seed(&SurfaceConfig::for_variant(Variant::Hexagons), Viewport::new(200, 200), 2);
        tick(&mut state);
        let Scene::Hexagons(grid) = &state.scene else {
            unreachable!()
        };
        assert!((grid.time - grid.config.pulse_speed).abs() < 1e-6);
        for cell in &grid.cells {
            let expected = 0.5 + 0.5 * (grid.time + cell.phase_offset).sin();
            assert!((cell.intensity - expected).abs() < 1e-6);
            assert!((0.0..=1.0).contains(&cell.intensity));
        }
    }

    #[test]
    fn test_circuit_progress_wraps() {
        let mut state =
            SurfaceState::with_seed(&SurfaceConfig::for_variant(Variant::Circuit), Viewport::new(300, 300), 4);
        let Scene::Circuit(board) = &mut state.scene else {
            unreachable!()
        };
        board.time = 99.99;
        for edge in &mut board.edges {
            edge.speed = 0.02;
        }
        tick(&mut state);
        let Scene::Circuit(board) = &state.scene else {
            unreachable!()
        };
        let expected = (board.time * 0.02).rem_euclid(1.0);
        for edge in &board.edges {
            assert!((0.0..1.0).contains(&edge.progress));
            assert!((edge.progress - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_terrain_ridges_sampled_on_tick() {
        let mut state =
            SurfaceState::with_seed(&SurfaceConfig::for_variant(Variant::Terrain), Viewport::new(500, 400), 8);
        assert!(state.scene.positions().is_empty());
        tick(&mut state);
        let Scene::Terrain(terrain) = &state.scene else {
            unreachable!()
        };
        for layer in &terrain.layers {
            assert_eq!(layer.ridge.len(), 11);
            assert_eq!(layer.ridge.last().map(|p| p.x), Some(500.0));
        }
    }

    #[test]
    fn test_petal_respawns_above_top() {
        let mut state =
            SurfaceState::with_seed(&SurfaceConfig::for_variant(Variant::Petals), Viewport::new(300, 200), 6);
        let Scene::Petals(shower) = &mut state.scene else {
            unreachable!()
        };
        shower.petals.truncate(1);
        let petal = &mut shower.petals[0];
        petal.pos = Vec2::new(150.0, 199.5);
        petal.fall_speed = 1.0;
        petal.drift = 0.0;
        petal.rotation = 10.0;

        tick(&mut state);
        let Scene::Petals(shower) = &state.scene else {
            unreachable!()
        };
        let petal = &shower.petals[0];
        assert_eq!(petal.pos.y, -30.0);
        assert!((0.0..300.0).contains(&petal.pos.x));
        assert!((petal.rotation - 10.2).abs() < 1e-5);
    }

    #[test]
    fn test_petal_drift_flips_at_side_edges() {
        let mut state =
            SurfaceState::with_seed(&SurfaceConfig::for_variant(Variant::Petals), Viewport::new(300, 200), 6);
        let Scene::Petals(shower) = &mut state.scene else {
            unreachable!()
        };
        shower.petals.truncate(1);
        let petal = &mut shower.petals[0];
        petal.pos = Vec2::new(299.8, 10.0);
        petal.fall_speed = 0.5;
        petal.drift = 0.5;

        tick(&mut state);
        let Scene::Petals(shower) = &state.scene else {
            unreachable!()
        };
        assert_eq!(shower.petals[0].drift, -0.5);
    }

    proptest! {
        #[test]
        fn prop_bounce_overshoots_at_most_one_step(
            width in 50u32..2000,
            height in 50u32..2000,
            speed in 0f32..5.0,
            seed in any::<u64>(),
        ) {
            let cfg = ParticlesConfig { count: 40, speed, connect: false, ..Default::default() };
            let mut state = particle_state(cfg, Viewport::new(width, height), seed);
            let size = state.viewport.size();

            for _ in 0..200 {
                tick(&mut state);
                let Scene::Particles(field) = &state.scene else { unreachable!() };
                for p in &field.particles {
                    let slack_x = p.vel.x.abs() + 1e-3;
                    let slack_y = p.vel.y.abs() + 1e-3;
                    prop_assert!(p.pos.x >= -slack_x && p.pos.x <= size.x + slack_x);
                    prop_assert!(p.pos.y >= -slack_y && p.pos.y <= size.y + slack_y);
                }
            }
        }
    }
}
