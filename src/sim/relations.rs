//! Per-frame connection matching between particles
//!
//! Pairs are visited in index order `(i, j)`, `i < j`, and the connection
//! counters are updated as soon as a pair is accepted. A later pair therefore
//! sees the counters left by earlier ones: first come, first served, not an
//! optimal matching.

use glam::Vec2;

use super::state::Particle;

/// A connection accepted for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation {
    pub a: usize,
    pub b: usize,
    pub from: Vec2,
    pub to: Vec2,
    /// `1 - distance / max_distance`, in `(0, 1]`
    pub strength: f32,
}

/// Match every eligible pair, incrementing both endpoints' counters.
///
/// Counters are expected to have been reset by the update step.
pub fn connect_particles(
    particles: &mut [Particle],
    max_distance: f32,
    max_connections: u32,
) -> Vec<Relation> {
    let mut relations = Vec::new();
    if max_distance <= 0.0 || max_connections == 0 {
        return relations;
    }

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            if particles[i].connections >= max_connections {
                break;
            }
            if particles[j].connections >= max_connections {
                continue;
            }

            let distance = particles[i].pos.distance(particles[j].pos);
            if distance < max_distance {
                relations.push(Relation {
                    a: i,
                    b: j,
                    from: particles[i].pos,
                    to: particles[j].pos,
                    strength: 1.0 - distance / max_distance,
                });
                particles[i].connections += 1;
                particles[j].connections += 1;
            }
        }
    }

    relations
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn particle_at(id: u32, x: f32, y: f32) -> Particle {
        Particle {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius: 1.0,
            connections: 0,
        }
    }

    #[test]
    fn test_coincident_particles_connect_fully_opaque() {
        let mut particles = vec![particle_at(1, 10.0, 10.0), particle_at(2, 10.0, 10.0)];
        let relations = connect_particles(&mut particles, 5.0, 1);
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].strength, 1.0);
        assert_eq!(particles[0].connections, 1);
        assert_eq!(particles[1].connections, 1);
    }

    #[test]
    fn test_strength_falls_off_linearly() {
        let mut particles = vec![particle_at(1, 0.0, 0.0), particle_at(2, 75.0, 0.0)];
        let relations = connect_particles(&mut particles, 150.0, 3);
        assert!((relations[0].strength - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pairs_at_threshold_are_rejected() {
        let mut particles = vec![particle_at(1, 0.0, 0.0), particle_at(2, 100.0, 0.0)];
        assert!(connect_particles(&mut particles, 100.0, 3).is_empty());
    }

    #[test]
    fn test_greedy_order_dependence() {
        // 0 and 1 are both close to 2; with one connection each, 0 claims 1 first
        // and 2 is left alone even though 1-2 is the closer pair.
        let mut particles = vec![
            particle_at(1, 0.0, 0.0),
            particle_at(2, 10.0, 0.0),
            particle_at(3, 12.0, 0.0),
        ];
        let relations = connect_particles(&mut particles, 50.0, 1);
        assert_eq!(relations.len(), 1);
        assert_eq!((relations[0].a, relations[0].b), (0, 1));
        assert_eq!(particles[2].connections, 0);
    }

    #[test]
    fn test_zero_limits_draw_nothing() {
        let mut particles = vec![particle_at(1, 0.0, 0.0), particle_at(2, 0.0, 0.0)];
        assert!(connect_particles(&mut particles, 10.0, 0).is_empty());
        assert!(connect_particles(&mut particles, 0.0, 3).is_empty());
    }

    proptest! {
        #[test]
        fn prop_counters_never_exceed_max(
            points in prop::collection::vec((0f32..300.0, 0f32..300.0), 0..60),
            max_connections in 0u32..6,
            max_distance in 0f32..200.0,
        ) {
            let mut particles: Vec<Particle> = points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| particle_at(i as u32, x, y))
                .collect();
            let relations = connect_particles(&mut particles, max_distance, max_connections);

            for p in &particles {
                prop_assert!(p.connections <= max_connections);
            }
            let total: u32 = particles.iter().map(|p| p.connections).sum();
            prop_assert_eq!(total as usize, relations.len() * 2);
            for r in &relations {
                prop_assert!(r.a < r.b);
                prop_assert!(r.strength > 0.0 && r.strength <= 1.0);
            }
        }

        #[test]
        fn prop_matching_is_maximal(
            points in prop::collection::vec((0f32..100.0, 0f32..100.0), 0..30),
            max_connections in 1u32..4,
        ) {
            // Any pair left unconnected must be out of range or have a saturated endpoint
            let mut particles: Vec<Particle> = points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| particle_at(i as u32, x, y))
                .collect();
            let relations = connect_particles(&mut particles, 40.0, max_connections);

            for i in 0..particles.len() {
                for j in (i + 1)..particles.len() {
                    let joined = relations.iter().any(|r| r.a == i && r.b == j);
                    let in_range = particles[i].pos.distance(particles[j].pos) < 40.0;
                    let room = particles[i].connections < max_connections
                        && particles[j].connections < max_connections;
                    prop_assert!(joined || !in_range || !room);
                }
            }
        }
    }
}
