//! Procedural terrain sampling
//!
//! The noise is a cheap sum of sines rather than a true gradient noise; it only
//! needs to look like rolling hills.

use glam::Vec2;

use crate::config::TerrainConfig;
use crate::consts::MIN_TERRAIN_RESOLUTION;

/// Smooth pseudo-noise in roughly `[-1, 1]`
#[inline]
pub fn noise(x: f32, y: f32) -> f32 {
    (x * 0.1).sin() * (y * 0.1).cos() * 0.5 + (x * 0.05 + y * 0.05).sin() * 0.5
}

/// Sample the ridge of layer `index` at `time` across a surface of `size`.
///
/// Samples sit at `x = 0, r, 2r, …` up to and including `size.x`.
pub fn sample_ridge(cfg: &TerrainConfig, index: usize, time: f32, size: Vec2) -> Vec<Vec2> {
    let step = cfg.resolution.max(MIN_TERRAIN_RESOLUTION);
    let samples = (size.x / step).floor() as usize + 1;
    let lift = cfg.base_offset + index as f32 * cfg.layer_spacing;
    let layer_time = time + index as f32;

    (0..samples)
        .map(|i| {
            let x = i as f32 * step;
            let y = size.y - lift - noise(x * 0.05, layer_time) * cfg.amplitude;
            Vec2::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_bounded() {
        for i in 0..500 {
            let v = noise(i as f32 * 1.7, i as f32 * 0.3);
            assert!((-1.0..=1.0).contains(&v));
        }
        assert_eq!(noise(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_ridge_spans_width_inclusive() {
        let cfg = TerrainConfig::default();
        let ridge = sample_ridge(&cfg, 0, 0.0, Vec2::new(200.0, 400.0));
        let xs: Vec<f32> = ridge.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
    }

    #[test]
    fn test_ridge_rises_with_layer_index() {
        let cfg = TerrainConfig {
            amplitude: 0.0,
            ..Default::default()
        };
        let size = Vec2::new(100.0, 500.0);
        let back = sample_ridge(&cfg, 0, 1.0, size);
        let front = sample_ridge(&cfg, 2, 1.0, size);
        assert_eq!(back[0].y, 400.0);
        assert_eq!(front[0].y, 360.0);
    }

    #[test]
    fn test_zero_width_and_resolution_are_safe() {
        let cfg = TerrainConfig {
            resolution: 0.0,
            ..Default::default()
        };
        let ridge = sample_ridge(&cfg, 1, 3.0, Vec2::ZERO);
        assert_eq!(ridge.len(), 1);
        assert!(ridge[0].is_finite());
    }
}
