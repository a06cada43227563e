//! Surface state and entity types
//!
//! Everything the update and render steps touch for a single mount lives in a
//! [`SurfaceState`]. Nothing here is shared between mounts.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::seed;
use crate::color::Color;
use crate::config::{
    CircuitConfig, HexagonConfig, ParticlesConfig, PetalConfig, SurfaceConfig, TerrainConfig,
    Variant,
};
use crate::consts::MIN_SEED_EXTENT;

/// Host viewport size in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Exact size as floats
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Size used for seeding, never below one unit per axis
    pub fn seed_bounds(&self) -> Vec2 {
        self.size().max(Vec2::splat(MIN_SEED_EXTENT))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Allocates entity identities; never hands out the same id twice per mount
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// A linearly moving particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Relations drawn from this particle in the current frame
    pub connections: u32,
}

/// One cell of the hexagon lattice
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    pub id: u32,
    pub center: Vec2,
    /// Radians in `[0, 2π)`
    pub phase_offset: f32,
    /// `0.5 + 0.5 * sin(time + phase_offset)`, refreshed every frame
    pub intensity: f32,
}

/// A falling glyph
#[derive(Debug, Clone, PartialEq)]
pub struct Petal {
    pub id: u32,
    pub pos: Vec2,
    pub fall_speed: f32,
    pub drift: f32,
    /// Degrees
    pub rotation: f32,
    /// Font size in pixels
    pub size: f32,
    pub color: Color,
}

/// A fixed circuit node
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitNode {
    pub id: u32,
    pub pos: Vec2,
}

/// Directed edge carrying a traveling marker
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitEdge {
    pub source: usize,
    pub target: usize,
    pub speed: f32,
    /// Marker position along the edge in `[0, 1)`
    pub progress: f32,
}

/// One filled terrain layer
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainLayer {
    pub id: u32,
    pub index: usize,
    pub color: Color,
    /// Ridge samples, left to right; resampled every frame
    pub ridge: Vec<Vec2>,
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    pub config: ParticlesConfig,
    pub particles: Vec<Particle>,
}

#[derive(Debug, Clone)]
pub struct HexGrid {
    pub config: HexagonConfig,
    pub cells: Vec<HexCell>,
    pub time: f32,
}

#[derive(Debug, Clone)]
pub struct PetalShower {
    pub config: PetalConfig,
    pub petals: Vec<Petal>,
}

#[derive(Debug, Clone)]
pub struct CircuitBoard {
    pub config: CircuitConfig,
    pub nodes: Vec<CircuitNode>,
    pub edges: Vec<CircuitEdge>,
    pub time: f32,
}

#[derive(Debug, Clone)]
pub struct TerrainLayers {
    pub config: TerrainConfig,
    pub layers: Vec<TerrainLayer>,
    pub time: f32,
}

/// The entity pool of one mount, tagged by variant
#[derive(Debug, Clone)]
pub enum Scene {
    Particles(ParticleField),
    Hexagons(HexGrid),
    Circuit(CircuitBoard),
    Terrain(TerrainLayers),
    Petals(PetalShower),
}

impl Scene {
    /// Build a fresh pool for `config` covering `viewport`
    pub fn seed(
        config: &SurfaceConfig,
        viewport: Viewport,
        rng: &mut Pcg32,
        ids: &mut EntityIds,
    ) -> Self {
        let bounds = viewport.seed_bounds();
        match config {
            SurfaceConfig::Particles(cfg) => Scene::Particles(ParticleField {
                particles: seed::seed_particles(cfg, bounds, rng, ids),
                config: cfg.clone(),
            }),
            SurfaceConfig::Hexagons(cfg) => Scene::Hexagons(HexGrid {
                cells: seed::seed_hex_lattice(cfg, bounds, rng, ids),
                config: cfg.clone(),
                time: 0.0,
            }),
            SurfaceConfig::Circuit(cfg) => {
                let (nodes, edges) = seed::seed_circuit(cfg, bounds, rng, ids);
                Scene::Circuit(CircuitBoard {
                    config: cfg.clone(),
                    nodes,
                    edges,
                    time: 0.0,
                })
            }
            SurfaceConfig::Terrain(cfg) => Scene::Terrain(TerrainLayers {
                layers: seed::seed_terrain(cfg, ids),
                config: cfg.clone(),
                time: 0.0,
            }),
            SurfaceConfig::Petals(cfg) => Scene::Petals(PetalShower {
                petals: seed::seed_petals(cfg, bounds, rng, ids),
                config: cfg.clone(),
            }),
        }
    }

    /// Replace every entity; time accumulators carry over
    pub fn reseed(&mut self, viewport: Viewport, rng: &mut Pcg32, ids: &mut EntityIds) {
        let bounds = viewport.seed_bounds();
        match self {
            Scene::Particles(field) => {
                field.particles = seed::seed_particles(&field.config, bounds, rng, ids);
            }
            Scene::Hexagons(grid) => {
                grid.cells = seed::seed_hex_lattice(&grid.config, bounds, rng, ids);
            }
            Scene::Circuit(board) => {
                let (nodes, edges) = seed::seed_circuit(&board.config, bounds, rng, ids);
                board.nodes = nodes;
                board.edges = edges;
            }
            Scene::Terrain(terrain) => {
                terrain.layers = seed::seed_terrain(&terrain.config, ids);
            }
            Scene::Petals(shower) => {
                shower.petals = seed::seed_petals(&shower.config, bounds, rng, ids);
            }
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Scene::Particles(_) => Variant::Particles,
            Scene::Hexagons(_) => Variant::Hexagons,
            Scene::Circuit(_) => Variant::Circuit,
            Scene::Terrain(_) => Variant::Terrain,
            Scene::Petals(_) => Variant::Petals,
        }
    }

    /// Configuration this scene was seeded from
    pub fn config(&self) -> SurfaceConfig {
        match self {
            Scene::Particles(field) => SurfaceConfig::Particles(field.config.clone()),
            Scene::Hexagons(grid) => SurfaceConfig::Hexagons(grid.config.clone()),
            Scene::Circuit(board) => SurfaceConfig::Circuit(board.config.clone()),
            Scene::Terrain(terrain) => SurfaceConfig::Terrain(terrain.config.clone()),
            Scene::Petals(shower) => SurfaceConfig::Petals(shower.config.clone()),
        }
    }

    pub fn background(&self) -> Color {
        match self {
            Scene::Particles(field) => field.config.background,
            Scene::Hexagons(grid) => grid.config.background,
            Scene::Circuit(board) => board.config.background,
            Scene::Terrain(terrain) => terrain.config.background,
            Scene::Petals(shower) => shower.config.background,
        }
    }

    /// Number of entities in the pool (circuit edges are not counted)
    pub fn len(&self) -> usize {
        match self {
            Scene::Particles(field) => field.particles.len(),
            Scene::Hexagons(grid) => grid.cells.len(),
            Scene::Circuit(board) => board.nodes.len(),
            Scene::Terrain(terrain) => terrain.layers.len(),
            Scene::Petals(shower) => shower.petals.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identities of every entity, in pool order
    pub fn ids(&self) -> Vec<u32> {
        match self {
            Scene::Particles(field) => field.particles.iter().map(|p| p.id).collect(),
            Scene::Hexagons(grid) => grid.cells.iter().map(|c| c.id).collect(),
            Scene::Circuit(board) => board.nodes.iter().map(|n| n.id).collect(),
            Scene::Terrain(terrain) => terrain.layers.iter().map(|l| l.id).collect(),
            Scene::Petals(shower) => shower.petals.iter().map(|p| p.id).collect(),
        }
    }

    /// Entity positions, for invariant checks and debugging
    pub fn positions(&self) -> Vec<Vec2> {
        match self {
            Scene::Particles(field) => field.particles.iter().map(|p| p.pos).collect(),
            Scene::Hexagons(grid) => grid.cells.iter().map(|c| c.center).collect(),
            Scene::Circuit(board) => board.nodes.iter().map(|n| n.pos).collect(),
            Scene::Terrain(terrain) => terrain
                .layers
                .iter()
                .flat_map(|l| l.ridge.iter().copied())
                .collect(),
            Scene::Petals(shower) => shower.petals.iter().map(|p| p.pos).collect(),
        }
    }
}

/// Complete per-mount animation state
#[derive(Debug, Clone)]
pub struct SurfaceState {
    /// Last observed viewport
    pub viewport: Viewport,
    pub scene: Scene,
    /// Update steps run since mount
    pub frame: u64,
    /// Number of times the pool has been generated (1 after mount)
    pub seedings: u32,
    rng: Pcg32,
    ids: EntityIds,
}

impl SurfaceState {
    /// Create state seeded from the OS entropy source
    pub fn new(config: &SurfaceConfig, viewport: Viewport) -> Self {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::with_rng(config, viewport, rng)
    }

    /// Create state with a fixed seed (tests and previews)
    pub fn with_seed(config: &SurfaceConfig, viewport: Viewport, seed: u64) -> Self {
        Self::with_rng(config, viewport, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(config: &SurfaceConfig, viewport: Viewport, mut rng: Pcg32) -> Self {
        let mut ids = EntityIds::default();
        let scene = Scene::seed(config, viewport, &mut rng, &mut ids);
        log::debug!(
            "seeded {} {} entities for {}x{}",
            scene.len(),
            scene.variant().as_str(),
            viewport.width,
            viewport.height
        );
        Self {
            viewport,
            scene,
            frame: 0,
            seedings: 1,
            rng,
            ids,
        }
    }

    /// Adopt a new viewport and regenerate the pool for it
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reseed();
    }

    /// Discard every entity and generate a new pool for the current viewport
    pub fn reseed(&mut self) {
        self.scene.reseed(self.viewport, &mut self.rng, &mut self.ids);
        self.seedings += 1;
        log::debug!(
            "reseeded {} entities for {}x{}",
            self.scene.len(),
            self.viewport.width,
            self.viewport.height
        );
    }

    pub fn variant(&self) -> Variant {
        self.scene.variant()
    }

    pub fn entity_count(&self) -> usize {
        self.scene.len()
    }

    /// Scene plus the random source, for steps that respawn entities
    pub(crate) fn scene_and_rng(&mut self) -> (&mut Scene, &mut Pcg32) {
        (&mut self.scene, &mut self.rng)
    }
}
