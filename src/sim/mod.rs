//! Animation simulation module
//!
//! Seeding, per-frame updates and relation matching. This module knows nothing
//! about drawing or scheduling:
//! - One frame is the time unit
//! - All mutable state is owned by a single [`SurfaceState`]
//! - Random numbers come only from the state's own RNG

pub mod relations;
pub mod seed;
pub mod state;
pub mod terrain;
pub mod tick;

pub use relations::{Relation, connect_particles};
pub use state::{
    CircuitBoard, CircuitEdge, CircuitNode, EntityIds, HexCell, HexGrid, Particle, ParticleField,
    Petal, PetalShower, Scene, SurfaceState, TerrainLayer, TerrainLayers, Viewport,
};
pub use tick::tick;
