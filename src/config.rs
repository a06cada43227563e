//! Backdrop configuration and named presets
//!
//! A [`SurfaceConfig`] is supplied once per mount. Every field has a default, so
//! a JSON config only needs to name the variant and whatever it overrides:
//!
//! ```json
//! { "variant": "particles", "count": 150, "color": "#4f8fff" }
//! ```

use serde::{Deserialize, Serialize};

use crate::color::{Color, css};
use crate::error::{BackdropError, BackdropResult};

/// The closed set of animation styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Bouncing particles joined by distance-faded lines
    Particles,
    /// Lattice of hexagons pulsing in size and color
    Hexagons,
    /// Static nodes with markers traveling along their edges
    Circuit,
    /// Layered hills sampled from a procedural noise function
    Terrain,
    /// Rotating glyphs that drift and fall
    Petals,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Particles,
        Variant::Hexagons,
        Variant::Circuit,
        Variant::Terrain,
        Variant::Petals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Particles => "particles",
            Variant::Hexagons => "hexagons",
            Variant::Circuit => "circuit",
            Variant::Terrain => "terrain",
            Variant::Petals => "petals",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "particles" | "particle" => Some(Variant::Particles),
            "hexagons" | "hexagon" | "hex" => Some(Variant::Hexagons),
            "circuit" | "circuit_board" => Some(Variant::Circuit),
            "terrain" | "noise_terrain" => Some(Variant::Terrain),
            "petals" | "flowers" => Some(Variant::Petals),
            _ => None,
        }
    }

    /// Label for a background selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Variant::Particles => "Particle Network",
            Variant::Hexagons => "Hexagon Grid",
            Variant::Circuit => "Circuit Board",
            Variant::Terrain => "Noise Terrain",
            Variant::Petals => "Flower Shower",
        }
    }

    /// Whether the render step draws inter-entity relations
    pub fn has_relations(&self) -> bool {
        matches!(self, Variant::Particles)
    }
}

/// Linear-motion particles with optional connection lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    /// Number of particles
    pub count: usize,
    pub color: Color,
    pub background: Color,
    /// Velocity components are drawn from `(U[0,1) - 0.5) * speed`
    pub speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// When false particles stay where they were seeded
    pub movement: bool,
    /// When false no relations are drawn
    pub connect: bool,
    pub max_connections: u32,
    pub connect_distance: f32,
    pub line_color: Color,
    /// Multiplier applied on top of the distance falloff
    pub line_opacity: f32,
    pub line_width: f32,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            count: 100,
            color: Color::WHITE,
            background: css("#1a1a2e"),
            speed: 1.0,
            radius_min: 1.0,
            radius_max: 4.0,
            movement: true,
            connect: true,
            max_connections: 3,
            connect_distance: 150.0,
            line_color: Color::WHITE,
            line_opacity: 0.5,
            line_width: 1.0,
        }
    }
}

impl ParticlesConfig {
    /// Denser blue network used on the landing page
    pub fn network() -> Self {
        Self {
            count: 150,
            color: css("#4f8fff"),
            background: css("#0a0a20"),
            speed: 0.8,
            max_connections: 5,
            connect_distance: 200.0,
            ..Self::default()
        }
    }

    /// Slow, faint star field
    pub fn constellation() -> Self {
        Self {
            count: 100,
            color: Color::WHITE,
            background: css("#0f172a"),
            speed: 0.2,
            radius_min: 0.5,
            radius_max: 2.0,
            max_connections: 3,
            connect_distance: 100.0,
            line_opacity: 0.15,
            line_width: 0.5,
            ..Self::default()
        }
    }
}

/// Pulsing hexagon lattice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexagonConfig {
    /// Circumradius of a lattice cell; also the lattice spacing
    pub cell_size: f32,
    /// Time accumulator increment per frame
    pub pulse_speed: f32,
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
}

impl Default for HexagonConfig {
    fn default() -> Self {
        Self {
            cell_size: 50.0,
            pulse_speed: 0.02,
            primary: css("#1e3a8a"),
            secondary: css("#3b82f6"),
            background: css("#0f172a"),
        }
    }
}

/// Circuit board: static nodes, traveling pulses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    pub node_count: usize,
    pub line_width: f32,
    /// Node radius; pulses are drawn at half this size
    pub node_size: f32,
    pub line_color: Color,
    pub node_color: Color,
    pub background: Color,
    pub animation_speed: f32,
    /// Outgoing edges per node, drawn from `min_edges..=max_edges`
    pub min_edges: usize,
    pub max_edges: usize,
    pub edge_speed_min: f32,
    pub edge_speed_max: f32,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            node_count: 20,
            line_width: 1.5,
            node_size: 4.0,
            line_color: css("#22c55e"),
            node_color: css("#4ade80"),
            background: css("#052e16"),
            animation_speed: 0.01,
            min_edges: 1,
            max_edges: 3,
            edge_speed_min: 0.01,
            edge_speed_max: 0.03,
        }
    }
}

/// Layered procedural terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Horizontal distance between ridge samples
    pub resolution: f32,
    pub amplitude: f32,
    pub speed: f32,
    /// One layer per color, back to front
    pub layers: Vec<Color>,
    pub background: Color,
    /// Distance of the first ridge baseline above the bottom edge
    pub base_offset: f32,
    /// Extra lift applied to each successive layer
    pub layer_spacing: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            resolution: 50.0,
            amplitude: 50.0,
            speed: 0.01,
            layers: vec![css("#134e4a"), css("#14b8a6"), css("#99f6e4")],
            background: css("#042f2e"),
            base_offset: 100.0,
            layer_spacing: 20.0,
        }
    }
}

/// Falling, drifting, rotating glyphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetalConfig {
    pub count: usize,
    pub glyph: String,
    /// Each petal picks one color; it tints the glyph and its glow
    pub palette: Vec<Color>,
    pub size_min: f32,
    pub size_max: f32,
    pub fall_min: f32,
    pub fall_max: f32,
    /// Horizontal drift is drawn from `[-drift_max, drift_max)`
    pub drift_max: f32,
    /// Rotation added each frame, in degrees
    pub spin: f32,
    pub shadow_blur: f32,
    /// Vertical position a petal respawns at after leaving the bottom edge
    pub respawn_y: f32,
    pub background: Color,
}

impl Default for PetalConfig {
    fn default() -> Self {
        Self {
            count: 50,
            glyph: "\u{1F338}".to_string(),
            palette: vec![
                css("#FFB6C1"),
                css("#FFC0CB"),
                css("#FF69B4"),
                css("#FF1493"),
                css("#DB7093"),
            ],
            size_min: 20.0,
            size_max: 40.0,
            fall_min: 0.5,
            fall_max: 2.0,
            drift_max: 1.0,
            spin: 0.2,
            shadow_blur: 12.0,
            respawn_y: -30.0,
            background: Color::TRANSPARENT,
        }
    }
}

/// Per-mount configuration, tagged by variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum SurfaceConfig {
    Particles(ParticlesConfig),
    Hexagons(HexagonConfig),
    Circuit(CircuitConfig),
    Terrain(TerrainConfig),
    Petals(PetalConfig),
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig::Particles(ParticlesConfig::default())
    }
}

/// Names accepted by [`SurfaceConfig::preset`]
pub const PRESETS: [&str; 7] = [
    "particles",
    "network",
    "constellation",
    "hexagon",
    "circuit",
    "terrain",
    "flowers",
];

/// Selector label for a preset name
pub fn preset_label(name: &str) -> Option<&'static str> {
    match name {
        "network" => Some("Network"),
        "constellation" => Some("Constellation"),
        other => Variant::from_str(other).map(|v| v.display_name()),
    }
}

impl SurfaceConfig {
    pub fn variant(&self) -> Variant {
        match self {
            SurfaceConfig::Particles(_) => Variant::Particles,
            SurfaceConfig::Hexagons(_) => Variant::Hexagons,
            SurfaceConfig::Circuit(_) => Variant::Circuit,
            SurfaceConfig::Terrain(_) => Variant::Terrain,
            SurfaceConfig::Petals(_) => Variant::Petals,
        }
    }

    /// Default configuration for a variant
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Particles => SurfaceConfig::Particles(ParticlesConfig::default()),
            Variant::Hexagons => SurfaceConfig::Hexagons(HexagonConfig::default()),
            Variant::Circuit => SurfaceConfig::Circuit(CircuitConfig::default()),
            Variant::Terrain => SurfaceConfig::Terrain(TerrainConfig::default()),
            Variant::Petals => SurfaceConfig::Petals(PetalConfig::default()),
        }
    }

    /// Look up a named preset (see [`PRESETS`]); variant names are accepted too
    pub fn preset(name: &str) -> BackdropResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "network" => Ok(SurfaceConfig::Particles(ParticlesConfig::network())),
            "constellation" => Ok(SurfaceConfig::Particles(ParticlesConfig::constellation())),
            other => Variant::from_str(other)
                .map(Self::for_variant)
                .ok_or_else(|| BackdropError::UnknownPreset(name.to_string())),
        }
    }

    pub fn from_json(json: &str) -> BackdropResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Accept either a JSON object or a preset name
    pub fn resolve(input: &str) -> BackdropResult<Self> {
        let trimmed = input.trim();
        if trimmed.starts_with('{') {
            Self::from_json(trimmed)
        } else {
            Self::preset(trimmed)
        }
    }

    /// Color filled over the whole surface at the start of every frame
    pub fn background(&self) -> Color {
        match self {
            SurfaceConfig::Particles(c) => c.background,
            SurfaceConfig::Hexagons(c) => c.background,
            SurfaceConfig::Circuit(c) => c.background,
            SurfaceConfig::Terrain(c) => c.background,
            SurfaceConfig::Petals(c) => c.background,
        }
    }
}
