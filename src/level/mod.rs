//! Level description data
//!
//! The native level format: plain records for tiles, moving platforms,
//! platform border regions, entity spawns and gameplay tuning, stored as
//! RON. `loader` decodes and validates files into `LevelData`; the
//! simulation consumes the records as-is and assumes they passed
//! validation (exactly one player spawn, finite coordinates).

pub mod loader;

pub use loader::{load_level, LevelError};

use serde::{Deserialize, Serialize};

/// Draw depth, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Bg,
    BgDetail,
    Level,
    FgDetailBottom,
    FgDetailTop,
}

impl Layer {
    /// Sort key for back-to-front drawing
    pub fn z(self) -> u8 {
        match self {
            Layer::Bg => 0,
            Layer::BgDetail => 1,
            Layer::Level => 2,
            Layer::FgDetailBottom => 3,
            Layer::FgDetailTop => 4,
        }
    }
}

/// One placed tile. Tiles on the `Level` layer are solid; the rest are
/// decoration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileRecord {
    pub pos: (f32, f32),
    /// Tile image name, resolved by the asset layer
    pub image: String,
    pub layer: Layer,
}

/// A moving platform spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformRecord {
    pub pos: (f32, f32),
    pub image: String,
}

/// A region that reverses platforms crossing it
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BorderRecord {
    pub pos: (f32, f32),
    pub size: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Player,
    Enemy,
}

/// An entity spawn point
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnRecord {
    pub kind: SpawnKind,
    pub pos: (f32, f32),
}

/// Gameplay tunables stored with the level.
///
/// Defaults carry the stock feel; levels override selectively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Vertical acceleration added every frame
    pub gravity: f32,
    /// Jump impulse (applied as negative vertical velocity)
    pub jump_speed: f32,
    /// Player horizontal speed, units per second
    pub move_speed: f32,
    /// Platform oscillation speed, units per second
    pub platform_speed: f32,
    pub player_health: i32,
    pub enemy_health: i32,
    pub player_cooldown_ms: f64,
    pub enemy_cooldown_ms: f64,
    /// Enemies open fire strictly inside this distance
    pub enemy_range: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 15.0,
            jump_speed: 1400.0,
            move_speed: 400.0,
            platform_speed: 200.0,
            player_health: 10,
            enemy_health: 3,
            player_cooldown_ms: 200.0,
            enemy_cooldown_ms: 1000.0,
            enemy_range: 600.0,
        }
    }
}

/// A complete decoded level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub tiles: Vec<TileRecord>,
    #[serde(default)]
    pub platforms: Vec<PlatformRecord>,
    #[serde(default)]
    pub borders: Vec<BorderRecord>,
    #[serde(default)]
    pub spawns: Vec<SpawnRecord>,
    #[serde(default)]
    pub tuning: Tuning,
}

impl LevelData {
    /// Width of the level in world units, from the rightmost tile
    pub fn width(&self, tile_size: f32) -> f32 {
        self.tiles
            .iter()
            .map(|t| t.pos.0 + tile_size)
            .fold(0.0, f32::max)
    }
}
