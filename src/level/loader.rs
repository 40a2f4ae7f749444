//! Level loading
//!
//! RON level files, decoded with serde and validated before the simulation
//! ever sees them. Validation enforces the simulation's preconditions
//! (exactly one player spawn, sane tuning) and bounds untrusted input so a
//! malicious file cannot exhaust memory or smuggle NaNs into the physics.

use std::fs;
use std::path::Path;

use super::{LevelData, SpawnKind};

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of tiles in a level
    pub const MAX_TILES: usize = 20_000;
    /// Maximum number of moving platforms
    pub const MAX_PLATFORMS: usize = 64;
    /// Maximum number of platform borders
    pub const MAX_BORDERS: usize = 256;
    /// Maximum number of entity spawns
    pub const MAX_SPAWNS: usize = 128;
    /// Maximum string length for image names
    pub const MAX_STRING_LEN: usize = 256;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::ParseError(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

/// Check if a float is valid (not NaN or Inf, within coordinate bounds)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

/// Load and validate a level file
pub fn load_level(path: &Path) -> Result<LevelData, LevelError> {
    let text = fs::read_to_string(path)?;
    let level: LevelData = ron::from_str(&text)?;
    validate(&level)?;
    Ok(level)
}

fn validate(level: &LevelData) -> Result<(), LevelError> {
    if level.tiles.len() > limits::MAX_TILES {
        return Err(LevelError::ValidationError(format!(
            "too many tiles: {} (max {})",
            level.tiles.len(),
            limits::MAX_TILES
        )));
    }
    if level.platforms.len() > limits::MAX_PLATFORMS {
        return Err(LevelError::ValidationError(format!(
            "too many platforms: {} (max {})",
            level.platforms.len(),
            limits::MAX_PLATFORMS
        )));
    }
    if level.borders.len() > limits::MAX_BORDERS {
        return Err(LevelError::ValidationError(format!(
            "too many borders: {} (max {})",
            level.borders.len(),
            limits::MAX_BORDERS
        )));
    }
    if level.spawns.len() > limits::MAX_SPAWNS {
        return Err(LevelError::ValidationError(format!(
            "too many spawns: {} (max {})",
            level.spawns.len(),
            limits::MAX_SPAWNS
        )));
    }

    for tile in &level.tiles {
        if !is_valid_float(tile.pos.0) || !is_valid_float(tile.pos.1) {
            return Err(LevelError::ValidationError(
                "tile position out of range".to_string(),
            ));
        }
        if tile.image.is_empty() || tile.image.len() > limits::MAX_STRING_LEN {
            return Err(LevelError::ValidationError(
                "tile image name empty or too long".to_string(),
            ));
        }
    }
    for platform in &level.platforms {
        if !is_valid_float(platform.pos.0) || !is_valid_float(platform.pos.1) {
            return Err(LevelError::ValidationError(
                "platform position out of range".to_string(),
            ));
        }
        if platform.image.is_empty() || platform.image.len() > limits::MAX_STRING_LEN {
            return Err(LevelError::ValidationError(
                "platform image name empty or too long".to_string(),
            ));
        }
    }
    for border in &level.borders {
        let ok = is_valid_float(border.pos.0)
            && is_valid_float(border.pos.1)
            && is_valid_float(border.size.0)
            && is_valid_float(border.size.1)
            && border.size.0 > 0.0
            && border.size.1 > 0.0;
        if !ok {
            return Err(LevelError::ValidationError(
                "border rect out of range".to_string(),
            ));
        }
    }
    for spawn in &level.spawns {
        if !is_valid_float(spawn.pos.0) || !is_valid_float(spawn.pos.1) {
            return Err(LevelError::ValidationError(
                "spawn position out of range".to_string(),
            ));
        }
    }

    let players = level
        .spawns
        .iter()
        .filter(|s| s.kind == SpawnKind::Player)
        .count();
    if players != 1 {
        return Err(LevelError::ValidationError(format!(
            "expected exactly one player spawn, found {}",
            players
        )));
    }

    let tuning = &level.tuning;
    let tuning_ok = tuning.gravity > 0.0
        && is_valid_float(tuning.gravity)
        && tuning.jump_speed > 0.0
        && is_valid_float(tuning.jump_speed)
        && tuning.move_speed > 0.0
        && is_valid_float(tuning.move_speed)
        && tuning.platform_speed > 0.0
        && is_valid_float(tuning.platform_speed)
        && tuning.player_health > 0
        && tuning.enemy_health > 0
        && tuning.player_cooldown_ms >= 0.0
        && tuning.enemy_cooldown_ms >= 0.0
        && tuning.enemy_range > 0.0
        && is_valid_float(tuning.enemy_range);
    if !tuning_ok {
        return Err(LevelError::ValidationError(
            "tuning values out of range".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Layer, SpawnRecord, TileRecord, Tuning};
    use std::io::Write;

    fn minimal_level() -> LevelData {
        LevelData {
            tiles: vec![TileRecord {
                pos: (0.0, 640.0),
                image: "ground".to_string(),
                layer: Layer::Level,
            }],
            platforms: Vec::new(),
            borders: Vec::new(),
            spawns: vec![SpawnRecord {
                kind: SpawnKind::Player,
                pos: (64.0, 500.0),
            }],
            tuning: Tuning::default(),
        }
    }

    #[test]
    fn test_round_trip_through_file() {
        let level = minimal_level();
        let text = ron::ser::to_string(&level).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let loaded = load_level(file.path()).unwrap();
        assert_eq!(loaded.tiles.len(), 1);
        assert_eq!(loaded.tiles[0].image, "ground");
        assert_eq!(loaded.spawns.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_level(Path::new("/nonexistent/level.ron")).unwrap_err();
        assert!(matches!(err, LevelError::IoError(_)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not ron at all {{{").unwrap();
        let err = load_level(file.path()).unwrap_err();
        assert!(matches!(err, LevelError::ParseError(_)));
    }

    #[test]
    fn test_requires_exactly_one_player_spawn() {
        let mut level = minimal_level();
        level.spawns.clear();
        assert!(matches!(
            validate(&level),
            Err(LevelError::ValidationError(_))
        ));

        let mut level = minimal_level();
        level.spawns.push(SpawnRecord {
            kind: SpawnKind::Player,
            pos: (128.0, 500.0),
        });
        assert!(matches!(
            validate(&level),
            Err(LevelError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_nan_positions() {
        let mut level = minimal_level();
        level.tiles[0].pos.0 = f32::NAN;
        assert!(matches!(
            validate(&level),
            Err(LevelError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_absurd_tile_counts() {
        let mut level = minimal_level();
        let tile = level.tiles[0].clone();
        level.tiles = vec![tile; limits::MAX_TILES + 1];
        assert!(matches!(
            validate(&level),
            Err(LevelError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let mut level = minimal_level();
        level.tuning.player_health = 0;
        assert!(matches!(
            validate(&level),
            Err(LevelError::ValidationError(_))
        ));
    }

    #[test]
    fn test_default_tuning_values() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gravity, 15.0);
        assert_eq!(tuning.jump_speed, 1400.0);
        assert_eq!(tuning.move_speed, 400.0);
        assert_eq!(tuning.platform_speed, 200.0);
        assert_eq!(tuning.player_health, 10);
        assert_eq!(tuning.enemy_health, 3);
        assert_eq!(tuning.player_cooldown_ms, 200.0);
        assert_eq!(tuning.enemy_cooldown_ms, 1000.0);
        assert_eq!(tuning.enemy_range, 600.0);
    }
}
