//! Window and world constants

/// Window dimensions
pub const WINDOW_WIDTH: i32 = 1280;
pub const WINDOW_HEIGHT: i32 = 720;

/// Side length of one level tile in world units
pub const TILE_SIZE: f32 = 64.0;
