//! Simulation core
//!
//! A headless, deterministic side-scroller simulation. The world owns all
//! entities and steps them once per frame; collaborators feed it a decoded
//! level description, decoded sprite metadata and an input snapshot, and
//! read back drawables, the player's health and fire-and-forget events.
//!
//! Key concepts:
//! - Body: position/velocity with axis-separated swept collision
//! - Damageable: health and the post-hit vulnerability window
//! - SimClock: explicit simulation time threaded through every update
//! - Events: per-frame queues decoupling controllers from audio/spawning
//!
//! Design philosophy: capability structs composed into concrete value
//! types (no entity hierarchy), and all timing through one clock so tests
//! can drive synthetic time.

pub mod body;
pub mod bullet;
pub mod clock;
pub mod damage;
pub mod enemy;
pub mod event;
pub mod frames;
pub mod mask;
pub mod platform;
pub mod player;
pub mod rect;
pub mod world;

// Re-export main types
pub use event::Events;
pub use frames::{AnimationSet, BulletFrames, Facing, FrameCatalog, FrameSet, Pose, Status};
pub use mask::SpriteMask;
pub use rect::Rect;
pub use world::{DrawKind, Drawable, GameWorld, SimStatus};

/// Held-state snapshot of the controls, polled once per frame by the input
/// layer. Fire is held-state too; the cooldown makes it effectively
/// edge-triggered.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub duck: bool,
    pub fire: bool,
}
