//! Sprite frame metadata
//!
//! The simulation never touches textures. It consumes decoded frame
//! metadata (sizes, frame counts, collision masks) produced by the asset
//! layer, and publishes (status, frame index) pairs the render layer maps
//! back to textures. Design-time data and runtime animation state stay
//! separate.

use std::collections::HashMap;

use super::mask::SpriteMask;

/// Frames per second for entity animation cycles
pub const ANIM_FPS: f32 = 7.0;

/// Which way an actor is looking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Unit x component for this facing
    pub fn unit_x(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Movement pose, combined with facing into a status tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Run,
    Idle,
    Jump,
    Duck,
}

/// Status tag driving animation selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    pub facing: Facing,
    pub pose: Pose,
}

impl Status {
    pub fn new(facing: Facing, pose: Pose) -> Self {
        Self { facing, pose }
    }
}

/// One animation strip: uniform frame size, one mask per frame
#[derive(Debug, Clone)]
pub struct FrameSet {
    pub size: (f32, f32),
    pub masks: Vec<SpriteMask>,
}

impl FrameSet {
    /// Fully solid frames (placeholder art and tests)
    pub fn solid(w: f32, h: f32, frames: usize) -> Self {
        Self {
            size: (w, h),
            masks: vec![SpriteMask::solid(w as u32, h as u32); frames.max(1)],
        }
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Mask for a frame, clamped to the strip
    pub fn mask(&self, index: usize) -> &SpriteMask {
        &self.masks[index.min(self.masks.len().saturating_sub(1))]
    }
}

/// All animation strips for one actor, keyed by status.
///
/// Lookup never fails: statuses with no dedicated strip fall back to a
/// default one so the simulation has no panicking path.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    sets: HashMap<Status, FrameSet>,
    fallback: FrameSet,
}

impl AnimationSet {
    pub fn new(fallback: FrameSet) -> Self {
        Self {
            sets: HashMap::new(),
            fallback,
        }
    }

    /// Solid single-frame strips for every listed status (tests, placeholders)
    pub fn uniform(w: f32, h: f32, frames: usize, statuses: &[Status]) -> Self {
        let mut set = Self::new(FrameSet::solid(w, h, frames));
        for status in statuses {
            set.insert(*status, FrameSet::solid(w, h, frames));
        }
        set
    }

    pub fn insert(&mut self, status: Status, frames: FrameSet) {
        self.sets.insert(status, frames);
    }

    pub fn frames(&self, status: Status) -> &FrameSet {
        self.sets.get(&status).unwrap_or(&self.fallback)
    }
}

/// Bullet sprite metadata, mask kept in both orientations
#[derive(Debug, Clone)]
pub struct BulletFrames {
    pub size: (f32, f32),
    right: SpriteMask,
    left: SpriteMask,
}

impl BulletFrames {
    pub fn new(size: (f32, f32), mask: SpriteMask) -> Self {
        Self {
            size,
            left: mask.flipped_h(),
            right: mask,
        }
    }

    pub fn mask(&self, flipped: bool) -> &SpriteMask {
        if flipped {
            &self.left
        } else {
            &self.right
        }
    }
}

/// Decoded sprite metadata the simulation consumes from the asset layer
#[derive(Debug, Clone)]
pub struct FrameCatalog {
    pub player: AnimationSet,
    pub enemy: AnimationSet,
    pub bullet: BulletFrames,
    /// Muzzle flash frames (right-facing; flip handled at draw time)
    pub fire: FrameSet,
    /// Moving platform sprite size
    pub platform_size: (f32, f32),
}

impl FrameCatalog {
    /// Every player status: facing x pose
    pub fn player_statuses() -> [Status; 8] {
        [
            Status::new(Facing::Left, Pose::Run),
            Status::new(Facing::Right, Pose::Run),
            Status::new(Facing::Left, Pose::Idle),
            Status::new(Facing::Right, Pose::Idle),
            Status::new(Facing::Left, Pose::Jump),
            Status::new(Facing::Right, Pose::Jump),
            Status::new(Facing::Left, Pose::Duck),
            Status::new(Facing::Right, Pose::Duck),
        ]
    }

    /// Enemy statuses: facing only
    pub fn enemy_statuses() -> [Status; 2] {
        [
            Status::new(Facing::Left, Pose::Run),
            Status::new(Facing::Right, Pose::Run),
        ]
    }
}
