//! Bullets and muzzle-flash animations
//!
//! Bullets travel in a straight line at fixed speed and live for at most a
//! second; any collision removes them early (the world resolves those).
//! Each shot also spawns a short muzzle flash that sticks to its shooter.

use macroquad::math::Vec2;

use super::clock::SimClock;
use super::event::ActorRef;
use super::frames::FrameSet;
use super::rect::Rect;

/// Bullet travel speed in units per second
pub const BULLET_SPEED: f32 = 1200.0;

/// Milliseconds a bullet survives without hitting anything
pub const BULLET_LIFETIME_MS: f64 = 1000.0;

/// Frames per second for the muzzle flash
const FIRE_FPS: f32 = 15.0;

/// Horizontal muzzle flash offset from the shooter's center
const FIRE_OFFSET_X: f32 = 60.0;

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Continuous center position
    pub pos: Vec2,
    /// Unit travel direction
    pub direction: Vec2,
    pub rect: Rect,
    /// Drawn (and mask-tested) mirrored when traveling leftwards
    pub flip: bool,
    spawned_at: f64,
}

impl Bullet {
    pub fn spawn(pos: Vec2, direction: Vec2, size: (f32, f32), clock: &SimClock) -> Self {
        Self {
            pos,
            direction,
            rect: Rect::from_center(pos.x.round(), pos.y.round(), size.0, size.1),
            flip: direction.x < 0.0,
            spawned_at: clock.now_ms(),
        }
    }

    /// Advance along the travel direction; false once the lifetime elapsed
    pub fn update(&mut self, dt: f32, clock: &SimClock) -> bool {
        self.pos += self.direction * BULLET_SPEED * dt;
        self.rect.set_center(self.pos.x.round(), self.pos.y.round());
        clock.now_ms() - self.spawned_at <= BULLET_LIFETIME_MS
    }
}

/// Transient muzzle flash attached to the actor that fired.
///
/// Re-centers on its owner once per frame and dies when the frame strip is
/// exhausted. Purely visual: no collision, no damage.
#[derive(Debug, Clone)]
pub struct FireAnimation {
    pub owner: ActorRef,
    pub rect: Rect,
    pub flip: bool,
    offset: Vec2,
    frame_index: f32,
    frame_count: usize,
}

impl FireAnimation {
    pub fn spawn(
        owner: ActorRef,
        owner_center: Vec2,
        direction: Vec2,
        ducked: bool,
        frames: &FrameSet,
    ) -> Self {
        let offset = Vec2::new(
            if direction.x > 0.0 {
                FIRE_OFFSET_X
            } else {
                -FIRE_OFFSET_X
            },
            if ducked { 10.0 } else { -16.0 },
        );
        let center = owner_center + offset;
        Self {
            owner,
            rect: Rect::from_center(center.x.round(), center.y.round(), frames.size.0, frames.size.1),
            flip: direction.x < 0.0,
            offset,
            frame_index: 0.0,
            frame_count: frames.len(),
        }
    }

    /// Advance the strip and re-center on the owner; false once exhausted.
    /// A dead owner just leaves the flash burning out in place.
    pub fn update(&mut self, dt: f32, owner_center: Option<Vec2>) -> bool {
        self.frame_index += FIRE_FPS * dt;
        if self.frame_index >= self.frame_count as f32 {
            return false;
        }
        if let Some(center) = owner_center {
            let c = center + self.offset;
            self.rect.set_center(c.x.round(), c.y.round());
        }
        true
    }

    pub fn frame(&self) -> usize {
        (self.frame_index as usize).min(self.frame_count.saturating_sub(1))
    }
}
