//! Player controller
//!
//! Turns the frame's input snapshot into movement, pose and shooting.
//! Per-frame order matters and mirrors the rest of the simulation: snapshot
//! the previous box, read input, derive the status tag, move and resolve
//! collisions, detect floor/platform contact, then advance the animation
//! and combat timers. Death is observed by the world, not handled here.

use macroquad::math::Vec2;

use crate::level::Tuning;

use super::body::{Axis, Body, Obstacle};
use super::clock::{Cooldown, SimClock};
use super::damage::Damageable;
use super::event::{ActorRef, Events, ShootEvent};
use super::frames::{AnimationSet, Facing, Pose, Status, ANIM_FPS};
use super::platform::MovingPlatform;
use super::InputSnapshot;

/// Bullet spawn distance ahead of the player's center
const MUZZLE_OFFSET_X: f32 = 60.0;

/// The player character. Exactly one per world.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub vitals: Damageable,
    pub status: Status,
    pub on_floor: bool,
    /// Platform currently stood on, if any. Cleared every frame.
    pub riding: Option<usize>,
    pub duck: bool,
    gravity: f32,
    jump_speed: f32,
    trigger: Cooldown,
    frame_index: f32,
    frame: usize,
}

impl Player {
    pub fn new(pos: Vec2, size: (f32, f32), tuning: &Tuning) -> Self {
        Self {
            body: Body::new(pos, size, tuning.move_speed),
            vitals: Damageable::new(tuning.player_health),
            status: Status::new(Facing::Right, Pose::Run),
            on_floor: false,
            riding: None,
            duck: false,
            gravity: tuning.gravity,
            jump_speed: tuning.jump_speed,
            trigger: Cooldown::new(tuning.player_cooldown_ms),
            frame_index: 0.0,
            frame: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Current animation frame for drawing and mask lookup
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn update(
        &mut self,
        dt: f32,
        clock: &SimClock,
        input: &InputSnapshot,
        solids: &[Obstacle],
        platforms: &[MovingPlatform],
        events: &mut Events,
        anims: &AnimationSet,
    ) {
        self.body.snapshot();
        self.read_input(input, clock, events);
        self.resolve_status();
        self.movement(dt, solids, platforms);
        self.check_contact(solids);
        self.animate(dt, anims);
        self.vitals.tick(clock);
    }

    fn read_input(&mut self, input: &InputSnapshot, clock: &SimClock, events: &mut Events) {
        if input.right {
            self.body.dir.x = 1.0;
            self.status = Status::new(Facing::Right, Pose::Run);
        } else if input.left {
            self.body.dir.x = -1.0;
            self.status = Status::new(Facing::Left, Pose::Run);
        } else {
            self.body.dir.x = 0.0;
        }

        if input.jump && self.on_floor {
            self.body.dir.y = -self.jump_speed;
        }

        self.duck = input.duck;

        if input.fire && self.trigger.ready(clock) {
            let direction = Vec2::new(self.status.facing.unit_x(), 0.0);
            let y_offset = if self.duck { 10.0 } else { -16.0 };
            events.shoot.send(ShootEvent {
                pos: self.center() + direction * MUZZLE_OFFSET_X + Vec2::new(0.0, y_offset),
                direction,
                shooter: ActorRef::Player,
                ducked: self.duck,
            });
            self.trigger.arm(clock);
        }
    }

    /// Pose precedence: idle when grounded and still, jump when airborne
    /// and falling or rising, duck when grounded and held
    fn resolve_status(&mut self) {
        if self.body.dir.x == 0.0 && self.on_floor {
            self.status.pose = Pose::Idle;
        }
        if self.body.dir.y != 0.0 && !self.on_floor {
            self.status.pose = Pose::Jump;
        }
        if self.on_floor && self.duck {
            self.status.pose = Pose::Duck;
        }
    }

    fn movement(&mut self, dt: f32, solids: &[Obstacle], platforms: &[MovingPlatform]) {
        // Ducking roots the player while grounded
        if self.duck && self.on_floor {
            self.body.dir.x = 0.0;
        }

        self.body.pos.x += self.body.dir.x * self.body.speed * dt;
        self.body.sync_x();
        self.body.resolve_axis(Axis::Horizontal, solids);

        // Gravity accumulates per frame, not per second
        self.body.dir.y += self.gravity;
        self.body.pos.y += self.body.dir.y * dt;

        // Riding a platform that is moving down faster than we fall would
        // drop us through it: cancel the fall and stay glued to its top.
        if let Some(index) = self.riding {
            if let Some(platform) = platforms.get(index) {
                if platform.dir_y > 0.0 && self.body.dir.y > 0.0 {
                    self.body.dir.y = 0.0;
                    self.body.rect.set_bottom(platform.rect.top());
                    self.body.pos.y = self.body.rect.y;
                    self.on_floor = true;
                }
            }
        }

        self.body.sync_y();
        let hit = self.body.resolve_axis(Axis::Vertical, solids);
        if hit.landed {
            self.on_floor = true;
        }

        self.riding = None;
        if self.on_floor && self.body.dir.y != 0.0 {
            self.on_floor = false;
        }
    }

    fn check_contact(&mut self, solids: &[Obstacle]) {
        let probe = self.body.floor_probe();
        for solid in solids {
            if solid.rect.overlaps(&probe) {
                if self.body.dir.y > 0.0 {
                    self.on_floor = true;
                }
                if let Some(index) = solid.platform {
                    self.riding = Some(index);
                }
            }
        }
    }

    fn animate(&mut self, dt: f32, anims: &AnimationSet) {
        let frames = anims.frames(self.status);
        self.frame_index += ANIM_FPS * dt;
        if self.frame_index >= frames.len() as f32 {
            self.frame_index = 0.0;
        }
        self.frame = (self.frame_index as usize).min(frames.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::frames::FrameCatalog;
    use crate::game::rect::Rect;

    fn test_anims() -> AnimationSet {
        AnimationSet::uniform(32.0, 32.0, 2, &FrameCatalog::player_statuses())
    }

    fn floor_at(y: f32) -> Obstacle {
        Obstacle::fixed(Rect::new(-500.0, y, 2000.0, 64.0))
    }

    fn idle_input() -> InputSnapshot {
        InputSnapshot::default()
    }

    #[test]
    fn test_falls_onto_floor_and_lands() {
        let mut player = Player::new(Vec2::new(0.0, 500.0), (32.0, 32.0), &Tuning::default());
        let solids = [floor_at(532.0)];
        let platforms: [MovingPlatform; 0] = [];
        let clock = SimClock::new();
        let mut events = Events::new();
        let anims = test_anims();

        player.update(
            0.1,
            &clock,
            &idle_input(),
            &solids,
            &platforms,
            &mut events,
            &anims,
        );

        assert!(player.on_floor);
        assert_eq!(player.body.dir.y, 0.0);
        assert_eq!(player.body.rect.bottom(), 532.0);
    }

    #[test]
    fn test_jump_requires_floor() {
        let mut player = Player::new(Vec2::new(0.0, 500.0), (32.0, 32.0), &Tuning::default());
        let solids = [floor_at(532.0)];
        let platforms: [MovingPlatform; 0] = [];
        let mut clock = SimClock::new();
        let mut events = Events::new();
        let anims = test_anims();

        // Airborne: holding jump does nothing
        let jump = InputSnapshot {
            jump: true,
            ..Default::default()
        };
        player.update(0.05, &clock, &jump, &solids, &platforms, &mut events, &anims);
        assert!(player.body.dir.y >= 0.0);

        // Land, then jump
        for _ in 0..20 {
            clock.advance(0.05);
            player.update(
                0.05,
                &clock,
                &idle_input(),
                &solids,
                &platforms,
                &mut events,
                &anims,
            );
            if player.on_floor {
                break;
            }
        }
        assert!(player.on_floor);

        player.update(0.05, &clock, &jump, &solids, &platforms, &mut events, &anims);
        assert!(player.body.dir.y < 0.0);
        assert!(!player.on_floor);

        // Status derives before movement, so the pose reads Jump from the
        // next frame on
        player.update(
            0.05,
            &clock,
            &idle_input(),
            &solids,
            &platforms,
            &mut events,
            &anims,
        );
        assert_eq!(player.status.pose, Pose::Jump);
    }

    #[test]
    fn test_fire_cooldown_allows_one_shot() {
        let mut player = Player::new(Vec2::new(0.0, 500.0), (32.0, 32.0), &Tuning::default());
        let solids = [floor_at(532.0)];
        let platforms: [MovingPlatform; 0] = [];
        let mut clock = SimClock::new();
        let mut events = Events::new();
        let anims = test_anims();

        let fire = InputSnapshot {
            fire: true,
            ..Default::default()
        };
        player.update(0.05, &clock, &fire, &solids, &platforms, &mut events, &anims);
        clock.advance(0.1);
        player.update(0.05, &clock, &fire, &solids, &platforms, &mut events, &anims);

        // Two trigger pulls inside the 200ms cooldown spawn one shot
        assert_eq!(events.shoot.len(), 1);

        clock.advance(0.2);
        player.update(0.05, &clock, &fire, &solids, &platforms, &mut events, &anims);
        assert_eq!(events.shoot.len(), 2);
    }

    #[test]
    fn test_shot_spawns_ahead_of_facing() {
        let mut player = Player::new(Vec2::new(100.0, 500.0), (32.0, 32.0), &Tuning::default());
        let solids = [floor_at(532.0)];
        let platforms: [MovingPlatform; 0] = [];
        let clock = SimClock::new();
        let mut events = Events::new();
        let anims = test_anims();

        let fire_left = InputSnapshot {
            left: true,
            fire: true,
            ..Default::default()
        };
        player.update(
            0.05,
            &clock,
            &fire_left,
            &solids,
            &platforms,
            &mut events,
            &anims,
        );

        let shot = events.shoot.iter().next().unwrap();
        assert_eq!(shot.direction, Vec2::new(-1.0, 0.0));
        assert!(shot.pos.x < player.center().x);
    }

    #[test]
    fn test_duck_roots_grounded_player() {
        let mut player = Player::new(Vec2::new(0.0, 500.0), (32.0, 32.0), &Tuning::default());
        let solids = [floor_at(532.0)];
        let platforms: [MovingPlatform; 0] = [];
        let mut clock = SimClock::new();
        let mut events = Events::new();
        let anims = test_anims();

        // Settle on the floor first
        for _ in 0..10 {
            clock.advance(0.05);
            player.update(
                0.05,
                &clock,
                &idle_input(),
                &solids,
                &platforms,
                &mut events,
                &anims,
            );
        }
        assert!(player.on_floor);
        let x0 = player.body.pos.x;

        let duck_right = InputSnapshot {
            right: true,
            duck: true,
            ..Default::default()
        };
        player.update(
            0.05,
            &clock,
            &duck_right,
            &solids,
            &platforms,
            &mut events,
            &anims,
        );

        assert_eq!(player.body.pos.x, x0);
        assert_eq!(player.status.pose, Pose::Duck);
    }

    #[test]
    fn test_idle_pose_when_grounded_and_still() {
        let mut player = Player::new(Vec2::new(0.0, 500.0), (32.0, 32.0), &Tuning::default());
        let solids = [floor_at(532.0)];
        let platforms: [MovingPlatform; 0] = [];
        let mut clock = SimClock::new();
        let mut events = Events::new();
        let anims = test_anims();

        for _ in 0..10 {
            clock.advance(0.05);
            player.update(
                0.05,
                &clock,
                &idle_input(),
                &solids,
                &platforms,
                &mut events,
                &anims,
            );
        }
        assert!(player.on_floor);
        assert_eq!(player.status.pose, Pose::Idle);
    }
}
