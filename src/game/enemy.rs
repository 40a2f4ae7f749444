//! Enemy controller
//!
//! Enemies hold their ground, track the player's horizontal position for
//! facing, and fire when the player is close enough, roughly level with
//! them, and the attack cooldown has elapsed.

use macroquad::math::Vec2;

use crate::level::Tuning;

use super::body::{Body, Obstacle};
use super::clock::{Cooldown, SimClock};
use super::damage::Damageable;
use super::event::{ActorRef, Events, ShootEvent};
use super::frames::{AnimationSet, Facing, Pose, Status, ANIM_FPS};

/// Bullet spawn distance ahead of the enemy's center
const MUZZLE_OFFSET_X: f32 = 80.0;

/// Vertical slack around the enemy's extent when checking line of fire
const LINE_OF_FIRE_SLACK: f32 = 20.0;

/// A stationary shooter
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Stable identifier for fire-animation attachment
    pub id: u32,
    pub body: Body,
    pub vitals: Damageable,
    pub facing: Facing,
    range: f32,
    trigger: Cooldown,
    frame_index: f32,
    frame: usize,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, size: (f32, f32), tuning: &Tuning) -> Self {
        Self {
            id,
            body: Body::new(pos, size, 0.0),
            vitals: Damageable::new(tuning.enemy_health),
            facing: Facing::Right,
            range: tuning.enemy_range,
            trigger: Cooldown::new(tuning.enemy_cooldown_ms),
            frame_index: 0.0,
            frame: 0,
        }
    }

    /// Drop the spawn point onto the tile directly underneath it
    pub fn settle(&mut self, solids: &[Obstacle]) {
        for solid in solids {
            if solid.rect.contains(self.body.rect.center_x(), self.body.rect.bottom()) {
                self.body.rect.set_bottom(solid.rect.top());
                self.body.pos.y = self.body.rect.y;
            }
        }
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    pub fn status(&self) -> Status {
        Status::new(self.facing, Pose::Run)
    }

    /// Current animation frame for drawing and mask lookup
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn update(
        &mut self,
        dt: f32,
        clock: &SimClock,
        player_center: Vec2,
        events: &mut Events,
        anims: &AnimationSet,
    ) {
        self.face(player_center);
        self.animate(dt, anims);
        self.vitals.tick(clock);
        self.check_fire(clock, player_center, events);
    }

    fn face(&mut self, player_center: Vec2) {
        self.facing = if player_center.x < self.body.rect.center_x() {
            Facing::Left
        } else {
            Facing::Right
        };
    }

    fn check_fire(&mut self, clock: &SimClock, player_center: Vec2, events: &mut Events) {
        let distance = (player_center - self.center()).length();
        let level_with_us = self.body.rect.top() - LINE_OF_FIRE_SLACK < player_center.y
            && player_center.y < self.body.rect.bottom() + LINE_OF_FIRE_SLACK;

        if distance < self.range && level_with_us && self.trigger.ready(clock) {
            let direction = Vec2::new(self.facing.unit_x(), 0.0);
            events.shoot.send(ShootEvent {
                pos: self.center() + direction * MUZZLE_OFFSET_X + Vec2::new(0.0, -16.0),
                direction,
                shooter: ActorRef::Enemy(self.id),
                ducked: false,
            });
            self.trigger.arm(clock);
        }
    }

    fn animate(&mut self, dt: f32, anims: &AnimationSet) {
        let frames = anims.frames(self.status());
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
        AnimationSet::uniform(48.0, 48.0, 2, &FrameCatalog::enemy_statuses())
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::new(1, Vec2::new(x, y), (48.0, 48.0), &Tuning::default())
    }

    #[test]
    fn test_faces_the_player() {
        let mut enemy = enemy_at(400.0, 100.0);
        let mut events = Events::new();
        let anims = test_anims();
        let clock = SimClock::new();

        enemy.update(0.016, &clock, Vec2::new(0.0, 124.0), &mut events, &anims);
        assert_eq!(enemy.facing, Facing::Left);

        enemy.update(0.016, &clock, Vec2::new(900.0, 124.0), &mut events, &anims);
        assert_eq!(enemy.facing, Facing::Right);
    }

    #[test]
    fn test_fires_when_close_and_level() {
        let mut enemy = enemy_at(400.0, 100.0);
        let mut events = Events::new();
        let anims = test_anims();
        let clock = SimClock::new();

        enemy.update(0.016, &clock, Vec2::new(200.0, 124.0), &mut events, &anims);
        assert_eq!(events.shoot.len(), 1);

        let shot = events.shoot.iter().next().unwrap();
        assert_eq!(shot.direction, Vec2::new(-1.0, 0.0));
        assert_eq!(shot.shooter, ActorRef::Enemy(1));
        // 80 ahead of center, 16 up
        assert_eq!(shot.pos.x, enemy.center().x - 80.0);
        assert_eq!(shot.pos.y, enemy.center().y - 16.0);
    }

    #[test]
    fn test_distance_threshold_is_strict() {
        let mut enemy = enemy_at(400.0, 100.0);
        let mut events = Events::new();
        let anims = test_anims();
        let clock = SimClock::new();

        // 650 away, perfectly level: out of range
        let player = Vec2::new(enemy.center().x - 650.0, enemy.center().y);
        enemy.update(0.016, &clock, player, &mut events, &anims);
        assert!(events.shoot.is_empty());
    }

    #[test]
    fn test_does_not_fire_off_level() {
        let mut enemy = enemy_at(400.0, 100.0);
        let mut events = Events::new();
        let anims = test_anims();
        let clock = SimClock::new();

        // Close but well above the line-of-fire band
        let player = Vec2::new(enemy.center().x - 200.0, enemy.body.rect.top() - 100.0);
        enemy.update(0.016, &clock, player, &mut events, &anims);
        assert!(events.shoot.is_empty());
    }

    #[test]
    fn test_cooldown_limits_fire_rate() {
        let mut enemy = enemy_at(400.0, 100.0);
        let mut events = Events::new();
        let anims = test_anims();
        let mut clock = SimClock::new();
        let player = Vec2::new(200.0, 124.0);

        enemy.update(0.016, &clock, player, &mut events, &anims);
        clock.advance(0.5);
        enemy.update(0.016, &clock, player, &mut events, &anims);
        assert_eq!(events.shoot.len(), 1);

        clock.advance(0.6);
        enemy.update(0.016, &clock, player, &mut events, &anims);
        assert_eq!(events.shoot.len(), 2);
    }

    #[test]
    fn test_settles_onto_tile_below() {
        let mut enemy = enemy_at(100.0, 500.0);
        let solids = [Obstacle::fixed(Rect::new(64.0, 520.0, 128.0, 64.0))];
        enemy.settle(&solids);
        assert_eq!(enemy.body.rect.bottom(), 520.0);
    }
}
