//! Game world and the per-frame step
//!
//! The world is the central container for all simulated state: the player,
//! enemies, bullets, muzzle flashes, platforms and tiles. `step` drives one
//! frame in a fixed phase order:
//!
//! 1. Platform adjustments (borders, player push)
//! 2. Entity advance against a frozen snapshot of the solids
//! 3. Bullet-vs-obstacle removal (bounding box)
//! 4. Bullet-vs-damageable removal + damage (pixel mask)
//!
//! Spawns and removals inside a phase never invalidate the iteration of
//! that phase: shots queue as events and materialize between phases, kills
//! mark health and compact afterwards.

use macroquad::math::Vec2;

use crate::level::{Layer, LevelData, SpawnKind};
use crate::settings::TILE_SIZE;

use super::body::Obstacle;
use super::bullet::{Bullet, FireAnimation};
use super::clock::SimClock;
use super::enemy::Enemy;
use super::event::{ActorRef, Events, HitEvent, ShootEvent};
use super::frames::{Facing, FrameCatalog, Pose, Status};
use super::platform::MovingPlatform;
use super::player::Player;
use super::rect::Rect;
use super::InputSnapshot;

/// Simulation outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimStatus {
    Running,
    /// The player died. Terminal: callers decide what to show next.
    GameOver,
}

/// A static solid tile
#[derive(Debug, Clone)]
struct CollisionTile {
    rect: Rect,
    image: u16,
}

/// A draw-only tile on one of the decoration layers
#[derive(Debug, Clone)]
struct DecorTile {
    rect: Rect,
    image: u16,
    layer: Layer,
}

/// What to draw for one world object
#[derive(Debug, Clone, Copy)]
pub enum DrawKind {
    Tile { image: u16 },
    Platform { image: u16 },
    Player { status: Status, frame: usize, blink: bool },
    Enemy { status: Status, frame: usize, blink: bool },
    Bullet { flip: bool },
    Fire { frame: usize, flip: bool },
}

/// One drawable world object, consumed unordered by the render layer and
/// sorted back-to-front by layer there
#[derive(Debug, Clone, Copy)]
pub struct Drawable {
    pub rect: Rect,
    pub layer: Layer,
    pub kind: DrawKind,
}

/// The game world. Owns every simulated object; collaborators only see
/// drawables, events and the player's health.
pub struct GameWorld {
    clock: SimClock,
    events: Events,
    player: Player,
    enemies: Vec<Enemy>,
    bullets: Vec<Bullet>,
    fire_animations: Vec<FireAnimation>,
    platforms: Vec<MovingPlatform>,
    tiles: Vec<CollisionTile>,
    decor: Vec<DecorTile>,
    borders: Vec<Rect>,
    /// Interned tile/platform image names, indexed by the u16 in `DrawKind`
    images: Vec<String>,
    catalog: FrameCatalog,
}

fn intern(images: &mut Vec<String>, name: &str) -> u16 {
    if let Some(index) = images.iter().position(|n| n == name) {
        return index as u16;
    }
    images.push(name.to_string());
    (images.len() - 1) as u16
}

impl GameWorld {
    /// Build a world from a validated level description and the decoded
    /// sprite metadata.
    pub fn new(level: &LevelData, catalog: FrameCatalog) -> Self {
        let tuning = level.tuning;
        let mut images = Vec::new();

        let mut tiles = Vec::new();
        let mut decor = Vec::new();
        for record in &level.tiles {
            let rect = Rect::new(record.pos.0, record.pos.1, TILE_SIZE, TILE_SIZE);
            let image = intern(&mut images, &record.image);
            if record.layer == Layer::Level {
                tiles.push(CollisionTile { rect, image });
            } else {
                decor.push(DecorTile {
                    rect,
                    image,
                    layer: record.layer,
                });
            }
        }

        let platforms: Vec<MovingPlatform> = level
            .platforms
            .iter()
            .map(|record| {
                let image = intern(&mut images, &record.image);
                MovingPlatform::new(
                    Vec2::new(record.pos.0, record.pos.1),
                    catalog.platform_size,
                    tuning.platform_speed,
                    image,
                )
            })
            .collect();

        let borders = level
            .borders
            .iter()
            .map(|b| Rect::new(b.pos.0, b.pos.1, b.size.0, b.size.1))
            .collect();

        let tile_solids: Vec<Obstacle> = tiles.iter().map(|t| Obstacle::fixed(t.rect)).collect();
        let player_size = catalog
            .player
            .frames(Status::new(Facing::Right, Pose::Run))
            .size;
        let enemy_size = catalog
            .enemy
            .frames(Status::new(Facing::Right, Pose::Run))
            .size;

        let mut player = None;
        let mut enemies = Vec::new();
        let mut next_enemy_id = 0u32;
        for spawn in &level.spawns {
            let pos = Vec2::new(spawn.pos.0, spawn.pos.1);
            match spawn.kind {
                SpawnKind::Player => {
                    player = Some(Player::new(pos, player_size, &tuning));
                }
                SpawnKind::Enemy => {
                    let mut enemy = Enemy::new(next_enemy_id, pos, enemy_size, &tuning);
                    next_enemy_id += 1;
                    enemy.settle(&tile_solids);
                    enemies.push(enemy);
                }
            }
        }
        // The loader guarantees exactly one player spawn
        let player = player.unwrap_or_else(|| Player::new(Vec2::ZERO, player_size, &tuning));

        Self {
            clock: SimClock::new(),
            events: Events::new(),
            player,
            enemies,
            bullets: Vec::new(),
            fire_animations: Vec::new(),
            platforms,
            tiles,
            decor,
            borders,
            images,
            catalog,
        }
    }

    /// Advance the simulation by one frame
    pub fn step(&mut self, dt: f32, input: &InputSnapshot) -> SimStatus {
        self.events.clear_all();
        self.clock.advance(dt);

        self.platform_collisions();

        // Entity advance, against a frozen snapshot of the solids
        let solids = self.solids();
        self.player.update(
            dt,
            &self.clock,
            input,
            &solids,
            &self.platforms,
            &mut self.events,
            &self.catalog.player,
        );

        let player_center = self.player.center();
        for enemy in self.enemies.iter_mut() {
            enemy.update(
                dt,
                &self.clock,
                player_center,
                &mut self.events,
                &self.catalog.enemy,
            );
        }

        for platform in self.platforms.iter_mut() {
            platform.update(dt);
        }

        let clock = self.clock;
        self.bullets.retain_mut(|bullet| bullet.update(dt, &clock));

        let enemies = &self.enemies;
        self.fire_animations.retain_mut(|fire| {
            let owner_center = match fire.owner {
                ActorRef::Player => Some(player_center),
                ActorRef::Enemy(id) => enemies.iter().find(|e| e.id == id).map(|e| e.center()),
            };
            fire.update(dt, owner_center)
        });

        // Queued shots materialize between phases: a fresh bullet never
        // moves on its spawn frame but is live for this frame's collisions
        let shots: Vec<ShootEvent> = self.events.shoot.iter().copied().collect();
        for shot in shots {
            self.spawn_shot(shot);
        }

        // Bullet vs solid obstacle: any box overlap removes the bullet
        let solids = self.solids();
        self.bullets
            .retain(|bullet| !solids.iter().any(|s| s.rect.overlaps(&bullet.rect)));

        self.bullet_hits();

        self.enemies.retain(|enemy| !enemy.vitals.is_dead());

        if self.player.vitals.is_dead() {
            SimStatus::GameOver
        } else {
            SimStatus::Running
        }
    }

    /// Events raised by the last step, readable until the next one
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn player_health(&self) -> i32 {
        self.player.vitals.health
    }

    /// Camera anchor
    pub fn player_center(&self) -> Vec2 {
        self.player.center()
    }

    /// Interned image names referenced by tile/platform drawables
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Everything to draw this frame, unordered
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut out = Vec::with_capacity(
            self.tiles.len()
                + self.decor.len()
                + self.platforms.len()
                + self.enemies.len()
                + self.bullets.len()
                + self.fire_animations.len()
                + 1,
        );

        for tile in &self.decor {
            out.push(Drawable {
                rect: tile.rect,
                layer: tile.layer,
                kind: DrawKind::Tile { image: tile.image },
            });
        }
        for tile in &self.tiles {
            out.push(Drawable {
                rect: tile.rect,
                layer: Layer::Level,
                kind: DrawKind::Tile { image: tile.image },
            });
        }
        for platform in &self.platforms {
            out.push(Drawable {
                rect: platform.rect,
                layer: Layer::Level,
                kind: DrawKind::Platform {
                    image: platform.image,
                },
            });
        }
        out.push(Drawable {
            rect: self.player.body.rect,
            layer: Layer::Level,
            kind: DrawKind::Player {
                status: self.player.status,
                frame: self.player.frame(),
                blink: self.player.vitals.blink(&self.clock),
            },
        });
        for enemy in &self.enemies {
            out.push(Drawable {
                rect: enemy.body.rect,
                layer: Layer::Level,
                kind: DrawKind::Enemy {
                    status: enemy.status(),
                    frame: enemy.frame(),
                    blink: enemy.vitals.blink(&self.clock),
                },
            });
        }
        for bullet in &self.bullets {
            out.push(Drawable {
                rect: bullet.rect,
                layer: Layer::Level,
                kind: DrawKind::Bullet { flip: bullet.flip },
            });
        }
        for fire in &self.fire_animations {
            out.push(Drawable {
                rect: fire.rect,
                layer: Layer::Level,
                kind: DrawKind::Fire {
                    frame: fire.frame(),
                    flip: fire.flip,
                },
            });
        }
        out
    }

    /// Platform-vs-border and platform-vs-player adjustments, before
    /// anything moves this frame
    fn platform_collisions(&mut self) {
        let player_rect = self.player.body.rect;
        for platform in self.platforms.iter_mut() {
            for border in &self.borders {
                if platform.rect.overlaps(border) {
                    platform.bounce_off(border);
                }
            }
            // Standing into a platform from above pushes it under our feet
            if platform.rect.overlaps(&player_rect)
                && player_rect.center_y() > platform.rect.center_y()
            {
                platform.push_above(&player_rect);
            }
        }
    }

    fn solids(&self) -> Vec<Obstacle> {
        let mut solids: Vec<Obstacle> =
            self.tiles.iter().map(|t| Obstacle::fixed(t.rect)).collect();
        solids.extend(
            self.platforms
                .iter()
                .enumerate()
                .map(|(index, p)| p.obstacle(index)),
        );
        solids
    }

    fn spawn_shot(&mut self, shot: ShootEvent) {
        let clock = self.clock;
        self.bullets.push(Bullet::spawn(
            shot.pos,
            shot.direction,
            self.catalog.bullet.size,
            &clock,
        ));
        let owner_center = match shot.shooter {
            ActorRef::Player => Some(self.player.center()),
            ActorRef::Enemy(id) => self
                .enemies
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.center()),
        };
        if let Some(center) = owner_center {
            self.fire_animations.push(FireAnimation::spawn(
                shot.shooter,
                center,
                shot.direction,
                shot.ducked,
                &self.catalog.fire,
            ));
        }
    }

    /// Bullet-vs-damageable resolution, pixel-mask accurate. A bullet is
    /// consumed by the first target it resolves against; several bullets
    /// landing on one target in the same frame still damage it once,
    /// because the first hit closes the vulnerability window.
    fn bullet_hits(&mut self) {
        let clock = self.clock;

        let frames = self.catalog.player.frames(self.player.status);
        let mask = frames.mask(self.player.frame());
        let rect = self.player.body.rect;
        let catalog = &self.catalog;
        let mut hit = false;
        self.bullets.retain(|bullet| {
            let overlap = catalog.bullet.mask(bullet.flip).overlaps(
                (bullet.rect.x, bullet.rect.y),
                mask,
                (rect.x, rect.y),
            );
            hit |= overlap;
            !overlap
        });
        if hit && self.player.vitals.damage(&clock) {
            self.events.hit.send(HitEvent {
                pos: self.player.center(),
            });
        }

        for enemy in self.enemies.iter_mut() {
            let frames = self.catalog.enemy.frames(enemy.status());
            let mask = frames.mask(enemy.frame());
            let rect = enemy.body.rect;
            let catalog = &self.catalog;
            let mut hit = false;
            self.bullets.retain(|bullet| {
                let overlap = catalog.bullet.mask(bullet.flip).overlaps(
                    (bullet.rect.x, bullet.rect.y),
                    mask,
                    (rect.x, rect.y),
                );
                hit |= overlap;
                !overlap
            });
            if hit && enemy.vitals.damage(&clock) {
                self.events.hit.send(HitEvent {
                    pos: enemy.center(),
                });
            }
        }
    }
}
