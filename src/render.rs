//! Rendering
//!
//! Consumes the world's unordered drawables and paints them back-to-front
//! by layer with a player-centered camera, behind two parallax sky strips.
//! Sprites draw centered on their collision rect, so frames of different
//! sizes stay visually anchored.

use std::collections::HashMap;

use macroquad::prelude::*;

use crate::assets::{AssetBank, FrameTex};
use crate::game::{DrawKind, Drawable, GameWorld, Status};
use crate::level::LevelData;
use crate::settings::{TILE_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};

/// Backdrop fill behind the sky strips
const CLEAR_COLOR: Color = Color::new(0.976, 0.514, 0.404, 1.0);

/// Vertical anchor of the sky strips in world space
const SKY_BASE_Y: f32 = 900.0;

pub struct Renderer {
    /// Tile/platform textures aligned with the world's interned image table
    tile_textures: Vec<Option<Texture2D>>,
    sky_count: usize,
    sky_width: f32,
}

impl Renderer {
    pub fn new(level: &LevelData, world: &GameWorld, assets: &AssetBank) -> Self {
        let tile_textures = world
            .images()
            .iter()
            .map(|name| assets.tile_images.get(name).cloned())
            .collect();

        // Tile the sky across the level plus half a window on both sides
        let padding = WINDOW_WIDTH as f32 / 2.0;
        let sky_width = assets.sky_bg.width().max(1.0);
        let map_width = level.width(TILE_SIZE) + 2.0 * padding;
        Self {
            tile_textures,
            sky_count: (map_width / sky_width) as usize,
            sky_width,
        }
    }

    pub fn draw(&self, world: &GameWorld, assets: &AssetBank) {
        clear_background(CLEAR_COLOR);

        let offset = world.player_center()
            - Vec2::new(WINDOW_WIDTH as f32 / 2.0, WINDOW_HEIGHT as f32 / 2.0);

        let padding = WINDOW_WIDTH as f32 / 2.0;
        for i in 0..self.sky_count {
            let x = -padding + i as f32 * self.sky_width;
            draw_texture(
                &assets.sky_bg,
                x - offset.x / 2.5,
                SKY_BASE_Y - offset.y / 2.5,
                WHITE,
            );
            draw_texture(
                &assets.sky_fg,
                x - offset.x / 2.0,
                SKY_BASE_Y - offset.y / 2.0,
                WHITE,
            );
        }

        let mut drawables = world.drawables();
        drawables.sort_by_key(|d| d.layer.z());
        for drawable in &drawables {
            self.draw_one(drawable, offset, assets);
        }
    }

    fn draw_one(&self, drawable: &Drawable, offset: Vec2, assets: &AssetBank) {
        let center = Vec2::new(drawable.rect.center_x(), drawable.rect.center_y()) - offset;
        match drawable.kind {
            DrawKind::Tile { image } | DrawKind::Platform { image } => {
                if let Some(Some(texture)) = self.tile_textures.get(image as usize) {
                    draw_centered(texture, center, false);
                }
            }
            DrawKind::Player {
                status,
                frame,
                blink,
            } => draw_actor(&assets.player, status, frame, blink, center),
            DrawKind::Enemy {
                status,
                frame,
                blink,
            } => draw_actor(&assets.enemy, status, frame, blink, center),
            DrawKind::Bullet { flip } => draw_centered(&assets.bullet, center, flip),
            DrawKind::Fire { frame, flip } => {
                if let Some(texture) = assets.fire.get(frame).or_else(|| assets.fire.last()) {
                    draw_centered(texture, center, flip);
                }
            }
        }
    }
}

fn draw_actor(
    set: &HashMap<Status, Vec<FrameTex>>,
    status: Status,
    frame: usize,
    blink: bool,
    center: Vec2,
) {
    let Some(frames) = set.get(&status) else {
        return;
    };
    let Some(frame_tex) = frames.get(frame).or_else(|| frames.last()) else {
        return;
    };
    let texture = if blink {
        &frame_tex.silhouette
    } else {
        &frame_tex.normal
    };
    draw_centered(texture, center, false);
}

fn draw_centered(texture: &Texture2D, center: Vec2, flip_x: bool) {
    draw_texture_ex(
        texture,
        center.x - texture.width() / 2.0,
        center.y - texture.height() / 2.0,
        WHITE,
        DrawTextureParams {
            flip_x,
            ..Default::default()
        },
    );
}
