//! On-screen overlay
//!
//! Drawn in screen space after the world, one icon per remaining health
//! point.

use macroquad::prelude::*;

pub fn draw_health(health: i32, icon: &Texture2D) {
    for i in 0..health.max(0) {
        let x = 10.0 + i as f32 * (icon.width() + 4.0);
        draw_texture(icon, x, 10.0, WHITE);
    }
}
