//! Vertically oscillating platforms
//!
//! Platforms travel straight up or down at constant speed and reverse when
//! they cross one of the level's border regions. The world also pushes a
//! platform above the player when the player stands into it from above;
//! both adjustments snap the platform flush to the contact edge, so there
//! is never an overshoot frame.

use macroquad::math::Vec2;

use super::body::Obstacle;
use super::rect::Rect;

/// A ridable solid that oscillates between border regions
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    /// Continuous top-left position
    pub pos: Vec2,
    pub rect: Rect,
    pub old_rect: Rect,
    /// +1 moving down, -1 moving up
    pub dir_y: f32,
    pub speed: f32,
    /// Index into the interned image table, for drawing
    pub image: u16,
}

impl MovingPlatform {
    pub fn new(pos: Vec2, size: (f32, f32), speed: f32, image: u16) -> Self {
        let rect = Rect::new(pos.x.round(), pos.y.round(), size.0, size.1);
        Self {
            pos,
            rect,
            old_rect: rect,
            dir_y: -1.0,
            speed,
            image,
        }
    }

    /// Advance along the oscillation axis
    pub fn update(&mut self, dt: f32) {
        self.old_rect = self.rect;
        self.pos.y += self.dir_y * self.speed * dt;
        self.rect.x = self.pos.x.round();
        self.rect.y = self.pos.y.round();
    }

    /// Border reversal: snap flush to the border edge and flip direction
    pub fn bounce_off(&mut self, border: &Rect) {
        if self.dir_y < 0.0 {
            self.rect.set_top(border.bottom());
            self.dir_y = 1.0;
        } else {
            self.rect.set_bottom(border.top());
            self.dir_y = -1.0;
        }
        self.pos.y = self.rect.y;
    }

    /// A player standing into the platform from above pushes it flush under
    /// their feet and forces it upward
    pub fn push_above(&mut self, player_rect: &Rect) {
        self.rect.set_bottom(player_rect.top());
        self.pos.y = self.rect.y;
        self.dir_y = -1.0;
    }

    /// Frame-snapshot view for collision resolution
    pub fn obstacle(&self, index: usize) -> Obstacle {
        Obstacle {
            rect: self.rect,
            old_rect: self.old_rect,
            platform: Some(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_up_by_default() {
        let mut platform = MovingPlatform::new(Vec2::new(0.0, 400.0), (128.0, 32.0), 200.0, 0);
        platform.update(0.1);
        assert_eq!(platform.rect.y, 380.0);
        assert_eq!(platform.old_rect.y, 400.0);
    }

    #[test]
    fn test_reverses_at_top_border_without_overshoot() {
        let mut platform = MovingPlatform::new(Vec2::new(0.0, 200.0), (128.0, 32.0), 200.0, 0);
        let border = Rect::new(0.0, 100.0, 128.0, 96.0);

        // Carry the platform into the border
        platform.update(0.1);
        assert!(platform.rect.overlaps(&border));

        platform.bounce_off(&border);
        assert_eq!(platform.rect.top(), border.bottom());
        assert_eq!(platform.dir_y, 1.0);
    }

    #[test]
    fn test_reverses_at_bottom_border() {
        let mut platform = MovingPlatform::new(Vec2::new(0.0, 400.0), (128.0, 32.0), 200.0, 0);
        platform.dir_y = 1.0;
        let border = Rect::new(0.0, 440.0, 128.0, 64.0);

        platform.update(0.1);
        assert!(platform.rect.overlaps(&border));

        platform.bounce_off(&border);
        assert_eq!(platform.rect.bottom(), border.top());
        assert_eq!(platform.dir_y, -1.0);
    }

    #[test]
    fn test_player_push_forces_upward() {
        let mut platform = MovingPlatform::new(Vec2::new(0.0, 400.0), (128.0, 32.0), 200.0, 0);
        platform.dir_y = 1.0;
        let player = Rect::new(32.0, 410.0, 32.0, 48.0);

        platform.push_above(&player);
        assert_eq!(platform.rect.bottom(), 410.0);
        assert_eq!(platform.dir_y, -1.0);
    }
}
