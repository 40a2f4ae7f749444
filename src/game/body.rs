//! Moving bodies and collision resolution
//!
//! Axis-separated swept AABB resolution: horizontal displacement resolves
//! first, the position re-syncs, then vertical resolves. Keeping the axes
//! independent prevents diagonal tunneling. The penetration side is decided
//! by comparing the previous-frame rects of both parties, not the velocity
//! sign, so a box that crossed an edge this frame is pushed back to exactly
//! that edge.

use macroquad::math::Vec2;

use super::rect::Rect;

/// Height of the floor-contact sensor under a body's feet
const PROBE_HEIGHT: f32 = 5.0;

/// A solid the body can collide with, snapshotted for one frame
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub rect: Rect,
    pub old_rect: Rect,
    /// Set when the solid is a moving platform (index into the platform list)
    pub platform: Option<usize>,
}

impl Obstacle {
    /// A static solid: previous rect equals the current one
    pub fn fixed(rect: Rect) -> Self {
        Self {
            rect,
            old_rect: rect,
            platform: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Outcome of one axis resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisHit {
    /// Bottom edge was clamped onto a solid's top (vertical axis only)
    pub landed: bool,
}

/// Position/velocity state with a previous-frame box for swept resolution.
///
/// `pos` is the continuous top-left position; `rect` is `pos` rounded to
/// whole pixels. `dir.x` carries the input direction (-1/0/+1, scaled by
/// `speed`), `dir.y` the vertical velocity in units per second.
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub rect: Rect,
    pub old_rect: Rect,
}

impl Body {
    pub fn new(pos: Vec2, size: (f32, f32), speed: f32) -> Self {
        let rect = Rect::new(pos.x.round(), pos.y.round(), size.0, size.1);
        Self {
            pos,
            dir: Vec2::ZERO,
            speed,
            rect,
            old_rect: rect,
        }
    }

    /// Remember the current box before this frame's movement
    pub fn snapshot(&mut self) {
        self.old_rect = self.rect;
    }

    pub fn sync_x(&mut self) {
        self.rect.x = self.pos.x.round();
    }

    pub fn sync_y(&mut self) {
        self.rect.y = self.pos.y.round();
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.rect.center_x(), self.rect.center_y())
    }

    /// Resolve overlaps along one axis against every solid.
    ///
    /// Any vertical clamp zeroes the vertical velocity; landing on a top
    /// edge is reported so controllers can set their floor flag.
    pub fn resolve_axis(&mut self, axis: Axis, solids: &[Obstacle]) -> AxisHit {
        let mut hit = AxisHit::default();
        for solid in solids {
            if !self.rect.overlaps(&solid.rect) {
                continue;
            }
            match axis {
                Axis::Horizontal => {
                    // Entering from the left
                    if self.rect.right() >= solid.rect.left()
                        && self.old_rect.right() <= solid.old_rect.left()
                    {
                        self.rect.set_right(solid.rect.left());
                    }
                    // Entering from the right
                    if self.rect.left() <= solid.rect.right()
                        && self.old_rect.left() >= solid.old_rect.right()
                    {
                        self.rect.set_left(solid.rect.right());
                    }
                    self.pos.x = self.rect.x;
                }
                Axis::Vertical => {
                    // Falling onto the top edge
                    if self.rect.bottom() >= solid.rect.top()
                        && self.old_rect.bottom() <= solid.old_rect.top()
                    {
                        self.rect.set_bottom(solid.rect.top());
                        hit.landed = true;
                    }
                    // Rising into the bottom edge
                    if self.rect.top() <= solid.rect.bottom()
                        && self.old_rect.top() >= solid.old_rect.bottom()
                    {
                        self.rect.set_top(solid.rect.bottom());
                    }
                    self.pos.y = self.rect.y;
                    self.dir.y = 0.0;
                }
            }
        }
        hit
    }

    /// Thin sensor under the feet for standing detection. Checked against
    /// solids each frame without affecting resolution.
    pub fn floor_probe(&self) -> Rect {
        Rect::new(self.rect.x, self.rect.bottom(), self.rect.w, PROBE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle::fixed(Rect::new(x, y, w, h))
    }

    #[test]
    fn test_horizontal_stop_at_obstacle_edge() {
        let mut body = Body::new(Vec2::new(0.0, 0.0), (32.0, 32.0), 400.0);
        let solids = [wall(100.0, 0.0, 64.0, 64.0)];

        // Move right far enough to penetrate the wall in one frame
        body.snapshot();
        body.dir.x = 1.0;
        body.pos.x += body.dir.x * body.speed * 0.25;
        body.sync_x();
        body.resolve_axis(Axis::Horizontal, &solids);

        assert_eq!(body.rect.right(), 100.0);
        assert_eq!(body.pos.x, 68.0);
        // Vertical position untouched that frame
        assert_eq!(body.rect.y, 0.0);
    }

    #[test]
    fn test_horizontal_stop_from_the_right() {
        let mut body = Body::new(Vec2::new(200.0, 0.0), (32.0, 32.0), 400.0);
        let solids = [wall(100.0, 0.0, 64.0, 64.0)];

        body.snapshot();
        body.dir.x = -1.0;
        body.pos.x += body.dir.x * body.speed * 0.25;
        body.sync_x();
        body.resolve_axis(Axis::Horizontal, &solids);

        assert_eq!(body.rect.left(), 164.0);
    }

    #[test]
    fn test_vertical_landing_zeroes_velocity() {
        let mut body = Body::new(Vec2::new(0.0, 500.0), (32.0, 32.0), 400.0);
        let solids = [wall(0.0, 532.0, 64.0, 64.0)];

        body.snapshot();
        body.dir.y = 300.0;
        body.pos.y += body.dir.y * 0.1;
        body.sync_y();
        let hit = body.resolve_axis(Axis::Vertical, &solids);

        assert!(hit.landed);
        assert_eq!(body.rect.bottom(), 532.0);
        assert_eq!(body.dir.y, 0.0);
    }

    #[test]
    fn test_rising_into_ceiling() {
        let mut body = Body::new(Vec2::new(0.0, 100.0), (32.0, 32.0), 400.0);
        let solids = [wall(0.0, 0.0, 64.0, 64.0)];

        body.snapshot();
        body.dir.y = -600.0;
        body.pos.y += body.dir.y * 0.1;
        body.sync_y();
        let hit = body.resolve_axis(Axis::Vertical, &solids);

        assert!(!hit.landed);
        assert_eq!(body.rect.top(), 64.0);
        assert_eq!(body.dir.y, 0.0);
    }

    #[test]
    fn test_no_resolution_without_overlap() {
        let mut body = Body::new(Vec2::new(0.0, 0.0), (32.0, 32.0), 400.0);
        let solids = [wall(100.0, 0.0, 64.0, 64.0)];

        body.snapshot();
        body.pos.x += 10.0;
        body.sync_x();
        body.resolve_axis(Axis::Horizontal, &solids);

        assert_eq!(body.rect.x, 10.0);
    }

    #[test]
    fn test_floor_probe_geometry() {
        let body = Body::new(Vec2::new(10.0, 20.0), (32.0, 48.0), 400.0);
        let probe = body.floor_probe();
        assert_eq!(probe.x, 10.0);
        assert_eq!(probe.y, 68.0);
        assert_eq!(probe.w, 32.0);
        assert_eq!(probe.h, 5.0);
    }

    #[test]
    fn test_probe_overlaps_floor_when_standing() {
        let mut body = Body::new(Vec2::new(0.0, 500.0), (32.0, 32.0), 400.0);
        let floor = wall(0.0, 532.0, 64.0, 64.0);

        body.snapshot();
        body.dir.y = 300.0;
        body.pos.y += body.dir.y * 0.1;
        body.sync_y();
        body.resolve_axis(Axis::Vertical, &[floor]);

        assert!(body.floor_probe().overlaps(&floor.rect));
    }
}
