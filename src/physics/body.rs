//! Axis-aligned boxes and moving bodies.
//!
//! World space is screen space: +x to the right, +y downward. A box's
//! position is its top-left corner.

use bevy::math::Vec2;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Horizontal extents overlap.
    pub fn spans_x(&self, other: &Aabb) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Vertical extents overlap.
    pub fn spans_y(&self, other: &Aabb) -> bool {
        self.bottom() > other.top() && self.top() < other.bottom()
    }
}

/// A box that moves under its own velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub bounds: Aabb,
    pub vel: Vec2,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            bounds: Aabb::new(x, y, w, h),
            vel: Vec2::ZERO,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.bounds.pos
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn bottom(&self) -> f32 {
        self.bounds.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Aabb::new(9.0, 9.0, 10.0, 10.0)));
    }

    #[test]
    fn center_is_midpoint() {
        let a = Aabb::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(a.center(), Vec2::new(25.0, 40.0));
        assert_eq!(a.bottom(), 60.0);
    }
}
