//! Axis-aligned rectangle used for collision resolution.
//!
//! Stored in pixel space with the origin at the top-left corner and `y`
//! growing downwards, so `bottom()` is the larger y edge.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: size.x,
            h: size.y,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Move the rectangle so its left edge sits at `x`.
    pub fn set_left(&mut self, x: f32) {
        self.x = x;
    }

    /// Move the rectangle so its right edge sits at `x`.
    pub fn set_right(&mut self, x: f32) {
        self.x = x - self.w;
    }

    pub fn set_top(&mut self, y: f32) {
        self.y = y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.y = y - self.h;
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
