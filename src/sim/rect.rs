//! Axis-aligned rectangle geometry
//!
//! Every entity occupies a `Rect`: min corner plus size. The play field is the
//! rectangle from the origin to the viewport dimensions.

use glam::Vec2;

/// An axis-aligned rectangle (min corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner (screen coordinates, y grows downward)
    pub pos: Vec2,
    /// Width and height, both positive
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Shrink symmetrically so only the central `keep_ratio` of each dimension
    /// remains. `keep_ratio` of 1.0 is the identity; 0.6 keeps the middle 60%.
    pub fn shrink_to(&self, keep_ratio: f32) -> Self {
        let margin = self.size * (1.0 - keep_ratio) / 2.0;
        Self {
            pos: self.pos + margin,
            size: self.size - margin * 2.0,
        }
    }
}
