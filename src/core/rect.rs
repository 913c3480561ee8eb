//! Axis-Aligned Rectangles
//!
//! Shared shape for actors, obstacles and gateways.

use serde::{Serialize, Deserialize};

use super::vec2::Vec2;

/// Axis-aligned rectangle in world units.
///
/// `width` and `height` are always positive when built through [`Rect::new`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width (> 0)
    pub width: f32,
    /// Height (> 0)
    pub height: f32,
}

impl Rect {
    /// Create a rectangle, rejecting non-positive extents.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Option<Self> {
        if width > 0.0 && height > 0.0 {
            Some(Self { x, y, width, height })
        } else {
            None
        }
    }

    /// Top-left corner.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Centre point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Copy of this rectangle moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// Move this rectangle in place.
    #[inline]
    pub fn translate(&mut self, offset: Vec2) {
        self.x += offset.x;
        self.y += offset.y;
    }

    /// Inclusive AABB overlap: touching edges count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x + self.width >= other.x
            && self.x <= other.x + other.width
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }
}
