//! Rectangle primitives for glyph layout

use glam::Vec2;

/// An axis-aligned rectangle in layout pixel space
///
/// `position` is the top-left corner, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphFrame {
    /// Top-left corner
    pub position: Vec2,
    /// Size (width, height)
    pub size: Vec2,
}

impl GlyphFrame {
    /// Create a new frame
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Get the bounds as (min, max)
    #[must_use]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.position, self.position + self.size)
    }

    /// Check if a point is inside the frame
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = self.bounds();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Whether the interiors of two frames intersect
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Whether the frame covers no area (e.g. a space glyph)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}
