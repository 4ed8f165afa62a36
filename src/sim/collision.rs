//! Collision tests for circle-shaped entities
//!
//! Every gameplay contact (zombie vs player, bullet vs zombie, pickup vs
//! player) is a plain radius overlap. Tangent circles do not overlap.

use glam::Vec2;

/// Axis-aligned rectangle in map coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle from the origin to `size`
    pub fn from_size(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    /// Shrink every edge inward by `margin`
    ///
    /// Collapses to the centre rather than inverting when the margin is
    /// larger than half the rectangle.
    pub fn inset(&self, margin: f32) -> Self {
        let center = (self.min + self.max) * 0.5;
        let min = (self.min + Vec2::splat(margin)).min(center);
        let max = (self.max - Vec2::splat(margin)).max(center);
        Self { min, max }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Clamp a point into the rectangle
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// True iff two circles overlap (strictly closer than the sum of radii)
#[inline]
pub fn circles_overlap(a: Vec2, ar: f32, b: Vec2, br: f32) -> bool {
    a.distance(b) < ar + br
}

/// Clamp a point so a circle of `radius` stays inside `bounds`
pub fn clamp_to_rect(p: Vec2, radius: f32, bounds: &Rect) -> Vec2 {
    bounds.inset(radius).clamp(p)
}
