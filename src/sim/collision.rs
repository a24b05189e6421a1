//! Axis-aligned collision geometry
//!
//! All collision in the game is rectangle against rectangle. Rotation and
//! scale are cosmetic and never reach this module.

use glam::Vec2;

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Box with its top-left corner at `origin`
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            left: origin.x,
            right: origin.x + size.x,
            top: origin.y,
            bottom: origin.y + size.y,
        }
    }

    /// Overlap test; touching edges count as overlapping
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }
}

/// Clamp a box origin so a box of `size` stays inside `[0, extent]`
pub fn clamp_origin(origin: Vec2, size: Vec2, extent: Vec2) -> Vec2 {
    let max = (extent - size).max(Vec2::ZERO);
    origin.clamp(Vec2::ZERO, max)
}

/// Which arena walls a box is touching or past
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Wall test used for enemy bounces (non-strict on both sides)
pub fn wall_contact(bounds: &Aabb, extent: Vec2) -> WallContact {
    WallContact {
        horizontal: bounds.left <= 0.0 || bounds.right >= extent.x,
        vertical: bounds.top <= 0.0 || bounds.bottom >= extent.y,
    }
}
