//! Abstract 2D drawing surface
//!
//! The game only needs a handful of canvas-style primitives. Anything that
//! can fill shapes, draw text and keep a transform stack can host it.

use std::ops::{Deref, DerefMut};

use glam::Vec2;

use crate::color::Color;

/// How a filled shape is colored
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Gradient along the segment `start → end`
    Linear {
        start: Vec2,
        end: Vec2,
        stops: Vec<(f32, Color)>,
    },
    /// Gradient between two circles
    Radial {
        inner_center: Vec2,
        inner_radius: f32,
        outer_center: Vec2,
        outer_radius: f32,
        stops: Vec<(f32, Color)>,
    },
}

impl Paint {
    /// Representative color (first stop for gradients)
    pub fn base_color(&self) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear { stops, .. } | Paint::Radial { stops, .. } => {
                stops.first().map(|(_, c)| *c).unwrap_or(Color::TRANSPARENT)
            }
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Color,
    pub align: TextAlign,
    /// Vertically center on the anchor instead of using the baseline
    pub middle: bool,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            bold: false,
            color,
            align: TextAlign::Left,
            middle: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn middle(mut self) -> Self {
        self.middle = true;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Canvas-like drawing capability
///
/// Transform, alpha and glow state follow the usual save/restore stack
/// semantics. Use [`SurfaceScope`] rather than pairing the calls by hand.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, factor: Vec2);

    /// Global opacity for subsequent draws
    fn set_alpha(&mut self, alpha: f32);
    /// Soft shadow around subsequent draws (blur 0 disables)
    fn set_glow(&mut self, blur: f32, color: Color);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);
    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint);
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}

/// Save on creation, restore on drop
///
/// Whatever a draw routine does to the transform or style stays inside the
/// scope, including on early return.
pub struct SurfaceScope<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> SurfaceScope<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        surface.save();
        Self { surface }
    }
}

impl Drop for SurfaceScope<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

impl<'a> Deref for SurfaceScope<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for SurfaceScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}
