//! Display colors
//!
//! Colors are opaque to the simulation: entities and particles carry one,
//! only the renderer interprets it.

/// RGBA color with components in 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from a 0xRRGGBB literal
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Scale RGB toward black by `amount` (0 = unchanged, 1 = black)
    pub fn darken(self, amount: f32) -> Self {
        let k = (1.0 - amount).clamp(0.0, 1.0);
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
            a: self.a,
        }
    }

    /// Blend RGB toward white by `amount` (0 = unchanged, 1 = white)
    pub fn lighten(self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        Self {
            r: self.r + (1.0 - self.r) * t,
            g: self.g + (1.0 - self.g) * t,
            b: self.b + (1.0 - self.b) * t,
            a: self.a,
        }
    }

    /// CSS `rgba(...)` string for canvas style properties
    pub fn to_css(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

/// Palette used by the arcade game
pub mod palette {
    use super::Color;

    pub const PLAYER: Color = Color::hex(0xD2B48C);
    pub const COIN: Color = Color::hex(0x00FF00);
    pub const ENEMY: Color = Color::hex(0xFF0101);
    pub const BACKGROUND: Color = Color::hex(0x1A1A2E);
    pub const GRID: Color = Color::rgba(100.0 / 255.0, 100.0 / 255.0, 150.0 / 255.0, 0.1);
    pub const OVERLAY: Color = Color::rgba(0.0, 0.0, 0.0, 0.5);
    pub const COIN_HIGHLIGHT: Color = Color::rgba(1.0, 1.0, 1.0, 0.6);
}
