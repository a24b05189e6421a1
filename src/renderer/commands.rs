//! Recording surface
//!
//! Captures draw calls as data. Used for headless runs and for asserting on
//! render output without a display.

use glam::Vec2;

use super::surface::{Paint, Surface, TextStyle};
use crate::color::Color;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    Scale(Vec2),
    SetAlpha(f32),
    SetGlow { blur: f32, color: Color },
    FillRect { origin: Vec2, size: Vec2, paint: Paint },
    FillCircle { center: Vec2, radius: f32, paint: Paint },
    FillPolygon { points: Vec<Vec2>, paint: Paint },
    StrokePolyline { points: Vec<Vec2>, width: f32, color: Color },
    FillText { text: String, pos: Vec2, style: TextStyle },
}

impl DrawCommand {
    /// Whether this call puts pixels on the surface
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillRect { .. }
                | DrawCommand::FillCircle { .. }
                | DrawCommand::FillPolygon { .. }
                | DrawCommand::StrokePolyline { .. }
                | DrawCommand::FillText { .. }
        )
    }
}

/// Surface that records instead of drawing
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
    unbalanced: bool,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
        self.max_depth = 0;
        self.unbalanced = false;
    }

    /// Number of calls that produce pixels
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    /// Every text string drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// True when every save was restored and no restore was unmatched
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && !self.unbalanced
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Surface for CommandBuffer {
    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        match self.depth.checked_sub(1) {
            Some(depth) => self.depth = depth,
            None => self.unbalanced = true,
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn scale(&mut self, factor: Vec2) {
        self.commands.push(DrawCommand::Scale(factor));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::SetAlpha(alpha));
    }

    fn set_glow(&mut self, blur: f32, color: Color) {
        self.commands.push(DrawCommand::SetGlow { blur, color });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            paint: paint.clone(),
        });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            pos,
            style: style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::SurfaceScope;

    #[test]
    fn test_scope_restores_on_drop() {
        let mut buffer = CommandBuffer::new();
        {
            let mut scope = SurfaceScope::new(&mut buffer);
            scope.translate(Vec2::new(1.0, 2.0));
            {
                let mut inner = SurfaceScope::new(&mut *scope);
                inner.set_alpha(0.5);
            }
        }
        assert!(buffer.is_balanced());
        assert_eq!(buffer.max_depth(), 2);
        assert_eq!(buffer.commands().first(), Some(&DrawCommand::Save));
        assert_eq!(buffer.commands().last(), Some(&DrawCommand::Restore));
    }

    #[test]
    fn test_unmatched_restore_is_detected() {
        let mut buffer = CommandBuffer::new();
        buffer.restore();
        assert!(!buffer.is_balanced());
    }

    #[test]
    fn test_texts() {
        let mut buffer = CommandBuffer::new();
        buffer.fill_text("hello", Vec2::ZERO, &TextStyle::new(12.0, Color::WHITE));
        buffer.fill_rect(Vec2::ZERO, Vec2::ONE, &Paint::Solid(Color::BLACK));
        assert_eq!(buffer.texts().collect::<Vec<_>>(), vec!["hello"]);
        assert!(buffer.contains_text("ell"));
        assert_eq!(buffer.draw_count(), 2);
    }
}
