//! 2D canvas backed [`Surface`]

use glam::Vec2;
use std::f64::consts::TAU;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::color::Color;
use crate::renderer::{Paint, Surface, TextAlign, TextStyle};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn gradient(&self, paint: &Paint) -> Option<CanvasGradient> {
        let (gradient, stops) = match paint {
            Paint::Solid(_) => return None,
            Paint::Linear { start, end, stops } => (
                self.ctx.create_linear_gradient(
                    start.x as f64,
                    start.y as f64,
                    end.x as f64,
                    end.y as f64,
                ),
                stops,
            ),
            Paint::Radial {
                inner_center,
                inner_radius,
                outer_center,
                outer_radius,
                stops,
            } => {
                let gradient = self.ctx.create_radial_gradient(
                    inner_center.x as f64,
                    inner_center.y as f64,
                    *inner_radius as f64,
                    outer_center.x as f64,
                    outer_center.y as f64,
                    *outer_radius as f64,
                );
                match gradient {
                    Ok(g) => (g, stops),
                    Err(e) => {
                        log::warn!("Radial gradient failed: {:?}", e);
                        return None;
                    }
                }
            }
        };
        for (offset, color) in stops {
            let _ = gradient.add_color_stop(*offset, &color.to_css());
        }
        Some(gradient)
    }

    /// Apply a paint as the fill style, falling back to its base color
    fn set_fill(&self, paint: &Paint) {
        match self.gradient(paint) {
            Some(gradient) => self.ctx.set_fill_style_canvas_gradient(&gradient),
            None => self.ctx.set_fill_style_str(&paint.base_color().to_css()),
        }
    }

    fn trace(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                self.ctx.move_to(p.x as f64, p.y as f64);
            } else {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        let _ = self.ctx.rotate(radians as f64);
    }

    fn scale(&mut self, factor: Vec2) {
        let _ = self.ctx.scale(factor.x as f64, factor.y as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_glow(&mut self, blur: f32, color: Color) {
        self.ctx.set_shadow_blur(blur.max(0.0) as f64);
        self.ctx.set_shadow_color(&color.to_css());
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        self.set_fill(paint);
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.set_fill(paint);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint) {
        if points.len() < 3 {
            return;
        }
        self.set_fill(paint);
        self.trace(points);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.trace(points);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        let weight = if style.bold { "bold" } else { "normal" };
        self.ctx
            .set_font(&format!("{} {}px system-ui", weight, style.size));
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx
            .set_text_baseline(if style.middle { "middle" } else { "alphabetic" });
        self.ctx.set_fill_style_str(&style.color.to_css());
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}
