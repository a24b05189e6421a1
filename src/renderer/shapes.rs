//! Draw procedures for each entity render shape
//!
//! Geometry helpers are split from the draw calls so they can be checked
//! without a surface.

use glam::Vec2;
use std::f32::consts::PI;

use super::surface::{Paint, Surface, TextStyle};
use crate::color::{Color, palette};
use crate::sim::entity::{Entity, RenderShape};

/// Star points (outer + inner alternating)
const STAR_POINTS: usize = 12;
const STAR_INNER_RATIO: f32 = 0.5;
const STAR_GLOW: f32 = 15.0;

/// Boundary of a 6-pointed star, starting at the top and going clockwise
pub fn star_points(center: Vec2, outer: f32) -> Vec<Vec2> {
    (0..STAR_POINTS)
        .map(|i| {
            let angle = i as f32 * PI / 6.0 - PI / 2.0;
            let r = if i % 2 == 0 { outer } else { outer * STAR_INNER_RATIO };
            center + Vec2::new(angle.cos(), angle.sin()) * r
        })
        .collect()
}

/// Algiz rune as three segments: stem, left branch, right branch
pub fn rune_segments(origin: Vec2, size: Vec2) -> [[Vec2; 2]; 3] {
    let at = |fx: f32, fy: f32| origin + Vec2::new(size.x * fx, size.y * fy);
    [
        [at(0.5, 0.1), at(0.5, 0.9)],
        [at(0.5, 0.5), at(0.15, 0.2)],
        [at(0.5, 0.5), at(0.85, 0.2)],
    ]
}

#[inline]
pub fn rune_line_width(width: f32) -> f32 {
    (width * 0.12).max(2.0)
}

/// Dispatch on the entity's render shape
pub fn draw_shape(surface: &mut dyn Surface, entity: &Entity) {
    match entity.shape {
        RenderShape::Rect => draw_rect(surface, entity),
        RenderShape::Star => draw_star(surface, entity),
        RenderShape::Rune => draw_rune(surface, entity),
        RenderShape::Dollar => draw_dollar(surface, entity),
    }
}

/// Diagonal gradient from the entity color to a darker shade
pub fn draw_rect(surface: &mut dyn Surface, entity: &Entity) {
    let size = entity.size();
    let paint = Paint::Linear {
        start: entity.pos,
        end: entity.pos + size,
        stops: vec![(0.0, entity.color), (1.0, entity.color.darken(0.3))],
    };
    surface.fill_rect(entity.pos, size, &paint);
}

pub fn draw_star(surface: &mut dyn Surface, entity: &Entity) {
    let center = entity.center();
    let radius = entity.width / 2.0;
    let points = star_points(center, radius);
    let paint = Paint::Radial {
        inner_center: center,
        inner_radius: 0.0,
        outer_center: center,
        outer_radius: radius,
        stops: vec![
            (0.0, entity.color.lighten(0.4)),
            (0.5, entity.color),
            (1.0, entity.color.darken(0.33)),
        ],
    };
    surface.fill_polygon(&points, &paint);

    // Second pass with glow on top of the crisp fill
    surface.set_glow(STAR_GLOW, palette::ENEMY);
    surface.fill_polygon(&points, &paint);
}

pub fn draw_rune(surface: &mut dyn Surface, entity: &Entity) {
    let width = rune_line_width(entity.width);
    for segment in rune_segments(entity.pos, entity.size()) {
        surface.stroke_polyline(&segment, width, entity.color);
    }
}

/// Coin disc with soft halo, highlight and a `$` mark
pub fn draw_dollar(surface: &mut dyn Surface, entity: &Entity) {
    let center = entity.center();
    let radius = entity.width / 2.0;

    let halo = Paint::Radial {
        inner_center: center,
        inner_radius: 0.0,
        outer_center: center,
        outer_radius: radius * 1.5,
        stops: vec![
            (0.0, entity.color.with_alpha(0.3)),
            (1.0, entity.color.with_alpha(0.0)),
        ],
    };
    surface.fill_circle(center, radius * 1.5, &halo);

    let highlight_center = center - Vec2::splat(radius * 0.3);
    let disc = Paint::Radial {
        inner_center: highlight_center,
        inner_radius: 0.0,
        outer_center: center,
        outer_radius: radius,
        stops: vec![
            (0.0, entity.color.lighten(0.5)),
            (0.5, entity.color),
            (1.0, entity.color.darken(0.6)),
        ],
    };
    surface.fill_circle(center, radius, &disc);
    surface.fill_circle(
        highlight_center,
        radius * 0.3,
        &Paint::Solid(palette::COIN_HIGHLIGHT),
    );

    let style = TextStyle::new((entity.height * 0.9).max(14.0), entity.color.darken(0.6))
        .bold()
        .centered()
        .middle();
    surface.fill_text("$", center, &style);
}

/// Faint lattice behind the playfield
pub fn draw_grid(surface: &mut dyn Surface, extent: Vec2, spacing: f32, color: Color) {
    if spacing <= 0.0 {
        return;
    }
    let mut x = 0.0;
    while x < extent.x {
        surface.stroke_polyline(&[Vec2::new(x, 0.0), Vec2::new(x, extent.y)], 1.0, color);
        x += spacing;
    }
    let mut y = 0.0;
    while y < extent.y {
        surface.stroke_polyline(&[Vec2::new(0.0, y), Vec2::new(extent.x, y)], 1.0, color);
        y += spacing;
    }
}
