//! Frame composition: world, HUD and status overlays
//!
//! Everything here only reads simulation state. The one exception is the
//! shake jitter, which draws from the session's effects RNG.

use glam::Vec2;

use super::shapes::{draw_grid, draw_shape};
use super::surface::{Paint, Surface, SurfaceScope, TextStyle};
use crate::color::{Color, palette};
use crate::settings::Settings;
use crate::sim::engine::Engine;
use crate::sim::entity::{Entity, Tag};
use crate::sim::particle::Particle;
use crate::sim::session::{Session, SessionPhase};

const GRID_SPACING: f32 = 40.0;
const PLAYER_GLOW: f32 = 15.0;
const COIN_GLOW: f32 = 20.0;

const HUD_ORIGIN: Vec2 = Vec2::new(20.0, 30.0);
const HUD_LINE: f32 = 20.0;
const TITLE_SIZE: f32 = 48.0;
const SUBTITLE_SIZE: f32 = 20.0;
const SUBTITLE_OFFSET: f32 = 40.0;

/// Draw one entity inside its own transform scope
///
/// Rotation and scale pivot on the entity center and never touch its
/// collision bounds.
pub fn draw_entity(surface: &mut dyn Surface, entity: &Entity) {
    let mut scope = SurfaceScope::new(surface);
    let center = entity.center();
    scope.translate(center);
    scope.rotate(entity.rotation);
    scope.scale(Vec2::splat(entity.scale));
    scope.translate(-center);

    match entity.tag() {
        Tag::Player => scope.set_glow(PLAYER_GLOW, entity.color),
        Tag::Coin => scope.set_glow(COIN_GLOW, entity.color),
        Tag::Enemy | Tag::Sprite => {}
    }
    draw_shape(&mut *scope, entity);
}

/// Filled circle fading with remaining life
pub fn draw_particle(surface: &mut dyn Surface, particle: &Particle) {
    let mut scope = SurfaceScope::new(surface);
    scope.set_alpha(particle.alpha());
    scope.fill_circle(particle.pos, particle.size, &Paint::Solid(particle.color));
}

/// Draw the playfield offset by `jitter`
///
/// Active entities first in insertion order, then particles.
pub fn render_engine(engine: &Engine, surface: &mut dyn Surface, jitter: Vec2, settings: &Settings) {
    let mut scope = SurfaceScope::new(surface);
    if jitter != Vec2::ZERO {
        scope.translate(jitter);
    }

    let extent = engine.extent();
    scope.fill_rect(Vec2::ZERO, extent, &Paint::Solid(palette::BACKGROUND));
    if settings.quality.grid_enabled() {
        draw_grid(&mut *scope, extent, GRID_SPACING, palette::GRID);
    }

    for entity in engine.entities().iter().filter(|e| e.active) {
        draw_entity(&mut *scope, entity);
    }
    for particle in engine.particles() {
        draw_particle(&mut *scope, particle);
    }
}

/// Full frame for a session: world, HUD, then the phase overlay
pub fn render_session(session: &mut Session, surface: &mut dyn Surface) {
    let jitter = session.next_shake_offset();
    render_engine(session.engine(), surface, jitter, session.settings());

    if session.settings().show_hud {
        draw_hud(session, surface);
    }

    match session.phase() {
        SessionPhase::Playing => {}
        SessionPhase::GameOver => {
            draw_overlay(session.engine(), surface, "GAME OVER", palette::ENEMY, "Press R to play again")
        }
        SessionPhase::Won => {
            draw_overlay(session.engine(), surface, "YOU WIN!", palette::COIN, "Press R to play again")
        }
        SessionPhase::Paused => {
            draw_overlay(session.engine(), surface, "PAUSED", Color::WHITE, "Press P to resume")
        }
    }
}

fn draw_hud(session: &Session, surface: &mut dyn Surface) {
    let mut scope = SurfaceScope::new(surface);
    let engine = session.engine();
    let small = TextStyle::new(12.0, Color::WHITE);

    scope.fill_text(
        &format!("Score: {}/{}", session.score(), session.config().win_score),
        HUD_ORIGIN,
        &TextStyle::new(16.0, Color::WHITE).bold(),
    );
    scope.fill_text(
        &format!("Coins: {}", engine.count_tag(Tag::Coin)),
        HUD_ORIGIN + Vec2::new(0.0, HUD_LINE),
        &small,
    );
    scope.fill_text(
        &format!("Enemies: {}", engine.count_tag(Tag::Enemy)),
        HUD_ORIGIN + Vec2::new(0.0, HUD_LINE * 2.0),
        &small,
    );
    if session.autopilot() {
        scope.fill_text(
            "Autopilot",
            HUD_ORIGIN + Vec2::new(0.0, HUD_LINE * 3.0),
            &small.clone().with_color(palette::COIN),
        );
    }
}

fn draw_overlay(engine: &Engine, surface: &mut dyn Surface, title: &str, color: Color, subtitle: &str) {
    let mut scope = SurfaceScope::new(surface);
    let extent = engine.extent();
    scope.fill_rect(Vec2::ZERO, extent, &Paint::Solid(palette::OVERLAY));

    let center = extent / 2.0;
    scope.fill_text(title, center, &TextStyle::new(TITLE_SIZE, color).bold().centered());
    scope.fill_text(
        subtitle,
        center + Vec2::new(0.0, SUBTITLE_OFFSET),
        &TextStyle::new(SUBTITLE_SIZE, Color::WHITE).centered(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::renderer::commands::{CommandBuffer, DrawCommand};

    fn session() -> Session {
        Session::new(GameConfig::default(), 7)
    }

    #[test]
    fn test_render_does_not_mutate_engine() {
        let mut s = session();
        s.engine_mut().trigger_shake(10.0);
        s.engine_mut().spawn_particle_burst(Vec2::new(100.0, 100.0), palette::COIN, 10);
        let before = s.engine().clone();

        let mut buffer = CommandBuffer::new();
        render_session(&mut s, &mut buffer);

        assert_eq!(s.engine().entities(), before.entities());
        assert_eq!(s.engine().particles(), before.particles());
        assert_eq!(s.engine().shake(), before.shake());
    }

    #[test]
    fn test_scopes_are_balanced() {
        let mut s = session();
        s.engine_mut().spawn_particle_burst(Vec2::new(50.0, 50.0), Color::WHITE, 5);
        let mut buffer = CommandBuffer::new();
        render_session(&mut s, &mut buffer);
        assert!(buffer.is_balanced());
    }

    #[test]
    fn test_inactive_entities_are_skipped() {
        let mut engine = Engine::new(800.0, 600.0, 1);
        let id = engine.spawn_entity(Entity::coin(Vec2::new(10.0, 10.0)));
        let settings = Settings::default();

        let mut visible = CommandBuffer::new();
        render_engine(&engine, &mut visible, Vec2::ZERO, &settings);

        if let Some(coin) = engine.entity_mut(id) {
            coin.active = false;
        }
        let mut hidden = CommandBuffer::new();
        render_engine(&engine, &mut hidden, Vec2::ZERO, &settings);

        assert!(visible.contains_text("$"));
        assert!(!hidden.contains_text("$"));
    }

    #[test]
    fn test_hud_text() {
        let mut s = session();
        let mut buffer = CommandBuffer::new();
        render_session(&mut s, &mut buffer);
        assert!(buffer.contains_text("Score: 0/10"));
        assert!(buffer.contains_text("Coins: 5"));
        assert!(buffer.contains_text("Enemies: 3"));
        assert!(!buffer.contains_text("GAME OVER"));
    }

    #[test]
    fn test_pause_overlay() {
        let mut s = session();
        s.toggle_pause();
        let mut buffer = CommandBuffer::new();
        render_session(&mut s, &mut buffer);
        assert!(buffer.contains_text("PAUSED"));
    }

    #[test]
    fn test_jitter_translates_world() {
        let engine = Engine::new(800.0, 600.0, 1);
        let mut buffer = CommandBuffer::new();
        render_engine(&engine, &mut buffer, Vec2::new(2.0, -1.0), &Settings::default());
        assert_eq!(buffer.commands()[1], DrawCommand::Translate(Vec2::new(2.0, -1.0)));
    }

    #[test]
    fn test_particle_alpha() {
        let mut buffer = CommandBuffer::new();
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, Color::WHITE, 1.0, 3.0);
        p.life = 0.25;
        draw_particle(&mut buffer, &p);
        assert!(buffer.commands().contains(&DrawCommand::SetAlpha(0.25)));
    }
}
