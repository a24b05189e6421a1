//! Idle/demo mode - steers the player without keyboard input

use glam::Vec2;

use super::engine::Engine;
use super::entity::{EntityId, Tag};
use super::input::MoveIntent;

/// Enemies closer than this (center to center) are fled from
pub const DANGER_RADIUS: f32 = 110.0;
/// Axis offsets below this are treated as aligned
const DEADZONE: f32 = 4.0;

/// Pick a movement direction for the player
///
/// Flees the nearest enemy when it is inside [`DANGER_RADIUS`], otherwise
/// heads for the nearest coin. Stands still when neither applies.
pub fn steer(engine: &Engine, player: EntityId) -> MoveIntent {
    let Some(player) = engine.entity(player) else {
        return MoveIntent::default();
    };
    let here = player.center();

    let nearest = |tag: Tag| {
        engine
            .entities()
            .iter()
            .filter(|e| e.active && e.tag() == tag)
            .map(|e| e.center())
            .min_by(|a, b| {
                a.distance_squared(here)
                    .partial_cmp(&b.distance_squared(here))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    };

    let threat = nearest(Tag::Enemy).filter(|t| t.distance(here) < DANGER_RADIUS);
    if let Some(threat) = threat {
        let away = here - threat;
        // Pinned against a wall: slide along it instead of pushing into it
        let away = Vec2::new(
            if wall_blocks(here.x, away.x, engine.width) { 0.0 } else { away.x },
            if wall_blocks(here.y, away.y, engine.height) { 0.0 } else { away.y },
        );
        return toward(away);
    }

    match nearest(Tag::Coin) {
        Some(coin) => toward(coin - here),
        None => MoveIntent::default(),
    }
}

fn wall_blocks(pos: f32, dir: f32, extent: f32) -> bool {
    let margin = DANGER_RADIUS * 0.25;
    (dir < 0.0 && pos < margin) || (dir > 0.0 && pos > extent - margin)
}

fn toward(delta: Vec2) -> MoveIntent {
    let axis = |d: f32| {
        if d.abs() < DEADZONE {
            0.0
        } else {
            d.signum()
        }
    };
    MoveIntent {
        x: axis(delta.x),
        y: axis(delta.y),
    }
}
