//! Key bindings and movement intent

use glam::Vec2;

use super::engine::Engine;

pub const LEFT_KEYS: &[&str] = &["arrowleft", "a"];
pub const RIGHT_KEYS: &[&str] = &["arrowright", "d"];
pub const UP_KEYS: &[&str] = &["arrowup", "w"];
pub const DOWN_KEYS: &[&str] = &["arrowdown", "s"];
pub const PAUSE_KEY: &str = "p";
pub const RESTART_KEY: &str = "r";
pub const AUTOPILOT_KEY: &str = "i";

/// Whether a key name is one the game reacts to
pub fn is_bound(key: &str) -> bool {
    let key = key.to_lowercase();
    [LEFT_KEYS, RIGHT_KEYS, UP_KEYS, DOWN_KEYS]
        .iter()
        .any(|keys| keys.contains(&key.as_str()))
        || [PAUSE_KEY, RESTART_KEY, AUTOPILOT_KEY].contains(&key.as_str())
}

/// Desired movement direction; each axis is -1, 0 or +1
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub x: f32,
    pub y: f32,
}

impl MoveIntent {
    /// Resolve both axes from the engine's key table
    pub fn from_keys(engine: &Engine) -> Self {
        let any = |keys: &[&str]| keys.iter().any(|k| engine.is_key_pressed(k));
        Self {
            x: resolve_axis(any(LEFT_KEYS), any(RIGHT_KEYS)),
            y: resolve_axis(any(UP_KEYS), any(DOWN_KEYS)),
        }
    }

    /// Velocity for a mover with the given per-axis speed (not normalized)
    pub fn velocity(&self, speed: f32) -> Vec2 {
        Vec2::new(self.x, self.y) * speed
    }
}

/// Negative wins over positive when both are held
pub fn resolve_axis(negative: bool, positive: bool) -> f32 {
    if negative {
        -1.0
    } else if positive {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_axis() {
        assert_eq!(resolve_axis(false, false), 0.0);
        assert_eq!(resolve_axis(true, false), -1.0);
        assert_eq!(resolve_axis(false, true), 1.0);
        assert_eq!(resolve_axis(true, true), -1.0);
    }

    #[test]
    fn test_intent_from_keys() {
        let mut engine = Engine::new(800.0, 600.0, 1);
        assert_eq!(MoveIntent::from_keys(&engine), MoveIntent::default());

        engine.set_input_key("D", true);
        engine.set_input_key("ArrowUp", true);
        let intent = MoveIntent::from_keys(&engine);
        assert_eq!(intent, MoveIntent { x: 1.0, y: -1.0 });

        // Diagonals are full speed on both axes
        assert_eq!(intent.velocity(300.0), Vec2::new(300.0, -300.0));
    }

    #[test]
    fn test_is_bound() {
        assert!(is_bound("ArrowDown"));
        assert!(is_bound("W"));
        assert!(is_bound("p"));
        assert!(!is_bound("F5"));
    }
}
