//! Short-lived visual particles
//!
//! Particles never collide; they fall under constant gravity and fade out.

use glam::Vec2;

use crate::color::Color;
use crate::consts::PARTICLE_GRAVITY;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Seconds remaining
    pub life: f32,
    /// Life at spawn, for the fade
    pub max_life: f32,
    /// Draw radius, fixed at spawn
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: Color, life: f32, size: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            life,
            max_life: life,
            size,
        }
    }

    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel.y += PARTICLE_GRAVITY * dt;
        self.life -= dt;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Linear fade from 1 at spawn to 0 at expiry
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_applies_gravity_after_move() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(10.0, 0.0), Color::WHITE, 1.0, 3.0);
        p.integrate(0.5);
        // Position uses the pre-gravity velocity
        assert_eq!(p.pos, Vec2::new(5.0, 0.0));
        assert_eq!(p.vel, Vec2::new(10.0, 100.0));
        assert_eq!(p.life, 0.5);
        assert_eq!(p.size, 3.0);
    }

    #[test]
    fn test_alpha_fades_to_zero() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, Color::WHITE, 0.8, 2.0);
        assert_eq!(p.alpha(), 1.0);

        p.integrate(0.4);
        assert!((p.alpha() - 0.5).abs() < 1e-5);

        p.integrate(0.4);
        assert!(p.alpha() < 1e-5);

        p.integrate(0.1);
        assert_eq!(p.alpha(), 0.0);
        assert!(!p.is_alive());
    }
}
