//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Step size supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod engine;
pub mod entity;
pub mod input;
pub mod particle;
pub mod session;

pub use clock::{FrameClock, clamp_dt};
pub use collision::{Aabb, WallContact, clamp_origin, wall_contact};
pub use engine::Engine;
pub use entity::{Entity, EntityId, EntityKind, RenderShape, Tag};
pub use input::MoveIntent;
pub use particle::Particle;
pub use session::{Session, SessionPhase};
