//! Entities (sprites): moving, colliding, renderable rectangles
//!
//! Behavior is selected once at construction through [`EntityKind`]; the
//! [`Tag`] is derived from the kind and only used for queries.

use glam::Vec2;

use super::collision::Aabb;
use crate::color::{Color, palette};
use crate::consts::*;

/// Stable identity of a spawned entity (never reused within an engine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Query label for an entity's role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Player,
    Coin,
    Enemy,
    Sprite,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Player => "player",
            Tag::Coin => "coin",
            Tag::Enemy => "enemy",
            Tag::Sprite => "sprite",
        }
    }

    /// Case-insensitive lookup; unknown names yield `None`
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "player" => Some(Tag::Player),
            "coin" => Some(Tag::Coin),
            "enemy" => Some(Tag::Enemy),
            "sprite" => Some(Tag::Sprite),
            _ => None,
        }
    }
}

/// Closed set of entity behaviors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// No behavior beyond physics
    Plain,
    /// Keyboard-driven; `speed` applies per axis
    Player { speed: f32 },
    /// Pulses and spins; collected on contact
    Coin,
    /// Bounces around the arena; `dir` components are -1 or +1
    Enemy { speed: f32, dir: Vec2 },
}

impl EntityKind {
    pub fn tag(&self) -> Tag {
        match self {
            EntityKind::Plain => Tag::Sprite,
            EntityKind::Player { .. } => Tag::Player,
            EntityKind::Coin => Tag::Coin,
            EntityKind::Enemy { .. } => Tag::Enemy,
        }
    }
}

/// Drawing procedure selector (independent of the kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderShape {
    #[default]
    Rect,
    Star,
    Rune,
    Dollar,
}

/// A positioned rectangle with velocity and acceleration
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Assigned by the engine on spawn
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Inactive entities are skipped by update and render
    pub active: bool,
    pub shape: RenderShape,
    /// Cosmetic animation state (never affects bounds)
    pub rotation: f32,
    pub scale: f32,
    pub time: f32,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2, color: Color) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "entity size must be positive");
        Self {
            id: EntityId(0),
            kind,
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            width: size.x,
            height: size.y,
            color,
            active: true,
            shape: RenderShape::Rect,
            rotation: 0.0,
            scale: 1.0,
            time: 0.0,
        }
    }

    pub fn player(pos: Vec2, speed: f32) -> Self {
        Self::new(
            EntityKind::Player { speed },
            pos,
            Vec2::splat(PLAYER_SIZE),
            palette::PLAYER,
        )
        .with_shape(RenderShape::Rune)
    }

    pub fn coin(pos: Vec2) -> Self {
        Self::new(EntityKind::Coin, pos, Vec2::splat(COIN_SIZE), palette::COIN)
            .with_shape(RenderShape::Dollar)
    }

    pub fn enemy(pos: Vec2, speed: f32, dir: Vec2) -> Self {
        Self::new(
            EntityKind::Enemy { speed, dir },
            pos,
            Vec2::splat(ENEMY_SIZE),
            palette::ENEMY,
        )
        .with_shape(RenderShape::Star)
    }

    pub fn with_shape(mut self, shape: RenderShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn tag(&self) -> Tag {
        self.kind.tag()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() * 0.5
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.vel = Vec2::new(vx, vy);
    }

    /// Semi-implicit Euler step followed by cosmetic animation
    pub fn integrate(&mut self, dt: f32) {
        self.vel += self.acc * dt;
        self.pos += self.vel * dt;
        self.time += dt;

        match self.kind {
            EntityKind::Coin => {
                self.scale = 1.0 + (self.time * 4.0).sin() * 0.15;
                self.rotation += dt * 2.0;
            }
            EntityKind::Enemy { .. } => {
                self.rotation += dt * 2.0;
            }
            EntityKind::Player { .. } | EntityKind::Plain => {}
        }
    }

    /// Unrotated, unscaled base rectangle
    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin_size(self.pos, self.size())
    }

    pub fn collides_with(&self, other: &Entity) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}
