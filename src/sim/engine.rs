//! The engine: entity and particle collections, key state and screen shake
//!
//! The engine owns everything it simulates. Callers refer to entities by
//! [`EntityId`], so a removal can never leave a dangling reference behind.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId, Tag};
use super::particle::Particle;
use crate::color::Color;
use crate::consts::*;

/// Entity/particle world with an injectable random source
#[derive(Debug, Clone)]
pub struct Engine {
    pub width: f32,
    pub height: f32,
    /// Insertion order is render order
    entities: Vec<Entity>,
    particles: Vec<Particle>,
    /// Most recent state per lower-cased key name
    keys: HashMap<String, bool>,
    shake: f32,
    max_particles: usize,
    rng: Pcg32,
    next_id: u32,
}

impl Engine {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(width, height, Pcg32::seed_from_u64(seed))
    }

    pub fn with_rng(width: f32, height: f32, rng: Pcg32) -> Self {
        Self {
            width,
            height,
            entities: Vec::new(),
            particles: Vec::new(),
            keys: HashMap::new(),
            shake: 0.0,
            max_particles: MAX_PARTICLES,
            rng,
            next_id: 1,
        }
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    // --- Entities ---

    /// Add an entity and return its id for later configuration or removal
    pub fn spawn_entity(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        self.entities.push(entity);
        id
    }

    /// Remove an entity; absent ids are ignored
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Snapshot of the ids currently carrying `tag`
    ///
    /// The snapshot does not follow later spawns or removals; look each id
    /// up again before using it.
    pub fn query_by_tag(&self, tag: Tag) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.tag() == tag)
            .map(|e| e.id)
            .collect()
    }

    /// String form of [`Engine::query_by_tag`]; unknown tags match nothing
    pub fn query_by_tag_name(&self, name: &str) -> Vec<EntityId> {
        match Tag::parse(name) {
            Some(tag) => self.query_by_tag(tag),
            None => Vec::new(),
        }
    }

    pub fn count_tag(&self, tag: Tag) -> usize {
        self.entities.iter().filter(|e| e.tag() == tag).count()
    }

    // --- Particles ---

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
        self.particles.truncate(max);
    }

    /// Add a particle; returns false when the pool is full
    pub fn spawn_particle(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.max_particles {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Add a particle with a random size in [2, 6)
    pub fn emit_particle(&mut self, pos: Vec2, vel: Vec2, color: Color, life: f32) -> bool {
        let size = 2.0 + self.rng.random::<f32>() * 4.0;
        self.spawn_particle(Particle::new(pos, vel, color, life, size))
    }

    /// Radial burst of `count` particles biased upward
    pub fn spawn_particle_burst(&mut self, center: Vec2, color: Color, count: usize) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = 100.0 + self.rng.random::<f32>() * 100.0;
            let vel = Vec2::new(angle.cos() * speed, angle.sin() * speed - 50.0);
            let life = 0.5 + self.rng.random::<f32>() * 0.5;
            self.emit_particle(center, vel, color, life);
        }
    }

    // --- Shake ---

    /// Set the shake magnitude (overwrites, never accumulates)
    pub fn trigger_shake(&mut self, intensity: f32) {
        self.shake = intensity.max(0.0);
    }

    pub fn shake(&self) -> f32 {
        self.shake
    }

    /// Render-origin jitter for this frame, uniform in [-shake/2, shake/2]
    pub fn shake_offset(&self, rng: &mut impl Rng) -> Vec2 {
        if self.shake <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (rng.random::<f32>() - 0.5) * self.shake,
            (rng.random::<f32>() - 0.5) * self.shake,
        )
    }

    // --- Input ---

    pub fn set_input_key(&mut self, key: &str, pressed: bool) {
        self.keys.insert(key.to_lowercase(), pressed);
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.keys.get(&key.to_lowercase()).copied().unwrap_or(false)
    }

    /// Forget every key (e.g. when focus is lost)
    pub fn release_all_keys(&mut self) {
        self.keys.clear();
    }

    // --- Stepping ---

    /// Advance entities, particles and shake by `dt`
    pub fn update(&mut self, dt: f32) {
        self.update_entities(dt);
        self.update_effects(dt);
    }

    /// Integrate every active entity
    pub fn update_entities(&mut self, dt: f32) {
        for entity in self.entities.iter_mut().filter(|e| e.active) {
            entity.integrate(dt);
        }
    }

    /// Age particles (dropping expired ones) and decay shake
    pub fn update_effects(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.integrate(dt);
        }
        self.particles.retain(Particle::is_alive);

        if self.shake > 0.0 {
            self.shake = (self.shake - dt * SHAKE_DECAY).max(0.0);
        }
    }

    /// Drop every entity and particle
    pub fn clear(&mut self) {
        self.entities.clear();
        self.particles.clear();
    }
}
