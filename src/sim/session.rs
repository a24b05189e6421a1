//! Game session: the "dodge the enemies, collect the coins" state machine
//!
//! One [`Session::frame`] call runs a whole simulation frame:
//! input → player velocity → engine update → trail → clamp → enemy steering
//! → coin pickups → enemy hits. Rendering reads the settled result.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::autopilot;
use super::collision::{clamp_origin, wall_contact};
use super::engine::Engine;
use super::entity::{Entity, EntityId, EntityKind, Tag};
use super::input::{AUTOPILOT_KEY, MoveIntent, PAUSE_KEY, RESTART_KEY};
use crate::config::GameConfig;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Active gameplay
    Playing,
    /// Everything frozen until resumed
    Paused,
    /// Hit by an enemy (terminal)
    GameOver,
    /// Collected enough coins (terminal)
    Won,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::GameOver | SessionPhase::Won)
    }
}

/// Salt separating the render-jitter stream from the simulation stream
const FX_STREAM_SALT: u64 = 0x5EED_F00D_CAFE_D00D;

/// A single play-through
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    settings: Settings,
    seed: u64,
    engine: Engine,
    player: EntityId,
    score: u32,
    phase: SessionPhase,
    autopilot: bool,
    /// Frames processed (including paused/terminal ones)
    frame_count: u64,
    /// Render-side randomness (shake jitter); never feeds the simulation
    fx_rng: Pcg32,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_settings(config, Settings::default(), seed)
    }

    pub fn with_settings(config: GameConfig, settings: Settings, seed: u64) -> Self {
        let mut engine = Engine::new(config.width, config.height, seed);
        engine.set_max_particles(settings.max_particles());

        let player_pos = Vec2::new(config.width / 2.0 - PLAYER_SIZE / 2.0, config.height / 2.0);
        let player = engine.spawn_entity(Entity::player(player_pos, config.player_speed));

        let mut session = Self {
            config,
            settings,
            seed,
            engine,
            player,
            score: 0,
            phase: SessionPhase::Playing,
            autopilot: false,
            frame_count: 0,
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_STREAM_SALT),
        };

        for _ in 0..session.config.coin_count {
            session.spawn_coin();
        }
        for _ in 0..session.config.enemy_count {
            session.spawn_enemy();
        }

        log::info!(
            "Session started (seed {}, {} coins, {} enemies)",
            seed,
            session.config.coin_count,
            session.config.enemy_count
        );
        session
    }

    /// Start over with a fresh seed drawn from the current one
    pub fn restart(&mut self) {
        let seed = self.engine.rng_mut().random::<u64>();
        self.restart_with_seed(seed);
    }

    pub fn restart_with_seed(&mut self, seed: u64) {
        let autopilot = self.autopilot;
        *self = Self::with_settings(self.config.clone(), self.settings.clone(), seed);
        self.autopilot = autopilot;
    }

    // --- Accessors ---

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.engine.set_max_particles(settings.max_particles());
        self.settings = settings;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn player_entity(&self) -> Option<&Entity> {
        self.engine.entity(self.player)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.autopilot = enabled;
    }

    /// Shake jitter for the next render
    pub fn next_shake_offset(&mut self) -> Vec2 {
        if !self.settings.effective_screen_shake() {
            return Vec2::ZERO;
        }
        self.engine.shake_offset(&mut self.fx_rng)
    }

    // --- Input ---

    /// Record a key transition and react to the control keys
    pub fn handle_key(&mut self, key: &str, pressed: bool) {
        let was_pressed = self.engine.is_key_pressed(key);
        self.engine.set_input_key(key, pressed);
        // Ignore key-repeat
        if !pressed || was_pressed {
            return;
        }

        match key.to_lowercase().as_str() {
            PAUSE_KEY => self.toggle_pause(),
            RESTART_KEY if self.is_terminal() => {
                log::info!("Restarting after {:?} with score {}", self.phase, self.score);
                self.restart();
            }
            AUTOPILOT_KEY => self.set_autopilot(!self.autopilot),
            _ => {}
        }
    }

    /// Toggle between Playing and Paused; terminal phases are unaffected
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            SessionPhase::Playing => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Playing,
            terminal => terminal,
        };
        log::debug!("Phase now {:?}", self.phase);
    }

    // --- Frame ---

    /// Advance the session by `dt` seconds (already clamped by the caller)
    ///
    /// Paused skips everything. Terminal phases still age particles and
    /// decay shake, where a plain engine halt would freeze them mid-air.
    pub fn frame(&mut self, dt: f32) {
        self.frame_count += 1;

        match self.phase {
            SessionPhase::Paused => return,
            // Gameplay is frozen but, unlike a full engine stop, the last
            // burst and shake keep playing out
            SessionPhase::GameOver | SessionPhase::Won => {
                self.engine.update_effects(dt);
                return;
            }
            SessionPhase::Playing => {}
        }

        debug_assert_eq!(
            self.engine.count_tag(Tag::Player),
            1,
            "a session has exactly one player"
        );

        self.apply_player_input();
        self.engine.update(dt);
        self.emit_trail();
        self.clamp_player();
        self.steer_enemies();

        let Some(player) = self.engine.entity(self.player).cloned() else {
            return;
        };
        self.collect_coins(&player);
        if self.phase == SessionPhase::Playing {
            self.check_enemy_hits(&player);
        }
    }

    fn apply_player_input(&mut self) {
        let intent = if self.autopilot {
            autopilot::steer(&self.engine, self.player)
        } else {
            MoveIntent::from_keys(&self.engine)
        };

        if let Some(player) = self.engine.entity_mut(self.player) {
            let speed = match player.kind {
                EntityKind::Player { speed } => speed,
                _ => 0.0,
            };
            player.vel = intent.velocity(speed);
        }
    }

    fn emit_trail(&mut self) {
        if !self.settings.particles {
            return;
        }
        let Some(player) = self.engine.entity(self.player) else {
            return;
        };
        if player.vel == Vec2::ZERO {
            return;
        }
        let (center, color) = (player.center(), player.color);

        let rng = self.engine.rng_mut();
        if !rng.random_bool(TRAIL_CHANCE) {
            return;
        }
        let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * TRAIL_JITTER;
        self.engine.emit_particle(center, vel, color, TRAIL_LIFE);
    }

    fn clamp_player(&mut self) {
        let extent = self.engine.extent();
        if let Some(player) = self.engine.entity_mut(self.player) {
            player.pos = clamp_origin(player.pos, player.size(), extent);
        }
    }

    fn steer_enemies(&mut self) {
        let extent = self.engine.extent();
        for id in self.engine.query_by_tag(Tag::Enemy) {
            let Some(enemy) = self.engine.entity_mut(id) else {
                continue;
            };
            let contact = wall_contact(&enemy.bounds(), extent);
            if let EntityKind::Enemy { speed, dir } = &mut enemy.kind {
                // Velocity takes the current direction; a flip applies next frame
                enemy.vel = *dir * *speed;
                if contact.horizontal {
                    dir.x = -dir.x;
                }
                if contact.vertical {
                    dir.y = -dir.y;
                }
            }
        }
    }

    fn collect_coins(&mut self, player: &Entity) {
        for id in self.engine.query_by_tag(Tag::Coin) {
            let Some(coin) = self.engine.entity(id) else {
                continue;
            };
            if !player.collides_with(coin) {
                continue;
            }

            let (center, color) = (coin.center(), coin.color);
            self.engine.spawn_particle_burst(center, color, COIN_BURST);
            self.engine.trigger_shake(COIN_SHAKE);
            self.engine.remove_entity(id);
            self.score += 1;
            log::debug!("Coin collected ({}/{})", self.score, self.config.win_score);

            if self.score >= self.config.win_score {
                self.phase = SessionPhase::Won;
                log::info!("Session won after {} frames", self.frame_count);
                return;
            }
            self.spawn_coin();
        }
    }

    fn check_enemy_hits(&mut self, player: &Entity) {
        for id in self.engine.query_by_tag(Tag::Enemy) {
            let Some(enemy) = self.engine.entity(id) else {
                continue;
            };
            if !player.collides_with(enemy) {
                continue;
            }

            let color = enemy.color;
            self.engine
                .spawn_particle_burst(player.center(), color, ENEMY_BURST);
            self.engine.trigger_shake(ENEMY_SHAKE);
            if self.phase != SessionPhase::GameOver {
                log::info!("Game over with score {}", self.score);
            }
            self.phase = SessionPhase::GameOver;
        }
    }

    // --- Spawning ---

    fn random_origin(&mut self, size: f32) -> Vec2 {
        let extent = self.engine.extent() - Vec2::splat(size);
        let rng = self.engine.rng_mut();
        Vec2::new(rng.random::<f32>() * extent.x, rng.random::<f32>() * extent.y)
    }

    fn spawn_coin(&mut self) -> EntityId {
        let pos = self.random_origin(COIN_SIZE);
        self.engine.spawn_entity(Entity::coin(pos))
    }

    fn spawn_enemy(&mut self) -> EntityId {
        let pos = self.random_origin(ENEMY_SIZE);
        let rng = self.engine.rng_mut();
        let speed = self.config.enemy_speed_min + rng.random::<f32>() * self.config.enemy_speed_range;
        let mut sign = || if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let dir = Vec2::new(sign(), sign());
        self.engine.spawn_entity(Entity::enemy(pos, speed, dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arena with only the player in it
    fn empty_session() -> Session {
        let config = GameConfig {
            coin_count: 0,
            enemy_count: 0,
            ..GameConfig::default()
        };
        Session::new(config, 1234)
    }

    fn place_player(session: &mut Session, x: f32, y: f32) {
        let id = session.player();
        session.engine_mut().entity_mut(id).unwrap().set_position(x, y);
    }

    fn remove_all(session: &mut Session, tag: Tag) {
        for id in session.engine().query_by_tag(tag) {
            session.engine_mut().remove_entity(id);
        }
    }

    #[test]
    fn test_initial_layout() {
        let session = Session::new(GameConfig::default(), 42);
        let engine = session.engine();
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(engine.count_tag(Tag::Player), 1);
        assert_eq!(engine.count_tag(Tag::Coin), 5);
        assert_eq!(engine.count_tag(Tag::Enemy), 3);

        let player = session.player_entity().unwrap();
        assert_eq!(player.pos, Vec2::new(384.0, 300.0));

        for e in engine.entities() {
            assert!(e.pos.x >= 0.0 && e.pos.x + e.width <= 800.0);
            assert!(e.pos.y >= 0.0 && e.pos.y + e.height <= 600.0);
            if let EntityKind::Enemy { speed, dir } = e.kind {
                assert!((150.0..250.0).contains(&speed));
                assert!(dir.x.abs() == 1.0 && dir.y.abs() == 1.0);
            }
        }
    }

    #[test]
    fn test_coin_pickup() {
        let mut session = empty_session();
        place_player(&mut session, 0.0, 0.0);
        let coin = session.engine_mut().spawn_entity(Entity::coin(Vec2::new(10.0, 10.0)));

        session.frame(0.0);

        assert_eq!(session.score(), 1);
        assert!(session.engine().entity(coin).is_none());
        assert_eq!(session.engine().count_tag(Tag::Coin), 1);
        assert_eq!(session.engine().particles().len(), COIN_BURST);
        assert_eq!(session.engine().shake(), COIN_SHAKE);
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_reaching_win_score() {
        let mut session = empty_session();
        place_player(&mut session, 0.0, 0.0);

        for expected in 1..=WIN_SCORE {
            remove_all(&mut session, Tag::Coin);
            session.engine_mut().spawn_entity(Entity::coin(Vec2::new(10.0, 10.0)));
            session.frame(0.0);
            assert_eq!(session.score(), expected);

            if expected < WIN_SCORE {
                assert_eq!(session.phase(), SessionPhase::Playing);
                assert_eq!(session.engine().count_tag(Tag::Coin), 1);
            }
        }

        assert_eq!(session.phase(), SessionPhase::Won);
        // No replacement after the winning pickup
        assert_eq!(session.engine().count_tag(Tag::Coin), 0);
    }

    #[test]
    fn test_score_never_passes_win() {
        let config = GameConfig {
            coin_count: 0,
            enemy_count: 0,
            win_score: 1,
            ..GameConfig::default()
        };
        let mut session = Session::new(config, 5);
        place_player(&mut session, 0.0, 0.0);
        session.engine_mut().spawn_entity(Entity::coin(Vec2::new(0.0, 0.0)));
        session.engine_mut().spawn_entity(Entity::coin(Vec2::new(5.0, 5.0)));

        session.frame(0.0);
        assert_eq!(session.phase(), SessionPhase::Won);
        assert_eq!(session.score(), 1);
        assert_eq!(session.engine().count_tag(Tag::Coin), 1);
    }

    #[test]
    fn test_enemy_hit_freezes_gameplay() {
        let mut session = empty_session();
        place_player(&mut session, 100.0, 100.0);
        session
            .engine_mut()
            .spawn_entity(Entity::enemy(Vec2::new(110.0, 110.0), 200.0, Vec2::ONE));
        session.engine_mut().spawn_entity(Entity::coin(Vec2::new(500.0, 500.0)));

        session.frame(0.0);
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.engine().particles().len(), ENEMY_BURST);
        assert_eq!(session.engine().shake(), ENEMY_SHAKE);

        let positions: Vec<Vec2> = session.engine().entities().iter().map(|e| e.pos).collect();
        let lives_before: Vec<f32> = session.engine().particles().iter().map(|p| p.life).collect();

        session.handle_key("ArrowRight", true);
        for _ in 0..10 {
            session.frame(MAX_FRAME_DT);
        }

        let after: Vec<Vec2> = session.engine().entities().iter().map(|e| e.pos).collect();
        assert_eq!(positions, after);
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), SessionPhase::GameOver);
        // Effects keep animating
        assert!(session.engine().shake() < ENEMY_SHAKE);
        let lives_after: Vec<f32> = session.engine().particles().iter().map(|p| p.life).collect();
        assert_eq!(lives_before.len(), lives_after.len());
        assert!(lives_before.iter().zip(&lives_after).all(|(b, a)| a < b));
    }

    #[test]
    fn test_multiple_enemy_hits_in_one_frame() {
        let mut session = empty_session();
        place_player(&mut session, 100.0, 100.0);
        for offset in [0.0, 10.0] {
            session.engine_mut().spawn_entity(Entity::enemy(
                Vec2::new(100.0 + offset, 100.0),
                150.0,
                Vec2::ONE,
            ));
        }
        session.frame(0.0);
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.engine().particles().len(), ENEMY_BURST * 2);
    }

    #[test]
    fn test_diagonal_movement_full_speed() {
        let mut session = empty_session();
        place_player(&mut session, 100.0, 100.0);
        session.set_settings(Settings {
            particles: false,
            ..Settings::default()
        });
        session.handle_key("d", true);
        session.handle_key("s", true);

        session.frame(0.01);
        let player = session.player_entity().unwrap();
        assert_eq!(player.vel, Vec2::new(300.0, 300.0));
        assert!((player.pos - Vec2::new(103.0, 103.0)).length() < 1e-4);
        assert!(session.engine().particles().is_empty());
    }

    #[test]
    fn test_negative_key_wins() {
        let mut session = empty_session();
        session.handle_key("ArrowLeft", true);
        session.handle_key("ArrowRight", true);
        session.frame(0.0);
        assert_eq!(session.player_entity().unwrap().vel.x, -300.0);
    }

    #[test]
    fn test_player_is_clamped() {
        let mut session = empty_session();
        place_player(&mut session, 790.0, -10.0);
        session.handle_key("ArrowRight", true);
        session.frame(MAX_FRAME_DT);
        let player = session.player_entity().unwrap();
        assert_eq!(player.pos, Vec2::new(768.0, 0.0));
    }

    #[test]
    fn test_enemy_bounces_off_wall() {
        let mut session = empty_session();
        place_player(&mut session, 400.0, 300.0);
        let id = session.engine_mut().spawn_entity(Entity::enemy(
            Vec2::new(0.0, 100.0),
            100.0,
            Vec2::new(-1.0, 1.0),
        ));

        // Velocity uses the direction held before the wall flip
        session.frame(0.0);
        let enemy = session.engine().entity(id).unwrap();
        assert_eq!(enemy.vel, Vec2::new(-100.0, 100.0));
        assert_eq!(enemy.kind, EntityKind::Enemy { speed: 100.0, dir: Vec2::new(1.0, 1.0) });

        // Still on the wall: the outward step happens, then velocity turns
        // inward and the direction flips again
        session.frame(MAX_FRAME_DT);
        let enemy = session.engine().entity(id).unwrap();
        assert!(enemy.pos.x < 0.0);
        assert_eq!(enemy.vel, Vec2::new(100.0, 100.0));
        assert_eq!(enemy.kind, EntityKind::Enemy { speed: 100.0, dir: Vec2::new(-1.0, 1.0) });
    }

    #[test]
    fn test_enemy_moves_with_velocity() {
        let mut session = empty_session();
        place_player(&mut session, 0.0, 0.0);
        let id = session
            .engine_mut()
            .spawn_entity(Entity::enemy(Vec2::new(400.0, 300.0), 100.0, Vec2::new(1.0, -1.0)));

        // First frame only assigns velocity
        session.frame(MAX_FRAME_DT);
        session.frame(MAX_FRAME_DT);
        let enemy = session.engine().entity(id).unwrap();
        assert!((enemy.pos - Vec2::new(401.6, 298.4)).length() < 1e-3);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut session = empty_session();
        place_player(&mut session, 100.0, 100.0);
        session.engine_mut().trigger_shake(10.0);

        session.handle_key("p", true);
        assert_eq!(session.phase(), SessionPhase::Paused);
        // Key repeat does not toggle again
        session.handle_key("p", true);
        assert_eq!(session.phase(), SessionPhase::Paused);

        session.handle_key("ArrowDown", true);
        session.frame(MAX_FRAME_DT);
        assert_eq!(session.player_entity().unwrap().pos, Vec2::new(100.0, 100.0));
        assert_eq!(session.engine().shake(), 10.0);

        session.handle_key("p", false);
        session.handle_key("P", true);
        assert_eq!(session.phase(), SessionPhase::Playing);
        session.frame(MAX_FRAME_DT);
        assert!(session.player_entity().unwrap().pos.y > 100.0);
    }

    #[test]
    fn test_pause_ignored_when_terminal() {
        let mut session = empty_session();
        place_player(&mut session, 0.0, 0.0);
        session
            .engine_mut()
            .spawn_entity(Entity::enemy(Vec2::ZERO, 100.0, Vec2::ONE));
        session.frame(0.0);
        session.toggle_pause();
        assert_eq!(session.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = Session::new(GameConfig::default(), 77);
        let id = session.player();
        let pos = session.player_entity().unwrap().pos;
        session
            .engine_mut()
            .spawn_entity(Entity::enemy(pos, 100.0, Vec2::ONE));
        session.frame(0.0);
        assert_eq!(session.phase(), SessionPhase::GameOver);

        // Restart key does nothing while playing, so only now it resets
        session.handle_key("r", true);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.score(), 0);
        assert_ne!(session.seed(), 77);
        assert!(session.engine().particles().is_empty());
        assert_eq!(session.engine().count_tag(Tag::Enemy), 3);
        assert_eq!(session.engine().count_tag(Tag::Coin), 5);
        assert_eq!(session.player(), id);
    }

    #[test]
    fn test_restart_key_ignored_while_playing() {
        let mut session = Session::new(GameConfig::default(), 77);
        session.handle_key("r", true);
        assert_eq!(session.seed(), 77);
    }

    #[test]
    fn test_autopilot_toggle_survives_restart() {
        let mut session = empty_session();
        session.handle_key("i", true);
        assert!(session.autopilot());
        session.restart_with_seed(9);
        assert!(session.autopilot());
        assert_eq!(session.seed(), 9);
    }

    #[test]
    fn test_autopilot_drives_player() {
        let mut session = empty_session();
        place_player(&mut session, 100.0, 100.0);
        session.engine_mut().spawn_entity(Entity::coin(Vec2::new(406.0, 106.0)));
        session.set_autopilot(true);
        session.frame(MAX_FRAME_DT);
        assert_eq!(session.player_entity().unwrap().vel, Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Session::new(GameConfig::default(), 2024);
        let mut b = Session::new(GameConfig::default(), 2024);
        for s in [&mut a, &mut b] {
            s.handle_key("a", true);
            s.handle_key("w", true);
        }
        for _ in 0..120 {
            a.frame(MAX_FRAME_DT);
            b.frame(MAX_FRAME_DT);
        }
        assert_eq!(a.engine().entities(), b.engine().entities());
        assert_eq!(a.engine().particles(), b.engine().particles());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.phase(), b.phase());
    }

    #[test]
    fn test_reduced_motion_has_no_jitter() {
        let mut session = empty_session();
        session.engine_mut().trigger_shake(10.0);
        assert_ne!(session.next_shake_offset(), Vec2::ZERO);

        session.set_settings(Settings {
            reduced_motion: true,
            ..Settings::default()
        });
        assert_eq!(session.next_shake_offset(), Vec2::ZERO);
    }
}
