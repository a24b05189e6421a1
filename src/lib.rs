//! Coin Dodge - a minimal real-time 2D arcade engine
//!
//! Core modules:
//! - `sim`: Simulation (entities, particles, collisions, session state machine)
//! - `renderer`: Abstract drawing surface and scene rendering
//! - `platform`: Browser canvas and keyboard glue
//! - `game_loop`: Frame scheduling and dt clamping
//! - `config` / `settings`: Gameplay tuning and visual preferences

pub mod color;
pub mod config;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use color::Color;
pub use config::{ConfigError, GameConfig};
pub use game_loop::{FrameRequest, FrameScheduler, GameLoop, ManualScheduler};
pub use settings::{QualityPreset, Settings};

/// 2D vector used throughout the crate.
///
/// `+`, `-` and `* f32` all return new values, so the type behaves as an
/// immutable value.
pub type Vector2 = glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Largest frame step fed to the simulation (~60 Hz)
    pub const MAX_FRAME_DT: f32 = 0.016;

    /// Coins needed to win a session
    pub const WIN_SCORE: u32 = 10;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 300.0;

    /// Coin defaults
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_COUNT: u32 = 5;

    /// Enemy defaults (speed is MIN + U[0, RANGE))
    pub const ENEMY_SIZE: f32 = 24.0;
    pub const ENEMY_COUNT: u32 = 3;
    pub const ENEMY_SPEED_MIN: f32 = 150.0;
    pub const ENEMY_SPEED_RANGE: f32 = 100.0;

    /// Downward acceleration applied to particles (units/s²)
    pub const PARTICLE_GRAVITY: f32 = 200.0;
    /// Default particle pool size
    pub const MAX_PARTICLES: usize = 512;

    /// Shake decay rate (units/s)
    pub const SHAKE_DECAY: f32 = 30.0;

    /// Effects fired on pickups and hits
    pub const COIN_BURST: usize = 15;
    pub const COIN_SHAKE: f32 = 5.0;
    pub const ENEMY_BURST: usize = 20;
    pub const ENEMY_SHAKE: f32 = 15.0;
    pub const DEFAULT_BURST: usize = 10;
    pub const DEFAULT_SHAKE: f32 = 10.0;

    /// Player trail
    pub const TRAIL_CHANCE: f64 = 0.5;
    pub const TRAIL_LIFE: f32 = 0.3;
    pub const TRAIL_JITTER: f32 = 50.0;
}
