//! Gameplay configuration
//!
//! Loaded from JSON. Every field has a default, so a config file only needs
//! the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Arena width in pixels
    pub width: f32,
    /// Arena height in pixels
    pub height: f32,
    /// Coins needed to win
    pub win_score: u32,
    /// Coins on the field at session start
    pub coin_count: u32,
    /// Enemies on the field at session start
    pub enemy_count: u32,
    /// Player speed (units/s, per axis)
    pub player_speed: f32,
    /// Slowest enemy speed
    pub enemy_speed_min: f32,
    /// Random extra enemy speed, uniform in [0, range)
    pub enemy_speed_range: f32,
    /// Upper bound on a single frame step (seconds)
    pub max_frame_dt: f32,
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            win_score: WIN_SCORE,
            coin_count: COIN_COUNT,
            enemy_count: ENEMY_COUNT,
            player_speed: PLAYER_SPEED,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_range: ENEMY_SPEED_RANGE,
            max_frame_dt: MAX_FRAME_DT,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the values the session relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let largest = PLAYER_SIZE.max(COIN_SIZE).max(ENEMY_SIZE);
        if !(self.width > largest && self.height > largest) {
            return Err(ConfigError::Invalid(format!(
                "arena {}x{} must be larger than {largest} in both axes",
                self.width, self.height
            )));
        }
        if self.win_score == 0 {
            return Err(ConfigError::Invalid("win_score must be at least 1".into()));
        }
        if !(self.player_speed >= 0.0) {
            return Err(ConfigError::Invalid("player_speed must be >= 0".into()));
        }
        if !(self.enemy_speed_min >= 0.0 && self.enemy_speed_range >= 0.0) {
            return Err(ConfigError::Invalid("enemy speeds must be >= 0".into()));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(ConfigError::Invalid("max_frame_dt must be > 0".into()));
        }
        Ok(())
    }
}
