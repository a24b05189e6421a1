//! Visual preferences
//!
//! Cosmetic only: nothing here changes gameplay outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Particle pool size for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 128,
            QualityPreset::Medium => 512,
            QualityPreset::High => 2048,
        }
    }

    /// Whether the background grid is drawn
    pub fn grid_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
        })
    }
}

impl FromStr for QualityPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => Err(ConfigError::Invalid(format!("unknown quality preset {other:?}"))),
        }
    }
}

/// Visual settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Screen shake on pickups and hits
    pub screen_shake: bool,
    /// Particle effects (bursts and player trail)
    pub particles: bool,
    /// Score / coin / enemy counters
    pub show_hud: bool,
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            particles: true,
            show_hud: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Shake is suppressed under reduced motion
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Particle pool size; zero disables every effect particle
    pub fn max_particles(&self) -> usize {
        match self.particles {
            true => self.quality.max_particles(),
            false => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parse() {
        assert_eq!("LOW".parse::<QualityPreset>().ok(), Some(QualityPreset::Low));
        assert_eq!(" med".parse::<QualityPreset>().ok(), Some(QualityPreset::Medium));
        assert!(matches!(
            "ultra".parse::<QualityPreset>(),
            Err(ConfigError::Invalid(_))
        ));
        assert_eq!(QualityPreset::High.to_string(), "high");
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(Settings::default().effective_screen_shake());
    }

    #[test]
    fn test_particles_off_means_no_pool() {
        let settings = Settings {
            particles: false,
            ..Settings::from_preset(QualityPreset::High)
        };
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(Settings::from_preset(QualityPreset::Low).max_particles(), 128);
    }

    #[test]
    fn test_settings_json() {
        let settings: Settings = serde_json::from_str(r#"{ "quality": "low" }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.show_hud);
    }
}
