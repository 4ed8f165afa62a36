//! Game settings
//!
//! Loaded from an optional JSON file by the host and copied into every
//! session so snapshots are self-describing.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shortest allowed average gap between power-up spawns (seconds)
pub const MIN_POWERUP_INTERVAL: f32 = 1.0;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier applied to each wave's zombie quota
    pub fn quota_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Multiplier applied to zombie movement speed
    pub fn speed_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.85,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.2,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === World ===
    pub map_width: f32,
    pub map_height: f32,

    // === View ===
    /// Visible area in map units (the canvas size)
    pub view_width: f32,
    pub view_height: f32,

    // === Spawning ===
    /// Average seconds between power-up spawns
    pub powerup_interval: f32,
    /// Teleport or cull zombies that wander too far from the player
    pub stuck_remediation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            map_width: 4000.0,
            map_height: 4000.0,

            view_width: 1280.0,
            view_height: 720.0,

            powerup_interval: 30.0,
            stuck_remediation: true,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn map_size(&self) -> Vec2 {
        Vec2::new(self.map_width, self.map_height)
    }

    pub fn view_size(&self) -> Vec2 {
        Vec2::new(self.view_width, self.view_height)
    }

    /// Parse settings, replacing out-of-range values with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    /// Replace any unusable value with its default, logging each one
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        let positive = |name: &str, value: &mut f32, fallback: f32| {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Invalid {} {}, using {}", name, value, fallback);
                *value = fallback;
            }
        };
        positive("map_width", &mut self.map_width, defaults.map_width);
        positive("map_height", &mut self.map_height, defaults.map_height);
        positive("view_width", &mut self.view_width, defaults.view_width);
        positive("view_height", &mut self.view_height, defaults.view_height);

        if !self.powerup_interval.is_finite() || self.powerup_interval < MIN_POWERUP_INTERVAL {
            log::warn!(
                "Invalid powerup_interval {}, using {}",
                self.powerup_interval,
                defaults.powerup_interval
            );
            self.powerup_interval = defaults.powerup_interval;
        }
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        assert_eq!(Difficulty::Easy.as_str(), "Easy");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"difficulty": "Hard", "map_width": 2000.0}"#)
            .expect("valid settings");
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.map_size(), Vec2::new(2000.0, 4000.0));
        assert_eq!(settings.powerup_interval, 30.0);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let settings = Settings::from_json(
            r#"{"powerup_interval": 0.0, "map_width": -5.0, "view_height": 0.0, "map_height": 3000.0}"#,
        )
        .expect("valid settings");
        let defaults = Settings::default();
        assert_eq!(settings.powerup_interval, defaults.powerup_interval);
        assert_eq!(settings.map_width, defaults.map_width);
        assert_eq!(settings.view_height, defaults.view_height);
        assert_eq!(settings.map_height, 3000.0);

        let short = Settings::from_json(r#"{"powerup_interval": 2.5}"#).expect("valid settings");
        assert_eq!(short.powerup_interval, 2.5);
    }

    #[test]
    fn test_zero_interval_does_not_flood_powerups() {
        use crate::sim::{GameState, TickInput, tick};

        let settings = Settings::from_json(r#"{"powerup_interval": 0.0}"#).expect("valid settings");
        let mut state = GameState::new(3, settings);
        state.start();
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        }
        assert!(state.powerups.len() <= 1);
    }

    #[test]
    fn test_from_difficulty() {
        let settings = Settings::from_difficulty(Difficulty::Easy);
        assert!(settings.difficulty.quota_scale() < 1.0);
        assert_eq!(settings.view_size(), Vec2::new(1280.0, 720.0));
    }
}
