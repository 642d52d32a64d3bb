//! Environment settings
//!
//! Persisted as JSON so training runs and the interactive game share one format.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Launch presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EnvPreset {
    /// Human-facing game
    #[default]
    Interactive,
    /// Fast headless episodes for fitting a policy
    Training,
    /// Longer episodes for watching a fitted policy play
    Evaluation,
}

impl EnvPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvPreset::Interactive => "Interactive",
            EnvPreset::Training => "Training",
            EnvPreset::Evaluation => "Evaluation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "interactive" | "play" => Some(EnvPreset::Interactive),
            "training" | "train" => Some(EnvPreset::Training),
            "evaluation" | "eval" => Some(EnvPreset::Evaluation),
            _ => None,
        }
    }

    /// Enemies in the first wave
    pub fn initial_enemies(&self) -> u32 {
        match self {
            EnvPreset::Interactive => DEFAULT_INITIAL_ENEMIES,
            EnvPreset::Training => 3,
            EnvPreset::Evaluation => 3,
        }
    }

    /// Step budget before truncation
    pub fn max_episode_steps(&self) -> u64 {
        match self {
            EnvPreset::Interactive => DEFAULT_MAX_EPISODE_STEPS,
            EnvPreset::Training => 1000,
            EnvPreset::Evaluation => 1500,
        }
    }
}

/// Environment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvSettings {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Enemies spawned at reset; later waves add `ENEMIES_PER_LEVEL` per level
    pub initial_enemies: u32,
    /// Truncate once the step counter reaches this value
    pub max_episode_steps: u64,
    /// Ticks the player must wait between shots
    pub shoot_delay: u32,
    /// Downward speed range sampled per enemy at spawn (inclusive)
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            initial_enemies: DEFAULT_INITIAL_ENEMIES,
            max_episode_steps: DEFAULT_MAX_EPISODE_STEPS,
            shoot_delay: SHOOT_DELAY,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
        }
    }
}

impl EnvSettings {
    /// Create settings from a launch preset
    pub fn from_preset(preset: EnvPreset) -> Self {
        Self {
            initial_enemies: preset.initial_enemies(),
            max_episode_steps: preset.max_episode_steps(),
            ..Self::default()
        }
    }

    /// Builder-style override for the first wave size
    pub fn with_initial_enemies(mut self, initial_enemies: u32) -> Self {
        self.initial_enemies = initial_enemies;
        self
    }

    /// Builder-style override for the step budget
    pub fn with_max_episode_steps(mut self, max_episode_steps: u64) -> Self {
        self.max_episode_steps = max_episode_steps;
        self
    }

    /// Check that the world these settings describe can actually be built
    pub fn validate(&self) -> Result<(), SettingsError> {
        let min_width = PLAYER_SIZE.max(ENEMY_SIZE);
        if !self.screen_width.is_finite() || self.screen_width <= min_width {
            return Err(invalid(
                "screen_width",
                format!("must be finite and larger than {min_width}"),
            ));
        }
        let min_height = PLAYER_SIZE + PLAYER_BOTTOM_MARGIN;
        if !self.screen_height.is_finite() || self.screen_height <= min_height {
            return Err(invalid(
                "screen_height",
                format!("must be finite and larger than {min_height}"),
            ));
        }
        if self.max_episode_steps == 0 {
            return Err(invalid("max_episode_steps", "must be at least 1".to_string()));
        }
        if !self.enemy_speed_min.is_finite() || self.enemy_speed_min <= 0.0 {
            return Err(invalid("enemy_speed_min", "must be finite and positive".to_string()));
        }
        if !self.enemy_speed_max.is_finite() || self.enemy_speed_max < self.enemy_speed_min {
            return Err(invalid(
                "enemy_speed_max",
                "must be finite and not below enemy_speed_min".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { field, reason }
}
