//! RL Shooter - an arcade shooter whose enemies are driven by a decision function
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, observation, reward)
//! - `env`: Episode state machine exposing the reset/step contract
//! - `policy`: Decision functions (scripted or learned) and the player autopilot
//! - `settings`: Data-driven environment configuration
//! - `snapshot`: Render boundary (entity positions and HUD text, no drawing)
//! - `highscores`: Plain-text high score persistence

pub mod env;
pub mod error;
pub mod highscores;
pub mod policy;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use env::{EpisodePhase, EpisodeSummary, ShooterEnv, StepInfo, StepResult};
pub use error::{EnvError, SettingsError};
pub use highscores::HighScore;
pub use policy::{ChasePolicy, DecisionFunction, HoldPolicy, RandomPolicy};
pub use settings::{EnvPreset, EnvSettings};
pub use sim::{EnemyAction, Observation, PlayerInput};

/// Game configuration constants
pub mod consts {
    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Frame rate advertised to interactive front ends
    pub const RENDER_FPS: u32 = 120;

    /// Player box and movement
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Gap between the player's bottom edge and the screen bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 50.0;
    /// Ticks between shots
    pub const SHOOT_DELAY: u32 = 15;

    /// Enemy box and movement
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_HORIZONTAL_STEP: f32 = 5.0;
    pub const ENEMY_SPEED_MIN: f32 = 1.5;
    pub const ENEMY_SPEED_MAX: f32 = 3.5;

    /// Projectile box and movement
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 20.0;
    pub const BULLET_SPEED: f32 = 10.0;

    /// Scoring
    pub const SCORE_PER_KILL: u64 = 50;
    pub const SCORE_PER_WAVE: u64 = 100;
    /// Extra enemies per level beyond the first
    pub const ENEMIES_PER_LEVEL: u32 = 2;

    /// Observation layout
    pub const MAX_OBSERVED_ENEMIES: usize = 3;
    pub const OBS_ENEMY_DATA_SIZE: usize = 4;
    pub const OBS_LEN: usize = 2 + MAX_OBSERVED_ENEMIES * OBS_ENEMY_DATA_SIZE;

    /// Number of discrete enemy actions (left, hold, right)
    pub const ACTION_COUNT: usize = 3;

    /// Episode defaults
    pub const DEFAULT_INITIAL_ENEMIES: u32 = 5;
    pub const DEFAULT_MAX_EPISODE_STEPS: u64 = 2000;
}

/// Map a coordinate in `[0, extent]` to `[-1, 1]`, clamped
#[inline]
pub fn to_unit_range(value: f32, extent: f32) -> f32 {
    (value / extent * 2.0 - 1.0).clamp(-1.0, 1.0)
}

/// Ratio `delta / extent` clamped to `[-1, 1]`
#[inline]
pub fn relative_offset(delta: f32, extent: f32) -> f32 {
    (delta / extent).clamp(-1.0, 1.0)
}
