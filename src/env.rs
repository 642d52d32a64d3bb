//! Episode state machine
//!
//! `ShooterEnv` wraps the simulation in the reset/step contract shared by the
//! interactive game loop and automated training. Every call completes
//! synchronously; callers serialize access to one instance.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{EnvError, SettingsError};
use crate::policy::DecisionFunction;
use crate::settings::EnvSettings;
use crate::sim::{self, EnemyAction, GameState, Observation, PlayerInput, reward};
use crate::snapshot::RenderSnapshot;

/// Where the current episode stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodePhase {
    /// Never reset; steps are ignored
    Uninitialized,
    /// Freshly reset, no step taken yet
    Ready,
    /// At least one non-terminal step taken
    Running,
    /// An enemy reached the player
    Terminated,
    /// Step budget exhausted
    Truncated,
    /// Cancelled from outside
    Quit,
}

impl EpisodePhase {
    /// Terminal phases accept no further steps until `reset`
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EpisodePhase::Terminated | EpisodePhase::Truncated | EpisodePhase::Quit
        )
    }
}

/// Per-step info dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub score: u64,
    pub level: u32,
    pub quit: bool,
}

/// Everything a step returns
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

impl StepResult {
    /// True when the episode ended for any reason
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Outcome of a full episode played by `ShooterEnv::run_episode`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub seed: u64,
    pub total_reward: f64,
    pub steps: u64,
    pub score: u64,
    pub level: u32,
    pub terminated: bool,
    pub truncated: bool,
    pub quit: bool,
}

/// The arcade shooter environment
#[derive(Debug, Clone)]
pub struct ShooterEnv {
    state: GameState,
    phase: EpisodePhase,
    quit_requested: bool,
    /// Flags returned by the step that ended the episode
    final_flags: (bool, bool),
}

impl ShooterEnv {
    /// Build an environment; `seed` drives spawning until a reset supplies another
    pub fn new(settings: EnvSettings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            state: GameState::new(settings, seed),
            phase: EpisodePhase::Uninitialized,
            quit_requested: false,
            final_flags: (false, false),
        })
    }

    /// Length of every observation (14)
    pub const fn observation_len() -> usize {
        OBS_LEN
    }

    /// Number of discrete enemy actions (3)
    pub const fn action_count() -> usize {
        ACTION_COUNT
    }

    pub fn settings(&self) -> &EnvSettings {
        &self.state.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for front ends and scenario setup
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Start a new episode. A seed restarts the spawn stream.
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, StepInfo) {
        self.state.reset(seed);
        self.phase = EpisodePhase::Ready;
        self.quit_requested = false;
        self.final_flags = (false, false);
        log::info!(
            "Episode reset (seed {}, {} enemies)",
            self.state.spawner.seed(),
            self.state.enemies.len()
        );
        (self.observation(), self.info())
    }

    /// Flag the episode as cancelled. Seen at the top of the next step; one-way until reset.
    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            log::info!("Quit requested at step {}", self.state.step_count);
        }
        self.quit_requested = true;
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Current observation (zeros before the first reset)
    pub fn observation(&self) -> Observation {
        sim::encode(&self.state)
    }

    pub fn info(&self) -> StepInfo {
        StepInfo {
            score: self.state.score,
            level: self.state.level,
            quit: self.quit_requested,
        }
    }

    /// Step with a raw decision-function output. Actions outside `{0, 1, 2}` are rejected.
    pub fn step(
        &mut self,
        enemy_action: usize,
        player_input: Option<&PlayerInput>,
    ) -> Result<StepResult, EnvError> {
        let action = EnemyAction::try_from(enemy_action)?;
        Ok(self.step_action(action, player_input))
    }

    /// Advance one tick with an already-validated action
    pub fn step_action(
        &mut self,
        action: EnemyAction,
        player_input: Option<&PlayerInput>,
    ) -> StepResult {
        if self.quit_requested {
            self.phase = EpisodePhase::Quit;
            return self.idle_result(false, true);
        }

        match self.phase {
            EpisodePhase::Uninitialized => {
                log::warn!("step called before reset, ignoring");
                return self.idle_result(false, false);
            }
            EpisodePhase::Terminated | EpisodePhase::Truncated | EpisodePhase::Quit => {
                log::warn!("step called after the episode ended ({:?}), ignoring", self.phase);
                let (terminated, truncated) = self.final_flags;
                return self.idle_result(terminated, truncated);
            }
            EpisodePhase::Ready | EpisodePhase::Running => {}
        }

        if self.state.player.is_none() {
            log::warn!("step {}: player missing", self.state.step_count + 1);
        }

        let outcome = sim::tick(&mut self.state, action, player_input);
        let terminated = outcome.terminated;
        let truncated = self.state.step_count >= self.state.settings.max_episode_steps;

        self.phase = if terminated {
            EpisodePhase::Terminated
        } else if truncated {
            EpisodePhase::Truncated
        } else {
            EpisodePhase::Running
        };
        if self.phase.is_terminal() {
            self.final_flags = (terminated, truncated);
            log::debug!(
                "Episode ended at step {}: score {}, level {}",
                self.state.step_count,
                self.state.score,
                self.state.level
            );
        }

        StepResult {
            observation: self.observation(),
            reward: reward::compute(&self.state, &outcome),
            terminated,
            truncated,
            info: self.info(),
        }
    }

    /// Entity positions and HUD text for a front end to draw
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Play one episode to the end. `player` supplies per-tick input (return
    /// `None` for a passive player).
    pub fn run_episode<D, P>(
        &mut self,
        seed: Option<u64>,
        policy: &mut D,
        mut player: P,
    ) -> Result<EpisodeSummary, EnvError>
    where
        D: DecisionFunction + ?Sized,
        P: FnMut(&GameState) -> Option<PlayerInput>,
    {
        let (mut observation, _) = self.reset(seed);
        let mut total_reward = 0.0f64;

        loop {
            let action = policy.decide(&observation);
            let input = player(&self.state);
            let result = self.step(action, input.as_ref())?;
            total_reward += f64::from(result.reward);
            observation = result.observation;

            if result.done() || result.info.quit {
                return Ok(EpisodeSummary {
                    seed: self.state.spawner.seed(),
                    total_reward,
                    steps: self.state.step_count,
                    score: result.info.score,
                    level: result.info.level,
                    terminated: result.terminated,
                    truncated: result.truncated,
                    quit: result.info.quit,
                });
            }
        }
    }

    /// Result for a step that changes nothing
    fn idle_result(&self, terminated: bool, truncated: bool) -> StepResult {
        StepResult {
            observation: self.observation(),
            reward: 0.0,
            terminated,
            truncated,
            info: self.info(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Aabb, Enemy};

    fn env_with(initial_enemies: u32, max_steps: u64) -> ShooterEnv {
        let settings = EnvSettings::default()
            .with_initial_enemies(initial_enemies)
            .with_max_episode_steps(max_steps);
        ShooterEnv::new(settings, 11).unwrap()
    }

    fn parked_enemy(id: u32, x: f32, y: f32) -> Enemy {
        Enemy {
            id,
            rect: Aabb::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            downward_speed: 0.0,
            horizontal_step: ENEMY_HORIZONTAL_STEP,
        }
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = EnvSettings::default().with_max_episode_steps(0);
        assert!(ShooterEnv::new(settings, 1).is_err());
    }

    #[test]
    fn test_space_sizes() {
        assert_eq!(ShooterEnv::observation_len(), 14);
        assert_eq!(ShooterEnv::action_count(), 3);
    }

    #[test]
    fn test_reset_initial_state() {
        let mut env = env_with(5, 100);
        assert_eq!(env.phase(), EpisodePhase::Uninitialized);

        let (obs, info) = env.reset(Some(5));
        assert_eq!(env.phase(), EpisodePhase::Ready);
        assert_eq!(obs[0], 0.0);
        assert_eq!(env.state().enemies.len(), 5);
        assert_eq!(
            info,
            StepInfo {
                score: 0,
                level: 1,
                quit: false
            }
        );
    }

    #[test]
    fn test_step_before_reset_is_ignored() {
        let mut env = env_with(3, 100);
        let result = env.step(1, None).unwrap();
        assert_eq!(result.observation, [0.0; OBS_LEN]);
        assert_eq!(result.reward, 0.0);
        assert!(!result.terminated);
        assert!(!result.truncated);
        assert_eq!(env.state().step_count, 0);
        assert_eq!(env.phase(), EpisodePhase::Uninitialized);
    }

    #[test]
    fn test_invalid_action_rejected() {
        let mut env = env_with(3, 100);
        env.reset(Some(1));
        assert_eq!(
            env.step(3, None),
            Err(EnvError::InvalidAction { action: 3 })
        );
        assert_eq!(env.state().step_count, 0);
    }

    #[test]
    fn test_running_phase_after_step() {
        let mut env = env_with(3, 100);
        env.reset(Some(1));
        let result = env.step(1, None).unwrap();
        assert!(!result.done());
        assert_eq!(env.phase(), EpisodePhase::Running);
    }

    #[test]
    fn test_quit_short_circuits() {
        let mut env = env_with(3, 100);
        env.reset(Some(1));
        env.step(1, None).unwrap();
        let before = env.observation();

        env.request_quit();
        let result = env.step(2, None).unwrap();
        assert_eq!(result.observation, before);
        assert_eq!(result.reward, 0.0);
        assert!(!result.terminated);
        assert!(result.truncated);
        assert!(result.info.quit);
        assert_eq!(env.phase(), EpisodePhase::Quit);
        assert_eq!(env.state().step_count, 1);

        env.reset(None);
        assert!(!env.is_quit_requested());
        assert_eq!(env.phase(), EpisodePhase::Ready);
    }

    #[test]
    fn test_collision_terminates_and_freezes() {
        let mut env = env_with(1, 100);
        env.reset(Some(1));
        let (x, y) = {
            let player = env.state().player.as_ref().unwrap();
            (player.rect.left(), player.rect.top())
        };
        env.state_mut().enemies = vec![parked_enemy(1, x + 10.0, y + 10.0)];

        let result = env.step(1, None).unwrap();
        assert!(result.terminated);
        assert!(!result.truncated);
        assert!(result.reward >= 100.0);
        assert_eq!(env.phase(), EpisodePhase::Terminated);

        // Further steps have no effect
        let again = env.step(1, None).unwrap();
        assert!(again.terminated);
        assert_eq!(again.reward, 0.0);
        assert_eq!(env.state().step_count, 1);
    }

    #[test]
    fn test_step_budget_of_one_truncates() {
        let mut env = env_with(3, 1);
        env.reset(Some(9));
        let result = env.step(1, None).unwrap();
        assert!(result.truncated);
        assert_eq!(env.phase(), EpisodePhase::Truncated);
    }

    #[test]
    fn test_run_episode_summary() {
        let mut env = env_with(3, 50);
        let mut hold = |_: &Observation| 1usize;
        let summary = env.run_episode(Some(4), &mut hold, |_| None).unwrap();
        assert_eq!(summary.seed, 4);
        assert!(summary.steps <= 50);
        assert!(summary.terminated || summary.truncated);
        assert!(!summary.quit);
    }

    #[test]
    fn test_run_episode_propagates_bad_action() {
        let mut env = env_with(3, 50);
        let mut broken = |_: &Observation| 9usize;
        let err = env.run_episode(Some(4), &mut broken, |_| None).unwrap_err();
        assert_eq!(err, EnvError::InvalidAction { action: 9 });
    }
}
