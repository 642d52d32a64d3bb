//! Decision functions
//!
//! Anything that maps an observation to an enemy action index can drive the
//! environment: a scripted rule, a seeded random baseline, or a closure wrapping
//! a learned model. The environment validates the returned index.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::{EnemyAction, GameState, Observation, PlayerInput, nearest_enemies};

/// Observation index of (player x - nearest enemy x) / width
const NEAREST_DX: usize = 4;

/// Maps an observation to a discrete enemy action in `{0, 1, 2}`
pub trait DecisionFunction {
    fn decide(&mut self, observation: &Observation) -> usize;
}

impl<F> DecisionFunction for F
where
    F: FnMut(&Observation) -> usize,
{
    fn decide(&mut self, observation: &Observation) -> usize {
        (*self)(observation)
    }
}

/// Always holds course. Used when no model is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldPolicy;

impl DecisionFunction for HoldPolicy {
    fn decide(&mut self, _observation: &Observation) -> usize {
        EnemyAction::Hold.index()
    }
}

/// Steers every enemy toward the side the player is on, judged from the nearest enemy
#[derive(Debug, Clone, Copy)]
pub struct ChasePolicy {
    /// Relative offsets within this band count as aligned
    pub dead_zone: f32,
}

impl Default for ChasePolicy {
    fn default() -> Self {
        Self { dead_zone: 0.01 }
    }
}

impl DecisionFunction for ChasePolicy {
    fn decide(&mut self, observation: &Observation) -> usize {
        let dx = observation[NEAREST_DX];
        let action = if dx > self.dead_zone {
            EnemyAction::TurnRight
        } else if dx < -self.dead_zone {
            EnemyAction::TurnLeft
        } else {
            EnemyAction::Hold
        };
        action.index()
    }
}

/// Uniform random baseline on its own seeded stream
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl DecisionFunction for RandomPolicy {
    fn decide(&mut self, _observation: &Observation) -> usize {
        self.rng.random_range(0..ACTION_COUNT)
    }
}

/// Scripted player for demos and headless runs: slide under the nearest enemy
/// and fire once lined up.
pub fn player_autopilot(state: &GameState) -> Option<PlayerInput> {
    let player = state.player.as_ref()?;
    let center = player.rect.center();

    let Some(target) = nearest_enemies(center, &state.enemies).into_iter().next() else {
        return Some(PlayerInput::default());
    };

    let dx = target.rect.center().x - center.x;
    let aim_tolerance = BULLET_WIDTH;
    Some(PlayerInput {
        left: dx < -aim_tolerance,
        right: dx > aim_tolerance,
        shoot: dx.abs() <= ENEMY_SIZE / 2.0,
    })
}
