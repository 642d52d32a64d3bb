//! Reward function
//!
//! Scored from the enemy controller's side. Reaching the player ends the
//! episode with a large reward; enemies lost to projectiles are penalized.

use super::state::GameState;
use super::tick::TickOutcome;

/// Reward for the tick that ends the episode by collision
pub const TERMINATION_REWARD: f32 = 100.0;
/// Charged on every tick that does not terminate
pub const TICK_PENALTY: f32 = 0.1;
/// Charged per enemy destroyed by a projectile
pub const KILL_PENALTY: f32 = 20.0;
/// Maximum proximity bonus (enemy center on the player center)
pub const PROXIMITY_SCALE: f32 = 5.0;

/// Distance from the player center to the nearest enemy center, if both exist
pub fn min_enemy_distance(state: &GameState) -> Option<f32> {
    let player = state.player.as_ref()?;
    let center = player.rect.center();
    state
        .enemies
        .iter()
        .map(|enemy| enemy.rect.center().distance(center))
        .min_by(f32::total_cmp)
}

/// Bonus in `[0, PROXIMITY_SCALE]`, zero beyond one screen height
pub fn proximity_bonus(min_distance: f32, screen_height: f32) -> f32 {
    ((screen_height - min_distance) / screen_height * PROXIMITY_SCALE).max(0.0)
}

/// Scalar reward from one tick's outcome. Stateless.
pub fn reward(
    terminated: bool,
    enemies_destroyed: u32,
    min_distance: Option<f32>,
    screen_height: f32,
) -> f32 {
    let mut reward = if terminated {
        TERMINATION_REWARD
    } else {
        -TICK_PENALTY
    };

    reward -= enemies_destroyed as f32 * KILL_PENALTY;

    if let Some(distance) = min_distance {
        reward += proximity_bonus(distance, screen_height);
    }

    reward
}

/// Reward for the tick that produced `outcome`, measured on the post-tick state
pub fn compute(state: &GameState, outcome: &TickOutcome) -> f32 {
    reward(
        outcome.terminated,
        outcome.enemies_destroyed,
        min_enemy_distance(state),
        state.arena.height,
    )
}
