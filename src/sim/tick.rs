//! Fixed timestep simulation tick
//!
//! Advances the world by one tick: input, kinematics, collisions, wave refill.

use serde::{Deserialize, Serialize};

use super::collision;
use super::spawner::Spawner;
use super::state::{EnemyAction, GameState, Projectile};
use crate::consts::*;

/// Player input for a single tick (from an interactive front end or an autopilot)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

impl PlayerInput {
    /// Horizontal speed this input asks for; left wins when both are held
    pub fn speed_x(&self) -> f32 {
        if self.left {
            -PLAYER_SPEED
        } else if self.right {
            PLAYER_SPEED
        } else {
            0.0
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// An enemy reached the player
    pub terminated: bool,
    /// Enemies destroyed by projectiles
    pub enemies_destroyed: u32,
    /// The enemy set emptied and the next wave was spawned
    pub wave_cleared: bool,
    /// A projectile was fired this tick
    pub fired: bool,
    /// Enemies that fell past the bottom and wrapped to the top
    pub enemies_wrapped: u32,
}

/// Advance the game state by one tick
///
/// `action` is applied to every live enemy. With no `input` the player stands still.
pub fn tick(state: &mut GameState, action: EnemyAction, input: Option<&PlayerInput>) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    state.step_count += 1;

    // Player input
    match state.player.as_mut() {
        Some(player) => {
            player.speed_x = input.map(PlayerInput::speed_x).unwrap_or(0.0);
            if input.is_some_and(|i| i.shoot) && player.attempt_shoot() {
                state.projectiles.push(Projectile::new(player.muzzle()));
                outcome.fired = true;
            }
        }
        None => log::warn!("tick {}: no player, skipping player input", state.step_count),
    }

    // Kinematics
    if let Some(player) = state.player.as_mut() {
        player.update(&state.arena);
    }
    state.projectiles.retain_mut(Projectile::update);
    for enemy in &mut state.enemies {
        if enemy.update(action, &state.arena, &mut state.spawner) {
            outcome.enemies_wrapped += 1;
        }
    }

    // Collisions
    let report = collision::resolve(
        state.player.as_ref(),
        &mut state.enemies,
        &mut state.projectiles,
    );
    if report.player_hit {
        log::info!(
            "tick {}: player collided with {} enemies",
            state.step_count,
            report.enemies_rammed
        );
        outcome.terminated = true;
    }
    outcome.enemies_destroyed = report.enemies_destroyed;
    state.score += u64::from(report.enemies_destroyed) * SCORE_PER_KILL;

    // Wave refill
    if state.enemies.is_empty() && !outcome.terminated {
        state.level += 1;
        state.score += SCORE_PER_WAVE;
        let count = Spawner::wave_size(state.settings.initial_enemies, state.level);
        let wave = state.spawner.spawn_enemies(count, &state.arena);
        state.enemies.extend(wave);
        outcome.wave_cleared = true;
        log::debug!("Wave cleared, level {} with {} enemies", state.level, count);
    }

    log::trace!(
        "tick {}: enemies={} projectiles={} score={}",
        state.step_count,
        state.enemies.len(),
        state.projectiles.len(),
        state.score
    );

    outcome
}
