//! Observation encoder
//!
//! Layout (length `OBS_LEN` = 14, every element in `[-1, 1]`):
//! - `[0..2]`: player center x, y mapped to `[-1, 1]`
//! - then for each of the `MAX_OBSERVED_ENEMIES` nearest enemies:
//!   enemy center x, enemy center y, (player x - enemy x) / width,
//!   (player y - enemy y) / height
//! - missing enemy slots are zero-filled

use glam::Vec2;

use super::state::{Enemy, GameState};
use crate::consts::*;
use crate::{relative_offset, to_unit_range};

/// Fixed-shape observation handed to decision functions
pub type Observation = [f32; OBS_LEN];

/// Enemies ordered by center distance to `origin`, nearest first.
/// Equal distances keep creation order.
pub fn nearest_enemies(origin: Vec2, enemies: &[Enemy]) -> Vec<&Enemy> {
    let mut ranked: Vec<(f32, &Enemy)> = enemies
        .iter()
        .map(|enemy| (enemy.rect.center().distance(origin), enemy))
        .collect();
    ranked.sort_by(|(da, a), (db, b)| da.total_cmp(db).then(a.id.cmp(&b.id)));
    ranked.into_iter().map(|(_, enemy)| enemy).collect()
}

/// Project the world into a fixed-length vector. Returns all zeros when there
/// is no player yet.
pub fn encode(state: &GameState) -> Observation {
    let mut obs = [0.0; OBS_LEN];
    let Some(player) = state.player.as_ref() else {
        log::warn!("Observation requested with no player, returning zeros");
        return obs;
    };

    let width = state.arena.width;
    let height = state.arena.height;
    let center = player.rect.center();

    obs[0] = to_unit_range(center.x, width);
    obs[1] = to_unit_range(center.y, height);

    for (slot, enemy) in nearest_enemies(center, &state.enemies)
        .into_iter()
        .take(MAX_OBSERVED_ENEMIES)
        .enumerate()
    {
        let enemy_center = enemy.rect.center();
        let base = 2 + slot * OBS_ENEMY_DATA_SIZE;
        obs[base] = to_unit_range(enemy_center.x, width);
        obs[base + 1] = to_unit_range(enemy_center.y, height);
        obs[base + 2] = relative_offset(center.x - enemy_center.x, width);
        obs[base + 3] = relative_offset(center.y - enemy_center.y, height);
    }

    obs
}
