//! Enemy spawning
//!
//! All randomness in the simulation comes from the spawner's seeded PCG stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Aabb, Arena, Enemy};
use crate::consts::*;

/// Creates enemy waves and picks wrap positions
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
    next_id: u32,
    speed_min: f32,
    speed_max: f32,
}

impl Spawner {
    pub fn new(seed: u64, speed_min: f32, speed_max: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            speed_min,
            speed_max,
        }
    }

    /// Seed of the current stream
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the random stream from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.restart_ids();
    }

    /// Restart entity numbering (the random stream keeps going)
    pub fn restart_ids(&mut self) {
        self.next_id = 1;
    }

    /// Number of enemies in the wave for `level` (level 1 is the first wave)
    pub fn wave_size(initial_enemies: u32, level: u32) -> u32 {
        initial_enemies + level.saturating_sub(1) * ENEMIES_PER_LEVEL
    }

    /// Create `count` enemies staggered just above the top edge
    pub fn spawn_enemies(&mut self, count: u32, arena: &Arena) -> Vec<Enemy> {
        (0..count).map(|_| self.spawn_enemy(arena)).collect()
    }

    pub fn spawn_enemy(&mut self, arena: &Arena) -> Enemy {
        let x = self.random_x(arena);
        let y = self
            .rng
            .random_range(-3.0 * ENEMY_SIZE..-ENEMY_SIZE);
        let downward_speed = self.rng.random_range(self.speed_min..=self.speed_max);

        let id = self.next_id;
        self.next_id += 1;

        Enemy {
            id,
            rect: Aabb::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            downward_speed,
            horizontal_step: ENEMY_HORIZONTAL_STEP,
        }
    }

    /// Fresh top-left position for an enemy that fell past the bottom
    pub fn wrap_position(&mut self, arena: &Arena) -> Vec2 {
        let x = self.random_x(arena);
        let y = self
            .rng
            .random_range(-2.0 * ENEMY_SIZE..-ENEMY_SIZE);
        Vec2::new(x, y)
    }

    fn random_x(&mut self, arena: &Arena) -> f32 {
        self.rng.random_range(0.0..arena.width - ENEMY_SIZE)
    }
}
