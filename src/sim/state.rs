//! Game state and entity model
//!
//! The entity set is closed (player, enemies, projectiles), so each kind carries
//! its own `update` and the tick calls them explicitly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use crate::consts::*;
use crate::error::EnvError;
use crate::settings::EnvSettings;

/// Playable area, origin at the top-left corner, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn from_settings(settings: &EnvSettings) -> Self {
        Self {
            width: settings.screen_width,
            height: settings.screen_height,
        }
    }
}

/// Axis-aligned bounding box (top-left position + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: boxes that merely share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Keep the box inside `[0, width]` horizontally
    pub fn clamp_horizontal(&mut self, width: f32) {
        if self.left() < 0.0 {
            self.pos.x = 0.0;
        }
        if self.right() > width {
            self.pos.x = width - self.size.x;
        }
    }
}

/// Entity tag used at the render boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
}

/// Discrete enemy control, applied uniformly to every live enemy in a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyAction {
    TurnLeft,
    #[default]
    Hold,
    TurnRight,
}

impl EnemyAction {
    pub const ALL: [EnemyAction; ACTION_COUNT] =
        [EnemyAction::TurnLeft, EnemyAction::Hold, EnemyAction::TurnRight];

    /// Wire index (0 = left, 1 = hold, 2 = right)
    pub fn index(self) -> usize {
        match self {
            EnemyAction::TurnLeft => 0,
            EnemyAction::Hold => 1,
            EnemyAction::TurnRight => 2,
        }
    }

    /// -1, 0 or +1
    pub fn horizontal_sign(self) -> f32 {
        match self {
            EnemyAction::TurnLeft => -1.0,
            EnemyAction::Hold => 0.0,
            EnemyAction::TurnRight => 1.0,
        }
    }
}

impl TryFrom<usize> for EnemyAction {
    type Error = EnvError;

    fn try_from(action: usize) -> Result<Self, Self::Error> {
        EnemyAction::ALL
            .get(action)
            .copied()
            .ok_or(EnvError::InvalidAction { action })
    }
}

/// The player ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Aabb,
    pub speed_x: f32,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    pub shoot_delay: u32,
}

impl Player {
    /// Spawn centered horizontally, `PLAYER_BOTTOM_MARGIN` above the bottom edge
    pub fn new(arena: &Arena, shoot_delay: u32) -> Self {
        let x = arena.width / 2.0 - PLAYER_SIZE / 2.0;
        let y = arena.height - PLAYER_BOTTOM_MARGIN - PLAYER_SIZE;
        Self {
            rect: Aabb::new(x, y, PLAYER_SIZE, PLAYER_SIZE),
            speed_x: 0.0,
            shoot_cooldown: 0,
            shoot_delay,
        }
    }

    pub fn update(&mut self, arena: &Arena) {
        self.rect.pos.x += self.speed_x;
        self.rect.clamp_horizontal(arena.width);
        if self.shoot_cooldown > 0 {
            self.shoot_cooldown -= 1;
        }
    }

    /// The only rate limit on firing: succeeds when the cooldown has run out
    pub fn attempt_shoot(&mut self) -> bool {
        if self.shoot_cooldown == 0 {
            self.shoot_cooldown = self.shoot_delay;
            true
        } else {
            false
        }
    }

    /// Where a fired projectile appears (center x, top edge)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.rect.center().x, self.rect.top())
    }
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Creation order; breaks ties in nearest-enemy ranking
    pub id: u32,
    pub rect: Aabb,
    /// Sampled once at spawn
    pub downward_speed: f32,
    pub horizontal_step: f32,
}

impl Enemy {
    /// Advance one tick. Enemies that fall past the bottom wrap back to the top.
    /// Returns true when a wrap happened.
    pub fn update(&mut self, action: EnemyAction, arena: &Arena, spawner: &mut Spawner) -> bool {
        self.rect.pos.y += self.downward_speed;
        self.rect.pos.x += action.horizontal_sign() * self.horizontal_step;
        self.rect.clamp_horizontal(arena.width);

        if self.rect.top() > arena.height {
            self.rect.pos = spawner.wrap_position(arena);
            return true;
        }
        false
    }
}

/// A player bullet travelling straight up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Aabb,
    pub speed: f32,
}

impl Projectile {
    /// Centered on `muzzle.x` with its bottom edge at `muzzle.y`
    pub fn new(muzzle: Vec2) -> Self {
        Self {
            rect: Aabb::new(
                muzzle.x - BULLET_WIDTH / 2.0,
                muzzle.y - BULLET_HEIGHT,
                BULLET_WIDTH,
                BULLET_HEIGHT,
            ),
            speed: BULLET_SPEED,
        }
    }

    /// Advance one tick; returns false once the projectile has left the top edge
    pub fn update(&mut self) -> bool {
        self.rect.pos.y -= self.speed;
        !self.is_off_screen()
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() < 0.0
    }
}

/// Complete simulation state for one environment instance
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: EnvSettings,
    pub arena: Arena,
    /// `None` until the first reset
    pub player: Option<Player>,
    /// Kept in creation order
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub score: u64,
    /// Starts at 1
    pub level: u32,
    pub step_count: u64,
    pub spawner: Spawner,
}

impl GameState {
    /// An empty world with no player; call `reset` before ticking
    pub fn new(settings: EnvSettings, seed: u64) -> Self {
        let spawner = Spawner::new(seed, settings.enemy_speed_min, settings.enemy_speed_max);
        Self {
            arena: Arena::from_settings(&settings),
            settings,
            player: None,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            level: 1,
            step_count: 0,
            spawner,
        }
    }

    /// Rebuild the player, clear every entity set and spawn the first wave.
    /// A seed restarts the spawn stream; without one the stream continues.
    pub fn reset(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => self.spawner.reseed(seed),
            None => self.spawner.restart_ids(),
        }

        self.player = Some(Player::new(&self.arena, self.settings.shoot_delay));
        self.enemies.clear();
        self.projectiles.clear();
        self.score = 0;
        self.level = 1;
        self.step_count = 0;

        let count = Spawner::wave_size(self.settings.initial_enemies, self.level);
        let wave = self.spawner.spawn_enemies(count, &self.arena);
        self.enemies.extend(wave);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Arena {
        Arena {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let touching = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Aabb::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(overlapping.overlaps(&a));
    }

    #[test]
    fn test_player_spawn_position() {
        let player = Player::new(&arena(), SHOOT_DELAY);
        assert_eq!(player.rect.center().x, 400.0);
        assert_eq!(player.rect.bottom(), 550.0);
    }

    #[test]
    fn test_player_clamped_to_screen() {
        let arena = arena();
        let mut player = Player::new(&arena, SHOOT_DELAY);
        player.speed_x = -PLAYER_SPEED;
        for _ in 0..200 {
            player.update(&arena);
        }
        assert_eq!(player.rect.left(), 0.0);

        player.speed_x = PLAYER_SPEED;
        for _ in 0..400 {
            player.update(&arena);
        }
        assert_eq!(player.rect.right(), SCREEN_WIDTH);
    }

    #[test]
    fn test_attempt_shoot_respects_cooldown() {
        let arena = arena();
        let mut player = Player::new(&arena, 3);
        assert!(player.attempt_shoot());
        assert!(!player.attempt_shoot());

        for _ in 0..3 {
            player.update(&arena);
        }
        assert_eq!(player.shoot_cooldown, 0);
        assert!(player.attempt_shoot());
    }

    #[test]
    fn test_enemy_moves_and_clamps() {
        let arena = arena();
        let mut spawner = Spawner::new(1, ENEMY_SPEED_MIN, ENEMY_SPEED_MAX);
        let mut enemy = Enemy {
            id: 1,
            rect: Aabb::new(2.0, 100.0, ENEMY_SIZE, ENEMY_SIZE),
            downward_speed: 2.0,
            horizontal_step: ENEMY_HORIZONTAL_STEP,
        };

        enemy.update(EnemyAction::TurnLeft, &arena, &mut spawner);
        assert_eq!(enemy.rect.left(), 0.0);
        assert_eq!(enemy.rect.top(), 102.0);

        enemy.update(EnemyAction::TurnRight, &arena, &mut spawner);
        assert_eq!(enemy.rect.left(), 5.0);

        enemy.update(EnemyAction::Hold, &arena, &mut spawner);
        assert_eq!(enemy.rect.left(), 5.0);
        assert_eq!(enemy.rect.top(), 106.0);
    }

    #[test]
    fn test_enemy_wraps_instead_of_despawning() {
        let arena = arena();
        let mut spawner = Spawner::new(7, ENEMY_SPEED_MIN, ENEMY_SPEED_MAX);
        let mut enemy = Enemy {
            id: 1,
            rect: Aabb::new(300.0, SCREEN_HEIGHT - 1.0, ENEMY_SIZE, ENEMY_SIZE),
            downward_speed: 3.0,
            horizontal_step: ENEMY_HORIZONTAL_STEP,
        };

        assert!(enemy.update(EnemyAction::Hold, &arena, &mut spawner));
        assert!(enemy.rect.top() >= -2.0 * ENEMY_SIZE && enemy.rect.top() < -ENEMY_SIZE);
        assert!(enemy.rect.left() >= 0.0 && enemy.rect.right() <= SCREEN_WIDTH);
    }

    #[test]
    fn test_projectile_leaves_top() {
        let mut bullet = Projectile::new(Vec2::new(400.0, 25.0));
        assert_eq!(bullet.rect.bottom(), 25.0);
        assert!(bullet.update());
        assert!(bullet.update());
        assert!(!bullet.update());
    }

    #[test]
    fn test_enemy_action_from_index() {
        assert_eq!(EnemyAction::try_from(0), Ok(EnemyAction::TurnLeft));
        assert_eq!(EnemyAction::try_from(1), Ok(EnemyAction::Hold));
        assert_eq!(EnemyAction::try_from(2), Ok(EnemyAction::TurnRight));
        assert_eq!(
            EnemyAction::try_from(3),
            Err(EnvError::InvalidAction { action: 3 })
        );
        for action in EnemyAction::ALL {
            assert_eq!(EnemyAction::try_from(action.index()), Ok(action));
        }
    }

    #[test]
    fn test_reset_builds_first_wave() {
        let settings = EnvSettings::default().with_initial_enemies(4);
        let mut state = GameState::new(settings, 42);
        assert!(state.player.is_none());

        state.reset(Some(42));
        assert_eq!(state.enemies.len(), 4);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.step_count, 0);
        assert!(state.player.is_some());
    }
}
