//! Collision detection and resolution
//!
//! Removal decisions are collected during a pass over the pre-removal sets and
//! applied afterwards, so no collection is mutated while it is being scanned.

use super::state::{Enemy, Player, Projectile};

/// What the collision pass removed this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// At least one enemy touched the player
    pub player_hit: bool,
    /// Enemies removed by touching the player
    pub enemies_rammed: u32,
    /// Enemies removed by projectiles (feeds score and reward)
    pub enemies_destroyed: u32,
    /// Projectiles consumed by hits
    pub projectiles_spent: u32,
}

/// Remove every enemy overlapping the player. Returns the number removed;
/// any non-zero count ends the episode exactly once.
pub fn resolve_player_enemies(player: &Player, enemies: &mut Vec<Enemy>) -> u32 {
    let hits: Vec<bool> = enemies
        .iter()
        .map(|enemy| enemy.rect.overlaps(&player.rect))
        .collect();
    compact(enemies, &hits)
}

/// Remove every overlapping (enemy, projectile) pair. Each entity is removed
/// once no matter how many partners it overlaps. Returns
/// `(enemies_destroyed, projectiles_spent)`.
pub fn resolve_projectile_enemies(
    enemies: &mut Vec<Enemy>,
    projectiles: &mut Vec<Projectile>,
) -> (u32, u32) {
    let mut enemy_hit = vec![false; enemies.len()];
    let mut projectile_hit = vec![false; projectiles.len()];

    for (ei, enemy) in enemies.iter().enumerate() {
        for (pi, projectile) in projectiles.iter().enumerate() {
            if enemy.rect.overlaps(&projectile.rect) {
                enemy_hit[ei] = true;
                projectile_hit[pi] = true;
            }
        }
    }

    let destroyed = compact(enemies, &enemy_hit);
    let spent = compact(projectiles, &projectile_hit);
    (destroyed, spent)
}

/// Run both checks. Player contact goes first; projectiles only see the
/// enemies that survived it.
pub fn resolve(
    player: Option<&Player>,
    enemies: &mut Vec<Enemy>,
    projectiles: &mut Vec<Projectile>,
) -> CollisionReport {
    let enemies_rammed = match player {
        Some(player) => resolve_player_enemies(player, enemies),
        None => 0,
    };
    let (enemies_destroyed, projectiles_spent) = resolve_projectile_enemies(enemies, projectiles);

    CollisionReport {
        player_hit: enemies_rammed > 0,
        enemies_rammed,
        enemies_destroyed,
        projectiles_spent,
    }
}

/// Drop the items flagged in `remove` (same length, same order). Returns the count dropped.
fn compact<T>(items: &mut Vec<T>, remove: &[bool]) -> u32 {
    let before = items.len();
    let mut flags = remove.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
    (before - items.len()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Aabb, Arena};
    use glam::Vec2;

    fn player() -> Player {
        Player::new(
            &Arena {
                width: SCREEN_WIDTH,
                height: SCREEN_HEIGHT,
            },
            SHOOT_DELAY,
        )
    }

    fn enemy_at(id: u32, x: f32, y: f32) -> Enemy {
        Enemy {
            id,
            rect: Aabb::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            downward_speed: 2.0,
            horizontal_step: ENEMY_HORIZONTAL_STEP,
        }
    }

    #[test]
    fn test_player_collision_removes_all_overlapping() {
        let player = player();
        let mut enemies = vec![
            enemy_at(1, 380.0, 490.0),
            enemy_at(2, 100.0, 100.0),
            enemy_at(3, 410.0, 530.0),
        ];
        let removed = resolve_player_enemies(&player, &mut enemies);
        assert_eq!(removed, 2);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].id, 2);
    }

    #[test]
    fn test_projectile_hits_are_counted_once() {
        // One bullet overlapping two enemies, and two bullets inside one enemy
        let mut enemies = vec![
            enemy_at(1, 100.0, 100.0),
            enemy_at(2, 120.0, 100.0),
            enemy_at(3, 500.0, 100.0),
            enemy_at(4, 700.0, 300.0),
        ];
        let mut projectiles = vec![
            Projectile::new(Vec2::new(125.0, 125.0)),
            Projectile::new(Vec2::new(510.0, 120.0)),
            Projectile::new(Vec2::new(520.0, 125.0)),
            Projectile::new(Vec2::new(300.0, 400.0)),
        ];

        let (destroyed, spent) = resolve_projectile_enemies(&mut enemies, &mut projectiles);
        assert_eq!(destroyed, 3);
        assert_eq!(spent, 3);
        assert_eq!(enemies.iter().map(|e| e.id).collect::<Vec<_>>(), vec![4]);
        assert_eq!(projectiles.len(), 1);
    }

    #[test]
    fn test_player_contact_resolves_before_projectiles() {
        let player = player();
        let mut enemies = vec![enemy_at(1, 390.0, 480.0)];
        // Bullet still overlapping the same enemy
        let mut projectiles = vec![Projectile::new(Vec2::new(400.0, 505.0))];

        let report = resolve(Some(&player), &mut enemies, &mut projectiles);
        assert!(report.player_hit);
        assert_eq!(report.enemies_rammed, 1);
        assert_eq!(report.enemies_destroyed, 0);
        assert_eq!(projectiles.len(), 1);
    }

    #[test]
    fn test_missing_player_skips_contact_check() {
        let mut enemies = vec![enemy_at(1, 390.0, 480.0)];
        let mut projectiles = Vec::new();
        let report = resolve(None, &mut enemies, &mut projectiles);
        assert_eq!(report, CollisionReport::default());
        assert_eq!(enemies.len(), 1);
    }
}
