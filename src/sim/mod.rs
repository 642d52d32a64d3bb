//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only (owned by the spawner)
//! - Stable iteration order (entities kept in creation order)
//! - No rendering, file or platform dependencies

pub mod collision;
pub mod observation;
pub mod reward;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::CollisionReport;
pub use observation::{Observation, encode, nearest_enemies};
pub use spawner::Spawner;
pub use state::{Aabb, Arena, Enemy, EnemyAction, EntityKind, GameState, Player, Projectile};
pub use tick::{PlayerInput, TickOutcome, tick};
