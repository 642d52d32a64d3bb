//! Render boundary
//!
//! A plain-data view of the world for whatever front end draws it. Nothing in
//! this crate draws; the snapshot serializes to JSON for out-of-process viewers.

use serde::{Deserialize, Serialize};

use crate::sim::{Aabb, EntityKind, GameState};

/// One drawable box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SpriteView {
    fn new(kind: EntityKind, rect: &Aabb) -> Self {
        Self {
            kind,
            x: rect.pos.x,
            y: rect.pos.y,
            width: rect.size.x,
            height: rect.size.y,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Player first, then projectiles, then enemies
    pub sprites: Vec<SpriteView>,
    pub score_text: String,
    pub level_text: String,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut sprites =
            Vec::with_capacity(1 + state.projectiles.len() + state.enemies.len());
        if let Some(player) = state.player.as_ref() {
            sprites.push(SpriteView::new(EntityKind::Player, &player.rect));
        }
        sprites.extend(
            state
                .projectiles
                .iter()
                .map(|p| SpriteView::new(EntityKind::Projectile, &p.rect)),
        );
        sprites.extend(
            state
                .enemies
                .iter()
                .map(|e| SpriteView::new(EntityKind::Enemy, &e.rect)),
        );

        Self {
            screen_width: state.arena.width,
            screen_height: state.arena.height,
            sprites,
            score_text: format!("Score: {}", state.score),
            level_text: format!("Level: {}", state.level),
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}
