//! Read-only view of the simulation handed to presenters each frame

use glam::Vec2;
use serde::Serialize;

use super::state::{
    Bullet, EffectKind, Enemy, Explosion, GamePhase, GameState, Particle, Player, PowerUp,
    ScreenShake, Star,
};
use crate::Color;

/// HUD entry for an active timed effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectStatus {
    pub kind: EffectKind,
    pub label: &'static str,
    pub remaining_ms: u32,
    pub color: Color,
}

/// Everything a presenter may draw. Borrowed; cannot mutate the state.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub viewport: Vec2,
    pub score: u64,
    pub high_score: u64,
    pub health: u32,
    pub max_health: u32,
    pub weapon_index: usize,
    pub weapon_name: &'static str,
    pub effects: Vec<EffectStatus>,
    pub shake: ScreenShake,
    /// Shield bubble drawn around the player
    pub shielded: bool,
    /// Player sprite hidden this frame (invulnerability blink, 5-tick cadence)
    pub player_blink: bool,
    /// Health bar fill per enemy, in `enemies` order
    pub enemy_health: Vec<f32>,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub explosions: &'a [Explosion],
    pub stars: &'a [Star],
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot<'_> {
        let effects = self
            .effects
            .active()
            .map(|kind| EffectStatus {
                kind,
                label: kind.label(),
                remaining_ms: self.effects.remaining(kind),
                color: kind.color(),
            })
            .collect();
        let invulnerable = self.player.invulnerable;

        Snapshot {
            phase: self.phase,
            viewport: self.viewport,
            score: self.score,
            high_score: self.high_score,
            health: self.health,
            max_health: self.max_health,
            weapon_index: self.weapon_index,
            weapon_name: self.weapon().name,
            effects,
            shake: self.shake,
            shielded: self.effects.is_active(EffectKind::Shield),
            player_blink: invulnerable > 0 && (invulnerable / 5) % 2 == 1,
            enemy_health: self.enemies.iter().map(Enemy::health_fraction).collect(),
            player: &self.player,
            bullets: &self.bullets,
            enemies: &self.enemies,
            power_ups: &self.power_ups,
            particles: &self.particles,
            explosions: &self.explosions,
            stars: &self.stars,
        }
    }
}
