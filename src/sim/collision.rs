//! Collision detection and combat resolution
//!
//! Resolution runs in two phases: [`scan`] inspects the pools without touching
//! them and returns a [`Resolution`]; [`apply`] then mutates the state. Pools
//! are never filtered while they are being iterated.

use glam::Vec2;

use super::state::{EffectKind, GameEvent, GameState};
use crate::consts::*;
use crate::{Color, rects_overlap};

/// A bullet striking an enemy
#[derive(Debug, Clone, PartialEq)]
pub struct BulletHit {
    pub bullet_id: u32,
    pub enemy_id: u32,
    pub damage: u32,
    /// Bullet center at impact
    pub point: Vec2,
}

/// Everything that collided this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// In bullet iteration order; at most one entry per bullet
    pub bullet_hits: Vec<BulletHit>,
    /// Enemy that rammed the player, if any
    pub player_hit: Option<u32>,
    /// Power-ups touching the player
    pub pickups: Vec<u32>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.bullet_hits.is_empty() && self.player_hit.is_none() && self.pickups.is_empty()
    }
}

/// Read-only pass over all pools
pub fn scan(state: &GameState) -> Resolution {
    let mut resolution = Resolution::default();

    // Projected health so a bullet never hits an enemy already killed this tick
    let mut health: Vec<u32> = state.enemies.iter().map(|e| e.health).collect();

    for bullet in &state.bullets {
        let target = state.enemies.iter().enumerate().find(|(i, enemy)| {
            health[*i] > 0 && rects_overlap(bullet.pos, bullet.size, enemy.pos, enemy.size)
        });
        if let Some((i, enemy)) = target {
            health[i] = health[i].saturating_sub(bullet.damage);
            resolution.bullet_hits.push(BulletHit {
                bullet_id: bullet.id,
                enemy_id: enemy.id,
                damage: bullet.damage,
                point: bullet.center(),
            });
        }
    }

    let player = &state.player;
    let immune = player.invulnerable > 0 || state.effects.is_active(EffectKind::Shield);
    if !immune {
        resolution.player_hit = state
            .enemies
            .iter()
            .zip(&health)
            .find(|(enemy, hp)| **hp > 0 && rects_overlap(enemy.pos, enemy.size, player.pos, player.size))
            .map(|(enemy, _)| enemy.id);
    }

    resolution.pickups = state
        .power_ups
        .iter()
        .filter(|p| rects_overlap(p.pos, p.size, player.pos, player.size))
        .map(|p| p.id)
        .collect();

    resolution
}

/// Apply a scan's results: damage, removals, score, effects
pub fn apply(state: &mut GameState, resolution: &Resolution) {
    // Bullet vs enemy
    for hit in &resolution.bullet_hits {
        state.hit_sparks(hit.point);
        let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == hit.enemy_id) else {
            continue;
        };
        if enemy.health == 0 {
            continue;
        }
        enemy.health = enemy.health.saturating_sub(hit.damage);
        if enemy.health == 0 {
            let (kind, points, center, color) = (enemy.kind, enemy.points, enemy.center(), enemy.color);
            state.award(points);
            state.explode(center, color);
            state.events.push(GameEvent::EnemyDestroyed { kind, points });
        }
    }
    if !resolution.bullet_hits.is_empty() {
        state
            .bullets
            .retain(|b| !resolution.bullet_hits.iter().any(|h| h.bullet_id == b.id));
        state.enemies.retain(|e| e.health > 0);
    }

    // Enemy vs player
    if let Some(enemy_id) = resolution.player_hit {
        if let Some(index) = state.enemies.iter().position(|e| e.id == enemy_id) {
            let enemy = state.enemies.remove(index);
            state.explode(enemy.center(), Color::RED);
            state.shake.trigger(10.0, 30);
            state.health = state.health.saturating_sub(CONTACT_DAMAGE);
            state.player.invulnerable = INVULNERABLE_TICKS;
            log::info!("Player hit by {:?}, health {}", enemy.kind, state.health);
            state.events.push(GameEvent::PlayerHit { health: state.health });
            if state.health == 0 {
                state.game_over();
            }
        }
    }

    // Power-up vs player
    for &id in &resolution.pickups {
        let Some(index) = state.power_ups.iter().position(|p| p.id == id) else {
            continue;
        };
        let power_up = state.power_ups.remove(index);
        state.collect_burst(power_up.center(), power_up.kind.color());
        match power_up.kind.effect() {
            Some(effect) => state.effects.set(effect, power_up.duration_ms),
            None => state.health = (state.health + HEALTH_PICKUP_AMOUNT).min(state.max_health),
        }
        state.award(POWER_UP_SCORE);
        state.events.push(GameEvent::PowerUpCollected(power_up.kind));
    }
}

/// Detect and resolve every collision for this tick
pub fn resolve_collisions(state: &mut GameState) -> Resolution {
    let resolution = scan(state);
    if !resolution.is_empty() {
        apply(state, &resolution);
    }
    resolution
}
