//! Time-gated enemy and power-up spawning
//!
//! Both gates compare the simulation clock against the last spawn time. The
//! enemy interval shrinks by a fixed step on every spawn down to a floor.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameEvent, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// True when `interval` has elapsed since `last` (or nothing spawned yet)
fn gate_open(last: Option<u64>, now: u64, interval: u64) -> bool {
    match last {
        None => true,
        Some(last) => now.saturating_sub(last) >= interval,
    }
}

impl GameState {
    /// Spawn one random enemy if the spawn interval has elapsed.
    ///
    /// Returns true if an enemy was added.
    pub fn maybe_spawn_enemy(&mut self, now: u64) -> bool {
        if !gate_open(self.last_enemy_spawn, now, self.enemy_spawn_interval_ms) {
            return false;
        }

        let kind = EnemyKind::ALL[self.rng.random_range(0..EnemyKind::ALL.len())];
        let size = kind.archetype().size;
        let x = self.rng.random::<f32>() * (self.viewport.x - size.x).max(0.0);
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let id = self.next_entity_id();
        self.enemies
            .push(Enemy::new(id, kind, Vec2::new(x, -size.y), direction));

        self.last_enemy_spawn = Some(now);
        if self.enemy_spawn_interval_ms > ENEMY_SPAWN_FLOOR_MS {
            self.enemy_spawn_interval_ms = self
                .enemy_spawn_interval_ms
                .saturating_sub(ENEMY_SPAWN_STEP_MS)
                .max(ENEMY_SPAWN_FLOOR_MS);
        }

        log::debug!(
            "Spawned {:?} at x={:.0}, next interval {}ms",
            kind,
            x,
            self.enemy_spawn_interval_ms
        );
        self.events.push(GameEvent::EnemySpawned(kind));
        true
    }

    /// Spawn one random power-up if its fixed interval has elapsed.
    ///
    /// Returns true if a power-up was added.
    pub fn maybe_spawn_power_up(&mut self, now: u64) -> bool {
        if !gate_open(self.last_power_up_spawn, now, POWER_UP_SPAWN_INTERVAL_MS) {
            return false;
        }

        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        let x = self.rng.random::<f32>() * (self.viewport.x - POWER_UP_SIZE).max(0.0);
        let id = self.next_entity_id();
        self.power_ups
            .push(PowerUp::new(id, kind, Vec2::new(x, -POWER_UP_SIZE)));
        self.last_power_up_spawn = Some(now);

        log::debug!("Spawned {:?} power-up at x={:.0}", kind, x);
        self.events.push(GameEvent::PowerUpSpawned(kind));
        true
    }
}
