//! Weapon catalog and firing
//!
//! Firing is gated by the weapon cooldown against the simulation clock. The
//! multi-shot effect overrides the weapon's own pattern.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bullet, EffectKind, GameState};
use crate::Color;

/// How a weapon lays out its bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirePattern {
    /// One centered bullet
    Single,
    /// One centered bullet, rendered with a pulsing core
    Plasma,
    /// Three bullets fanning out
    Spread,
}

/// Immutable weapon stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub name: &'static str,
    pub cooldown_ms: u32,
    pub bullet_speed: f32,
    pub bullet_size: Vec2,
    pub damage: u32,
    pub color: Color,
    pub pattern: FirePattern,
}

/// The three selectable weapons
pub const WEAPONS: [Weapon; 3] = [
    Weapon {
        name: "Basic Laser",
        cooldown_ms: 150,
        bullet_speed: 8.0,
        bullet_size: Vec2::new(4.0, 15.0),
        damage: 25,
        color: Color::CYAN,
        pattern: FirePattern::Single,
    },
    Weapon {
        name: "Plasma Cannon",
        cooldown_ms: 300,
        bullet_speed: 6.0,
        bullet_size: Vec2::new(8.0, 20.0),
        damage: 50,
        color: Color::ORANGE,
        pattern: FirePattern::Plasma,
    },
    Weapon {
        name: "Spread Shot",
        cooldown_ms: 200,
        bullet_speed: 7.0,
        bullet_size: Vec2::new(3.0, 12.0),
        damage: 20,
        color: Color::YELLOW,
        pattern: FirePattern::Spread,
    },
];

/// Drift of the three spread-shot bullets
const SPREAD_DRIFT: [f32; 3] = [-1.5, 0.0, 1.5];

impl GameState {
    /// Currently selected weapon
    pub fn weapon(&self) -> &'static Weapon {
        &WEAPONS[self.weapon_index.min(WEAPONS.len() - 1)]
    }

    /// Select a weapon by catalog index; out-of-range indices are ignored
    pub fn select_weapon(&mut self, index: usize) {
        if index < WEAPONS.len() && index != self.weapon_index {
            self.weapon_index = index;
            log::debug!("Weapon selected: {}", WEAPONS[index].name);
        }
    }

    /// Cooldown after rapid-fire is applied
    pub fn effective_cooldown_ms(&self) -> f32 {
        let cooldown = self.weapon().cooldown_ms as f32;
        if self.effects.is_active(EffectKind::RapidFire) {
            cooldown * 0.5
        } else {
            cooldown
        }
    }

    /// Whether a shot at `now` would pass the fire-rate gate
    pub fn can_fire(&self, now: u64) -> bool {
        match self.player.last_shot {
            None => true,
            Some(last) => now.saturating_sub(last) as f32 > self.effective_cooldown_ms(),
        }
    }

    /// Fire if the cooldown has elapsed. Returns the number of bullets emitted.
    pub fn try_shoot(&mut self, now: u64) -> usize {
        if !self.can_fire(now) {
            return 0;
        }
        self.player.last_shot = Some(now);
        self.shoot()
    }

    /// Emit bullets for the current weapon and effects, ignoring the cooldown
    pub fn shoot(&mut self) -> usize {
        let weapon = *self.weapon();
        let center_x = self.player.pos.x + self.player.size.x / 2.0;
        let centered = center_x - weapon.bullet_size.x / 2.0;
        let y = self.player.pos.y;

        // (x, drift)
        let shots: Vec<(f32, f32)> = if self.effects.is_active(EffectKind::MultiShot) {
            vec![(centered, 0.0), (center_x - 12.0, -1.0), (center_x + 8.0, 1.0)]
        } else {
            match weapon.pattern {
                FirePattern::Single | FirePattern::Plasma => vec![(centered, 0.0)],
                FirePattern::Spread => SPREAD_DRIFT.iter().map(|&d| (centered, d)).collect(),
            }
        };

        let count = shots.len();
        for (x, drift) in shots {
            let id = self.next_entity_id();
            self.bullets.push(Bullet {
                id,
                pos: Vec2::new(x, y),
                size: weapon.bullet_size,
                speed: weapon.bullet_speed,
                drift,
                damage: weapon.damage,
                color: weapon.color,
                pattern: weapon.pattern,
            });
        }

        self.muzzle_flash(Vec2::new(center_x, y), &weapon);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(42, Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT));
        state.phase = crate::sim::GamePhase::Running;
        state
    }

    #[test]
    fn test_single_fires_one_centered() {
        let mut state = running_state();
        assert_eq!(state.try_shoot(1000), 1);
        let bullet = &state.bullets[0];
        assert_eq!(bullet.drift, 0.0);
        assert_eq!(bullet.damage, 25);
        assert!((bullet.center().x - state.player.center().x).abs() < 0.001);
        assert_eq!(bullet.pos.y, state.player.pos.y);
    }

    #[test]
    fn test_plasma_fires_one_tagged() {
        let mut state = running_state();
        state.select_weapon(1);
        assert_eq!(state.try_shoot(0), 1);
        assert_eq!(state.bullets[0].pattern, FirePattern::Plasma);
        assert_eq!(state.bullets[0].damage, 50);
    }

    #[test]
    fn test_spread_fires_three() {
        let mut state = running_state();
        state.select_weapon(2);
        assert_eq!(state.try_shoot(0), 3);
        let drifts: Vec<f32> = state.bullets.iter().map(|b| b.drift).collect();
        assert_eq!(drifts, vec![-1.5, 0.0, 1.5]);
    }

    #[test]
    fn test_multishot_overrides_pattern() {
        for index in 0..WEAPONS.len() {
            let mut state = running_state();
            state.select_weapon(index);
            state.effects.set(EffectKind::MultiShot, 6000);
            assert_eq!(state.try_shoot(0), 3);
            let drifts: Vec<f32> = state.bullets.iter().map(|b| b.drift).collect();
            assert_eq!(drifts, vec![0.0, -1.0, 1.0]);
            assert!(state.bullets.iter().all(|b| b.damage == WEAPONS[index].damage));
        }
    }

    #[test]
    fn test_collected_multishot_fires_three() {
        use crate::sim::state::{PowerUp, PowerUpKind};
        use crate::sim::tick::{TickInput, tick};

        for index in 0..WEAPONS.len() {
            let mut state = GameState::new(42, Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT));
            let start = TickInput {
                start: true,
                select_weapon: Some(index),
                ..Default::default()
            };
            tick(&mut state, &start, TICK_MS);

            let id = state.next_entity_id();
            let pos = state.player.pos;
            state.power_ups.push(PowerUp::new(id, PowerUpKind::MultiShot, pos));
            tick(&mut state, &TickInput::default(), TICK_MS);
            assert!(state.effects.is_active(EffectKind::MultiShot));
            assert!(state.bullets.is_empty());

            let fire = TickInput {
                fire: true,
                ..Default::default()
            };
            tick(&mut state, &fire, TICK_MS);
            assert_eq!(state.bullets.len(), 3, "weapon {}", WEAPONS[index].name);
            let drifts: Vec<f32> = state.bullets.iter().map(|b| b.drift).collect();
            assert_eq!(drifts, vec![0.0, -1.0, 1.0]);
        }
    }

    #[test]
    fn test_cooldown_gate() {
        let mut state = running_state();
        assert_eq!(state.try_shoot(1000), 1);
        // Within cooldown (150ms): rejected, and does not reset the gate
        assert_eq!(state.try_shoot(1100), 0);
        // Exactly at cooldown: still rejected (strict)
        assert_eq!(state.try_shoot(1150), 0);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.try_shoot(1151), 1);
        assert_eq!(state.bullets.len(), 2);
        assert_eq!(state.player.last_shot, Some(1151));
    }

    #[test]
    fn test_rapid_fire_halves_cooldown() {
        let mut state = running_state();
        state.effects.set(EffectKind::RapidFire, 5000);
        assert_eq!(state.effective_cooldown_ms(), 75.0);
        assert_eq!(state.try_shoot(0), 1);
        assert_eq!(state.try_shoot(76), 1);
    }

    #[test]
    fn test_select_weapon_ignores_out_of_range() {
        let mut state = running_state();
        state.select_weapon(2);
        state.select_weapon(7);
        assert_eq!(state.weapon().name, "Spread Shot");
    }

    #[test]
    fn test_muzzle_flash_particles() {
        let mut state = running_state();
        state.try_shoot(0);
        assert_eq!(state.particles.len(), 8);
        let mut state = running_state();
        state.select_weapon(1);
        state.try_shoot(0);
        assert_eq!(state.particles.len(), 15);
        assert!(state.particles.iter().all(|p| p.max_life == 35));
    }
}
