//! Cosmetic effects: particles, explosions, background stars
//!
//! All randomness here comes from `fx_rng` so gameplay sequences do not shift
//! when effect tuning changes.

use glam::Vec2;
use rand::Rng;

use super::state::{Explosion, GameState, Particle, Star};
use super::weapons::{FirePattern, Weapon};
use crate::Color;
use crate::consts::PARTICLE_GRAVITY;

impl GameState {
    /// Populate the background starfield
    pub(crate) fn init_stars(&mut self, count: usize) {
        for _ in 0..count {
            let star = Star {
                pos: Vec2::new(
                    self.fx_rng.random::<f32>() * self.viewport.x,
                    self.fx_rng.random::<f32>() * self.viewport.y,
                ),
                size: self.fx_rng.random::<f32>() * 2.0 + 1.0,
                speed: self.fx_rng.random::<f32>() * 2.0 + 1.0,
                opacity: self.fx_rng.random::<f32>() * 0.8 + 0.2,
            };
            self.stars.push(star);
        }
    }

    /// Uniform jitter in [-range/2, range/2)
    fn jitter(&mut self, range: f32) -> f32 {
        (self.fx_rng.random::<f32>() - 0.5) * range
    }

    /// Push a particle unless the cap is reached
    fn emit(&mut self, pos: Vec2, vel: Vec2, life: u32, color: Color, size: f32) {
        if self.particles.len() >= self.max_particles {
            return;
        }
        self.particles.push(Particle {
            pos,
            vel,
            life,
            max_life: life,
            color,
            size,
        });
    }

    /// Radial burst of `count` particles
    fn burst(&mut self, pos: Vec2, count: usize, spread: f32, life: u32, color: Color, size: (f32, f32)) {
        for _ in 0..count {
            let vel = Vec2::new(self.jitter(spread), self.jitter(spread));
            let size = self.fx_rng.random::<f32>() * size.0 + size.1;
            self.emit(pos, vel, life, color, size);
        }
    }

    pub(crate) fn muzzle_flash(&mut self, pos: Vec2, weapon: &Weapon) {
        let (count, life) = match weapon.pattern {
            FirePattern::Plasma => (15, 35),
            _ => (8, 25),
        };
        for _ in 0..count {
            let vel = Vec2::new(self.jitter(6.0), self.fx_rng.random::<f32>() * -4.0);
            let size = self.fx_rng.random::<f32>() * 3.0 + 2.0;
            self.emit(pos, vel, life, weapon.color, size);
        }
    }

    /// Occasional spark behind a moving bullet
    pub(crate) fn bullet_sparks(&mut self) {
        for i in 0..self.bullets.len() {
            let (origin, color, plasma) = {
                let b = &self.bullets[i];
                let origin = Vec2::new(b.pos.x + b.size.x / 2.0, b.pos.y + b.size.y);
                (origin, b.color, b.pattern == FirePattern::Plasma)
            };
            let chance = if plasma { 0.5 } else { 0.3 };
            if self.fx_rng.random_bool(chance) {
                let vel = Vec2::new(self.jitter(2.0), self.fx_rng.random::<f32>() * 2.0);
                let (life, size) = if plasma { (25, 2.0) } else { (15, 1.0) };
                self.emit(origin, vel, life, color, size);
            }
        }
    }

    /// Engine exhaust under the player craft
    pub(crate) fn player_thrust(&mut self) {
        let origin = Vec2::new(self.player.pos.x + 18.0, self.player.pos.y + self.player.size.y);
        for _ in 0..5 {
            let pos = origin + Vec2::new(self.fx_rng.random::<f32>() * 4.0, 0.0);
            let vel = Vec2::new(self.jitter(3.0), self.fx_rng.random::<f32>() * 4.0 + 3.0);
            let color = Color::from_hsl(20.0 + self.fx_rng.random::<f32>() * 40.0, 1.0, 0.7);
            let size = self.fx_rng.random::<f32>() * 2.0 + 1.0;
            self.emit(pos, vel, 25, color, size);
        }
    }

    /// Engine exhaust under enemies (not every tick)
    pub(crate) fn enemy_thrust(&mut self) {
        for i in 0..self.enemies.len() {
            if !self.fx_rng.random_bool(0.3) {
                continue;
            }
            let (center_x, bottom, width, color) = {
                let e = &self.enemies[i];
                (e.center().x, e.pos.y + e.size.y, e.size.x, e.color)
            };
            for _ in 0..2 {
                let pos = Vec2::new(center_x + self.jitter(width * 0.5), bottom);
                let vel = Vec2::new(self.jitter(2.0), self.fx_rng.random::<f32>() * 3.0 + 1.0);
                let size = self.fx_rng.random::<f32>() * 2.0 + 1.0;
                self.emit(pos, vel, 20, color, size);
            }
        }
    }

    /// Sparks where a bullet struck
    pub(crate) fn hit_sparks(&mut self, pos: Vec2) {
        for _ in 0..12 {
            let vel = Vec2::new(self.jitter(8.0), self.jitter(8.0));
            let color = Color::from_hsl(self.fx_rng.random::<f32>() * 60.0 + 10.0, 1.0, 0.7);
            let size = self.fx_rng.random::<f32>() * 3.0 + 1.0;
            self.emit(pos, vel, 35, color, size);
        }
        self.shake.trigger(2.0, 5);
    }

    /// Burst when a power-up is collected
    pub(crate) fn collect_burst(&mut self, pos: Vec2, color: Color) {
        self.shake.trigger(5.0, 15);
        self.burst(pos, 20, 8.0, 40, color, (4.0, 2.0));
    }

    /// Spawn an explosion with debris and shake
    pub fn explode(&mut self, pos: Vec2, color: Color) {
        self.explosions.push(Explosion::new(pos, color));
        self.burst(pos, 15, 15.0, 80, color, (4.0, 2.0));
        self.burst(pos, 10, 15.0, 80, Color::WHITE, (4.0, 2.0));
        self.shake.trigger(8.0, 20);
    }

    /// Integrate particles under gravity and drop expired ones
    pub(crate) fn advance_particles(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel.y += PARTICLE_GRAVITY;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub(crate) fn advance_explosions(&mut self) {
        for explosion in &mut self.explosions {
            explosion.advance();
        }
        self.explosions.retain(|e| !e.is_finished());
    }

    /// Scroll stars down, wrapping to the top at a new column
    pub(crate) fn advance_stars(&mut self) {
        let (width, height) = (self.viewport.x, self.viewport.y);
        for star in &mut self.stars {
            star.pos.y += star.speed;
            if star.pos.y > height {
                star.pos.y = 0.0;
                star.pos.x = self.fx_rng.random::<f32>() * width;
            }
        }
    }
}
