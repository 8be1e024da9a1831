//! Game state and core simulation types
//!
//! Everything the simulation reads or mutates lives on [`GameState`]; there is
//! no process-wide state. Timers are plain fields advanced by the tick delta.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::weapons::FirePattern;
use crate::Color;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start input
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    GameOver,
}

/// Trail point behind the player craft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Ticks remaining
    pub life: u32,
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub speed: f32,
    /// Sim time (ms) of the last accepted shot
    pub last_shot: Option<u64>,
    /// Ticks of contact immunity remaining
    pub invulnerable: u32,
    /// Oldest first
    pub trail: Vec<TrailPoint>,
}

impl Player {
    pub fn new(viewport: Vec2) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        let pos = Vec2::new(viewport.x / 2.0, viewport.y - PLAYER_SPAWN_OFFSET);
        Self {
            pos: pos.clamp(Vec2::ZERO, (viewport - size).max(Vec2::ZERO)),
            size,
            speed: PLAYER_SPEED,
            last_shot: None,
            invulnerable: 0,
            trail: Vec::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Bottom-center point (engine exhaust)
    pub fn exhaust(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    /// Move by a direction (unit steps per axis), staying inside the viewport
    pub fn steer(&mut self, dir: Vec2, viewport: Vec2) {
        let max = (viewport - self.size).max(Vec2::ZERO);
        self.pos = (self.pos + dir * self.speed).clamp(Vec2::ZERO, max);
    }

    /// Record the exhaust position and age the trail
    pub fn record_trail(&mut self) {
        self.trail.push(TrailPoint {
            pos: self.exhaust(),
            life: TRAIL_LIFE,
        });
        for point in &mut self.trail {
            point.life = point.life.saturating_sub(1);
        }
        self.trail.retain(|p| p.life > 0);
        if self.trail.len() > TRAIL_LENGTH {
            let excess = self.trail.len() - TRAIL_LENGTH;
            self.trail.drain(..excess);
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward speed (pixels per tick)
    pub speed: f32,
    /// Horizontal drift (pixels per tick)
    pub drift: f32,
    pub damage: u32,
    pub color: Color,
    pub pattern: FirePattern,
}

impl Bullet {
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.drift, -self.speed)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Fully above the top edge or past either side
    pub fn is_off_screen(&self, viewport: Vec2) -> bool {
        self.pos.y <= -self.size.y || self.pos.x <= -self.size.x || self.pos.x >= viewport.x
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Heavy,
    /// Drifts toward the player horizontally
    Fast,
    /// Oscillates horizontally
    Zigzag,
}

/// Static stats for an enemy kind
#[derive(Debug, Clone, Copy)]
pub struct EnemyArchetype {
    pub size: Vec2,
    pub speed: f32,
    pub health: u32,
    pub color: Color,
    pub points: u64,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Basic,
        EnemyKind::Heavy,
        EnemyKind::Fast,
        EnemyKind::Zigzag,
    ];

    pub fn archetype(self) -> EnemyArchetype {
        match self {
            EnemyKind::Basic => EnemyArchetype {
                size: Vec2::new(30.0, 40.0),
                speed: 2.0,
                health: 50,
                color: Color(0xff4444),
                points: 10,
            },
            EnemyKind::Heavy => EnemyArchetype {
                size: Vec2::new(40.0, 50.0),
                speed: 1.5,
                health: 100,
                color: Color(0xff8844),
                points: 25,
            },
            EnemyKind::Fast => EnemyArchetype {
                size: Vec2::new(25.0, 35.0),
                speed: 3.0,
                health: 25,
                color: Color(0xff44ff),
                points: 15,
            },
            EnemyKind::Zigzag => EnemyArchetype {
                size: Vec2::new(35.0, 45.0),
                speed: 1.8,
                health: 75,
                color: Color(0x44ff44),
                points: 20,
            },
        }
    }
}

/// An enemy craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub color: Color,
    pub points: u64,
    /// Zigzag oscillation phase
    pub phase: f32,
    /// Horizontal direction sign (-1 or 1)
    pub direction: f32,
}

impl Enemy {
    /// Instantiate an archetype with its top-left corner at `pos`
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, direction: f32) -> Self {
        let arch = kind.archetype();
        Self {
            id,
            kind,
            pos,
            size: arch.size,
            speed: arch.speed,
            health: arch.health,
            max_health: arch.health,
            color: arch.color,
            points: arch.points,
            phase: 0.0,
            direction,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Health as a fraction of max (for health bars)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

/// Timed effects granted by power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Halves weapon cooldown
    RapidFire,
    /// Ignores enemy contact
    Shield,
    /// Three-way fire with any weapon
    MultiShot,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [EffectKind::RapidFire, EffectKind::Shield, EffectKind::MultiShot];

    pub fn label(self) -> &'static str {
        match self {
            EffectKind::RapidFire => "RapidFire",
            EffectKind::Shield => "Shield",
            EffectKind::MultiShot => "MultiShot",
        }
    }

    pub fn color(self) -> Color {
        match self {
            EffectKind::RapidFire => Color::YELLOW,
            EffectKind::Shield => Color::CYAN,
            EffectKind::MultiShot => Color::MAGENTA,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    RapidFire,
    Shield,
    MultiShot,
    /// Instant heal, no timer
    Health,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::MultiShot,
        PowerUpKind::Health,
    ];

    /// Effect granted on pickup (None for instant health)
    pub fn effect(self) -> Option<EffectKind> {
        match self {
            PowerUpKind::RapidFire => Some(EffectKind::RapidFire),
            PowerUpKind::Shield => Some(EffectKind::Shield),
            PowerUpKind::MultiShot => Some(EffectKind::MultiShot),
            PowerUpKind::Health => None,
        }
    }

    pub fn duration_ms(self) -> u32 {
        match self {
            PowerUpKind::RapidFire => 5000,
            PowerUpKind::Shield => 8000,
            PowerUpKind::MultiShot => 6000,
            PowerUpKind::Health => 0,
        }
    }

    pub fn color(self) -> Color {
        match self.effect() {
            Some(effect) => effect.color(),
            None => Color::GREEN,
        }
    }
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub duration_ms: u32,
    /// Cosmetic pulse phase
    pub pulse: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size: Vec2::splat(POWER_UP_SIZE),
            speed: POWER_UP_SPEED,
            duration_ms: kind.duration_ms(),
            pulse: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Remaining duration (ms) per timed effect
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub rapid_fire_ms: u32,
    pub shield_ms: u32,
    pub multi_shot_ms: u32,
}

impl ActiveEffects {
    pub fn remaining(&self, kind: EffectKind) -> u32 {
        match kind {
            EffectKind::RapidFire => self.rapid_fire_ms,
            EffectKind::Shield => self.shield_ms,
            EffectKind::MultiShot => self.multi_shot_ms,
        }
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.remaining(kind) > 0
    }

    /// Overwrite (not extend) an effect's remaining time
    pub fn set(&mut self, kind: EffectKind, duration_ms: u32) {
        match kind {
            EffectKind::RapidFire => self.rapid_fire_ms = duration_ms,
            EffectKind::Shield => self.shield_ms = duration_ms,
            EffectKind::MultiShot => self.multi_shot_ms = duration_ms,
        }
    }

    /// Count every timer down by `dt_ms`, stopping at zero
    pub fn tick(&mut self, dt_ms: u32) {
        self.rapid_fire_ms = self.rapid_fire_ms.saturating_sub(dt_ms);
        self.shield_ms = self.shield_ms.saturating_sub(dt_ms);
        self.multi_shot_ms = self.multi_shot_ms.saturating_sub(dt_ms);
    }

    pub fn active(&self) -> impl Iterator<Item = EffectKind> + '_ {
        EffectKind::ALL.into_iter().filter(move |k| self.is_active(*k))
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    pub color: Color,
    pub size: f32,
}

/// One expanding ring of an explosion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub radius: f32,
    pub max_radius: f32,
    /// Ticks before this ring starts expanding
    pub delay: u32,
}

/// Multi-ring explosion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    /// Elapsed ticks
    pub time: u32,
    pub max_time: u32,
    pub color: Color,
    pub rings: Vec<Ring>,
}

impl Explosion {
    pub fn new(pos: Vec2, color: Color) -> Self {
        let rings = (0..3)
            .map(|i| Ring {
                radius: 0.0,
                max_radius: 25.0 + i as f32 * 15.0,
                delay: i * 5,
            })
            .collect();
        Self {
            pos,
            time: 0,
            max_time: EXPLOSION_TICKS,
            color,
            rings,
        }
    }

    /// Age one tick and grow rings past their delay
    pub fn advance(&mut self) {
        self.time += 1;
        let (time, max_time) = (self.time, self.max_time);
        for ring in &mut self.rings {
            if time > ring.delay && max_time > ring.delay {
                let t = (time - ring.delay) as f32 / (max_time - ring.delay) as f32;
                ring.radius = ring.max_radius * t.min(1.0);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.time >= self.max_time
    }
}

/// Background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
}

/// Screen shake request
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    pub amount: f32,
    pub ticks: u32,
}

impl ScreenShake {
    /// Replace the current shake
    pub fn trigger(&mut self, amount: f32, ticks: u32) {
        self.amount = amount;
        self.ticks = ticks;
    }

    pub fn tick(&mut self) {
        if self.ticks > 0 {
            self.ticks -= 1;
            if self.ticks == 0 {
                self.amount = 0.0;
            }
        }
    }
}

/// Notable things that happened during a tick, for the driver to act on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    EnemySpawned(EnemyKind),
    PowerUpSpawned(PowerUpKind),
    EnemyDestroyed { kind: EnemyKind, points: u64 },
    PlayerHit { health: u32 },
    PowerUpCollected(PowerUpKind),
    /// Score surpassed the stored high score
    NewHighScore(u64),
    GameOver { score: u64 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Viewport width/height
    pub viewport: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub health: u32,
    pub max_health: u32,
    /// Simulation clock (ms), advanced only while running
    pub time_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Index into the weapon catalog
    pub weapon_index: usize,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub explosions: Vec<Explosion>,
    pub stars: Vec<Star>,
    pub effects: ActiveEffects,
    pub shake: ScreenShake,
    /// Current enemy spawn interval (ms), ramps down over a run
    pub enemy_spawn_interval_ms: u64,
    /// None until the first spawn, so the gate starts open
    pub last_enemy_spawn: Option<u64>,
    pub last_power_up_spawn: Option<u64>,
    /// Cosmetic particle cap
    pub max_particles: usize,
    /// Gameplay randomness (archetype choice, spawn positions)
    pub rng: Pcg32,
    /// Cosmetic randomness (particles, stars)
    pub fx_rng: Pcg32,
    /// Events raised during the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

/// Default particle cap
pub const MAX_PARTICLES: usize = 1000;

impl GameState {
    /// Create a new game state with the given seed and viewport
    pub fn new(seed: u64, viewport: Vec2) -> Self {
        Self::with_options(seed, viewport, STAR_COUNT, MAX_PARTICLES)
    }

    /// Create a state with explicit star count and particle cap
    pub fn with_options(seed: u64, viewport: Vec2, star_count: usize, max_particles: usize) -> Self {
        let mut state = Self {
            seed,
            viewport,
            phase: GamePhase::NotStarted,
            score: 0,
            high_score: 0,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            time_ms: 0,
            time_ticks: 0,
            player: Player::new(viewport),
            weapon_index: 0,
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            explosions: Vec::new(),
            stars: Vec::with_capacity(star_count),
            effects: ActiveEffects::default(),
            shake: ScreenShake::default(),
            enemy_spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            last_enemy_spawn: None,
            last_power_up_spawn: None,
            max_particles,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
            events: Vec::new(),
            next_id: 1,
        };

        state.init_stars(star_count);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything a run owns; keeps the high score, stars and weapon choice
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.health = self.max_health;
        self.player = Player::new(self.viewport);
        self.bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.explosions.clear();
        self.effects = ActiveEffects::default();
        self.shake = ScreenShake::default();
        self.enemy_spawn_interval_ms = ENEMY_SPAWN_INTERVAL_MS;
    }

    /// Add points, raising the high score if surpassed
    pub fn award(&mut self, points: u64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore(self.score));
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
