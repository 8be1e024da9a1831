//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Order within a
//! tick is fixed: input, spawning, movement of each pool, timers, collisions.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::state::{EnemyKind, GameEvent, GamePhase, GameState};

/// Horizontal step of fast enemies toward the player (pixels per tick)
const FAST_TRACKING_STEP: f32 = 0.5;
/// Zigzag phase advance per tick
const ZIGZAG_PHASE_STEP: f32 = 0.1;
/// Zigzag horizontal amplitude (pixels per tick)
const ZIGZAG_AMPLITUDE: f32 = 2.0;
/// Power-up pulse advance per tick
const PULSE_STEP: f32 = 0.2;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held
    pub fire: bool,
    /// Weapon selection (catalog index), edge-triggered
    pub select_weapon: Option<usize>,
    /// Start the game from the title screen
    pub start: bool,
    /// Restart after game over
    pub restart: bool,
}

impl TickInput {
    /// Movement direction as unit steps per axis
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

impl GameState {
    /// NotStarted -> Running
    pub fn start(&mut self) {
        if self.phase == GamePhase::NotStarted {
            log::info!("Game started");
            self.phase = GamePhase::Running;
            self.events.push(GameEvent::Started);
        }
    }

    /// GameOver -> Running with a fresh run
    pub fn restart(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.reset_run();
            log::info!("Game restarted (high score {})", self.high_score);
            self.phase = GamePhase::Running;
            self.events.push(GameEvent::Restarted);
        }
    }

    /// Running -> GameOver
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::Running {
            log::info!("Game over: score {}, high score {}", self.score, self.high_score);
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
        }
    }

    fn advance_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.pos += bullet.velocity();
        }
        self.bullet_sparks();
        let viewport = self.viewport;
        self.bullets.retain(|b| !b.is_off_screen(viewport));
    }

    fn advance_enemies(&mut self) {
        let player_center = self.player.center().x;
        let width = self.viewport.x;
        for enemy in &mut self.enemies {
            match enemy.kind {
                EnemyKind::Zigzag => {
                    enemy.phase += ZIGZAG_PHASE_STEP;
                    enemy.pos.x += enemy.phase.sin() * ZIGZAG_AMPLITUDE * enemy.direction;
                }
                EnemyKind::Fast => {
                    if player_center > enemy.center().x {
                        enemy.pos.x += FAST_TRACKING_STEP;
                    } else {
                        enemy.pos.x -= FAST_TRACKING_STEP;
                    }
                }
                EnemyKind::Basic | EnemyKind::Heavy => {}
            }
            enemy.pos.y += enemy.speed;
            enemy.pos.x = enemy.pos.x.clamp(0.0, (width - enemy.size.x).max(0.0));
        }
        self.enemy_thrust();
        let height = self.viewport.y;
        self.enemies.retain(|e| e.pos.y < height);
    }

    fn advance_power_ups(&mut self) {
        for power_up in &mut self.power_ups {
            power_up.pos.y += power_up.speed;
            power_up.pulse += PULSE_STEP;
        }
        let height = self.viewport.y;
        self.power_ups.retain(|p| p.pos.y < height);
    }

    /// Effect timers by wall time, invulnerability and shake by ticks
    fn advance_timers(&mut self, dt_ms: u32) {
        self.effects.tick(dt_ms);
        self.player.invulnerable = self.player.invulnerable.saturating_sub(1);
        self.shake.tick();
    }
}

/// Advance the game state by one fixed timestep of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    state.events.clear();

    // Weapon choice is honored in every phase
    if let Some(index) = input.select_weapon {
        state.select_weapon(index);
    }

    match state.phase {
        GamePhase::NotStarted if input.start => state.start(),
        GamePhase::GameOver if input.restart => state.restart(),
        _ => {}
    }

    // Title and game-over screens are display only
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;
    state.time_ms += u64::from(dt_ms);
    let now = state.time_ms;

    // Input
    let dir = input.direction();
    if dir != Vec2::ZERO {
        let viewport = state.viewport;
        state.player.steer(dir, viewport);
    }
    if input.fire {
        state.try_shoot(now);
    }

    // Spawning
    state.maybe_spawn_enemy(now);
    state.maybe_spawn_power_up(now);

    // Movement
    state.advance_bullets();
    state.advance_enemies();
    state.advance_power_ups();
    state.advance_particles();
    state.advance_explosions();
    state.advance_stars();
    state.player.record_trail();
    state.player_thrust();
    state.advance_timers(dt_ms);

    resolve_collisions(state);
}
