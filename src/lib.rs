//! Aircraft Shooter - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, combat, game phase)
//! - `game`: Fixed-timestep driver that owns the simulation and the high score
//! - `renderer`: Presentation surface (read-only consumers of a snapshot)
//! - `platform`: Input mapping, frame clock, browser bindings
//! - `persistence`: Key-value storage backends

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation tick (60 Hz)
    pub const TICK_HZ: u32 = 60;
    /// Tick duration in milliseconds, used for effect timers and the sim clock
    pub const TICK_MS: u32 = 16;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default viewport
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance from the bottom edge to the player's spawn position
    pub const PLAYER_SPAWN_OFFSET: f32 = 80.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    /// Flat contact damage, independent of enemy kind
    pub const CONTACT_DAMAGE: u32 = 20;
    /// Invulnerability after a hit (1 second)
    pub const INVULNERABLE_TICKS: u32 = 60;
    pub const TRAIL_LENGTH: usize = 10;
    pub const TRAIL_LIFE: u32 = 20;

    /// Enemy spawn cadence (ms)
    pub const ENEMY_SPAWN_INTERVAL_MS: u64 = 2000;
    pub const ENEMY_SPAWN_FLOOR_MS: u64 = 800;
    pub const ENEMY_SPAWN_STEP_MS: u64 = 10;
    /// Power-up spawn cadence (ms)
    pub const POWER_UP_SPAWN_INTERVAL_MS: u64 = 15000;

    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_SPEED: f32 = 2.0;
    pub const POWER_UP_SCORE: u64 = 50;
    pub const HEALTH_PICKUP_AMOUNT: u32 = 25;

    /// Constant downward acceleration on particles (per tick²)
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const EXPLOSION_TICKS: u32 = 40;
    pub const STAR_COUNT: usize = 100;
}

/// Packed 0xRRGGBB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);
    pub const RED: Color = Color(0xff0000);
    pub const CYAN: Color = Color(0x00ffff);
    pub const YELLOW: Color = Color(0xffff00);
    pub const MAGENTA: Color = Color(0xff00ff);
    pub const GREEN: Color = Color(0x00ff00);
    pub const ORANGE: Color = Color(0xff6600);

    /// Build a color from hue (degrees), saturation and lightness (0-1)
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        let channel = |v: f32| (((v + m) * 255.0).round().clamp(0.0, 255.0)) as u32;
        Color((channel(r) << 16) | (channel(g) << 8) | channel(b))
    }

    /// CSS hex form (`#rrggbb`)
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0 & 0xffffff)
    }
}

/// Axis-aligned rectangle overlap with strict inequalities.
///
/// Rectangles that only share an edge do not overlap.
#[inline]
pub fn rects_overlap(a_pos: glam::Vec2, a_size: glam::Vec2, b_pos: glam::Vec2, b_size: glam::Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5), Color(0xff0000));
        assert_eq!(Color::from_hsl(120.0, 1.0, 0.5), Color(0x00ff00));
        assert_eq!(Color::from_hsl(240.0, 1.0, 0.5), Color(0x0000ff));
        assert_eq!(Color::from_hsl(0.0, 0.0, 1.0), Color::WHITE);
    }

    #[test]
    fn test_hex() {
        assert_eq!(Color::ORANGE.to_hex(), "#ff6600");
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let size = Vec2::new(10.0, 10.0);
        assert!(!rects_overlap(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size));
        assert!(!rects_overlap(Vec2::ZERO, size, Vec2::new(0.0, 10.0), size));
        assert!(rects_overlap(Vec2::ZERO, size, Vec2::new(9.9, 9.9), size));
    }
}
