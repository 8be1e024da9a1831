//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, clock advanced by the tick delta
//! - Seeded RNG only
//! - Stable iteration order (insertion order, entity IDs for removal)
//! - No rendering or platform dependencies

pub mod collision;
pub mod fx;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapons;

pub use collision::{BulletHit, Resolution, resolve_collisions};
pub use snapshot::{EffectStatus, Snapshot};
pub use state::{
    ActiveEffects, Bullet, EffectKind, Enemy, EnemyKind, Explosion, GameEvent, GamePhase,
    GameState, Particle, Player, PowerUp, PowerUpKind, Ring, ScreenShake, Star, TrailPoint,
};
pub use tick::{TickInput, tick};
pub use weapons::{FirePattern, WEAPONS, Weapon};
