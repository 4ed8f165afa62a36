//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped timestep supplied by the host
//! - Seeded RNG only, stored in the state
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bullet;
pub mod collision;
pub mod player;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod zombie;

pub use bullet::{Bullet, BulletKind};
pub use collision::{Rect, circles_overlap, clamp_to_rect};
pub use player::{Knockback, MoveInput, Player, TimedEffect, Weapon};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{GameEvent, GamePhase, GameState, WaveState};
pub use tick::{TickInput, tick, wave_quota};
pub use zombie::{Zombie, ZombieStats};
