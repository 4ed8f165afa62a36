//! Zombie Survival - A top-down survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, game state)
//! - `hud`: Presentation layer turning state changes into UI values
//! - `platform`: Narrow interfaces to the renderer, input and UI collaborators
//! - `app`: Host harness driving the simulation frame by frame
//! - `settings`: Data-driven game configuration

pub mod app;
pub mod hud;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::App;
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the host harness (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 6;
    /// Largest delta the core will advance in one tick (seconds)
    ///
    /// Collisions are not swept: at this step a bullet covers 50 units and
    /// can pass through a small zombie. Hosts should tick at `SIM_DT`.
    pub const MAX_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    /// Movement multiplier while the speed boost is active
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;
    /// Fraction of incoming damage that gets through an active shield
    pub const SHIELD_DAMAGE_FACTOR: f32 = 0.25;
    pub const INVULNERABLE_SECS: f32 = 0.5;
    pub const DAMAGE_FLASH_SECS: f32 = 0.3;
    /// Knockback force lost per second (player and zombies)
    pub const KNOCKBACK_RECOVERY: f32 = 600.0;
    /// Regeneration heals this much every interval
    pub const REGEN_AMOUNT: f32 = 2.0;
    pub const REGEN_INTERVAL_SECS: f32 = 0.5;

    /// Weapons
    pub const PISTOL_FIRE_INTERVAL: f32 = 0.5;
    pub const SPRAY_FIRE_INTERVAL: f32 = 0.2;
    pub const PISTOL_DAMAGE: f32 = 25.0;
    pub const SPRAY_DAMAGE: f32 = 15.0;
    pub const SPRAY_PELLETS: usize = 3;
    /// Total random spread of a spray pellet (radians, centred on the aim)
    pub const SPRAY_SPREAD: f32 = 0.4;
    pub const BULLET_SPEED: f32 = 500.0;
    pub const PISTOL_BULLET_RADIUS: f32 = 3.0;
    pub const SPRAY_BULLET_RADIUS: f32 = 2.0;
    /// Distance past the view edge before a bullet is culled
    pub const BULLET_CULL_MARGIN: f32 = 50.0;

    /// Zombie defaults
    pub const ZOMBIE_DEATH_SECS: f32 = 0.5;
    pub const ZOMBIE_ATTACK_COOLDOWN: f32 = 1.0;
    pub const ZOMBIE_HIT_KNOCKBACK: f32 = 200.0;
    /// Zombies hop back this far after landing a hit
    pub const ZOMBIE_RECOIL_DISTANCE: f32 = 60.0;
    pub const PLAYER_HIT_KNOCKBACK: f32 = 50.0;
    /// Attack damage as a fraction of the player's max health
    pub const ZOMBIE_MIN_DAMAGE_FRACTION: f32 = 0.15;
    pub const ZOMBIE_MAX_DAMAGE_FRACTION: f32 = 0.30;

    /// Spawner
    pub const SPAWN_MIN_DISTANCE: f32 = 400.0;
    pub const SPAWN_MAX_DISTANCE: f32 = 700.0;
    pub const SPAWN_EDGE_MARGIN: f32 = 50.0;
    pub const MAX_SPAWNS_PER_TICK: u32 = 2;
    /// Zombies per second while a wave still owes spawns
    pub const SPAWN_RATE_BASE: f32 = 1.5;
    pub const SPAWN_RATE_PER_LEVEL: f32 = 0.25;

    /// Waves
    pub const WAVES_PER_LEVEL: u32 = 3;
    pub const FIRST_WAVE_DELAY: f32 = 3.0;
    pub const WAVE_DELAY: f32 = 5.0;
    pub const WAVE_CLEAR_HEAL: f32 = 15.0;
    pub const LEVEL_CLEAR_HEAL: f32 = 35.0;

    /// Stuck-zombie remediation
    pub const STUCK_CHECK_INTERVAL: f32 = 5.0;
    pub const STUCK_DISTANCE: f32 = 1500.0;
    pub const RELOCATE_DISTANCE: f32 = 600.0;
    pub const MAX_RELOCATIONS: u8 = 3;

    /// Power-ups
    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const POWERUP_EDGE_MARGIN: f32 = 100.0;

    /// Nuke flash decays this much per second
    pub const NUKE_FADE_RATE: f32 = 2.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the direction from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_angle_to() {
        assert_eq!(angle_to(Vec2::ZERO, Vec2::new(10.0, 0.0)), 0.0);
        assert!((angle_to(Vec2::ZERO, Vec2::new(0.0, 5.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle_to(Vec2::new(5.0, 5.0), Vec2::new(0.0, 5.0)).abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_direction_is_unit() {
        for i in 0..16 {
            let v = direction(i as f32 * 0.4);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(2.5 * PI) - FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(-FRAC_PI_2) - -FRAC_PI_2).abs() < 1e-6);
    }
}
