//! Power-up pickups
//!
//! Stationary pickups that grant an instant or timed effect when the player
//! touches them. The tick removes a pickup right after applying it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::player::Weapon;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Spray,
    Nuke,
    Shield,
    SpeedBoost,
    Regeneration,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Spray,
        PowerUpKind::Nuke,
        PowerUpKind::Shield,
        PowerUpKind::SpeedBoost,
        PowerUpKind::Regeneration,
    ];

    /// Effect duration in milliseconds (`None` for instant effects)
    pub fn duration_ms(&self) -> Option<u32> {
        match self {
            PowerUpKind::Spray => Some(10_000),
            PowerUpKind::Nuke => None,
            PowerUpKind::Shield => Some(15_000),
            PowerUpKind::SpeedBoost => Some(12_000),
            PowerUpKind::Regeneration => Some(8_000),
        }
    }

    /// Relative spawn weight (sums to 100)
    pub fn weight(&self) -> u32 {
        match self {
            PowerUpKind::Spray => 30,
            PowerUpKind::Nuke => 5,
            PowerUpKind::Shield => 20,
            PowerUpKind::SpeedBoost => 25,
            PowerUpKind::Regeneration => 20,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::Spray => "SPRAY GUN",
            PowerUpKind::Nuke => "NUKE",
            PowerUpKind::Shield => "SHIELD",
            PowerUpKind::SpeedBoost => "SPEED BOOST",
            PowerUpKind::Regeneration => "REGENERATION",
        }
    }

    /// Weighted random draw
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        let total: u32 = Self::ALL.iter().map(|k| k.weight()).sum();
        let mut pick = rng.random_range(0..total);
        for kind in Self::ALL {
            if pick < kind.weight() {
                return kind;
            }
            pick -= kind.weight();
        }
        PowerUpKind::Spray
    }
}

/// A pickup entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Glow animation phase in [0, 1]
    pub pulse: f32,
    pulse_rising: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: POWERUP_RADIUS,
            pulse: 0.0,
            pulse_rising: true,
        }
    }

    /// Random pickup somewhere in the current view, kept inside the map
    pub fn random<R: Rng>(id: u32, rng: &mut R, camera: Vec2, view: Vec2, map: Vec2) -> Self {
        let kind = PowerUpKind::roll(rng);
        let mut offset_in_view = |extent: f32| {
            if extent > 2.0 * POWERUP_EDGE_MARGIN {
                rng.random_range(POWERUP_EDGE_MARGIN..=extent - POWERUP_EDGE_MARGIN)
            } else {
                extent / 2.0
            }
        };
        let pos = camera + Vec2::new(offset_in_view(view.x), offset_in_view(view.y));
        let pos = Rect::from_size(map).inset(POWERUP_EDGE_MARGIN).clamp(pos);
        Self::new(id, kind, pos)
    }

    /// Advance the glow animation (cosmetic)
    pub fn update(&mut self, dt: f32) {
        let step = 2.0 * dt;
        if self.pulse_rising {
            self.pulse += step;
            if self.pulse > 1.0 {
                self.pulse = 1.0;
                self.pulse_rising = false;
            }
        } else {
            self.pulse -= step;
            if self.pulse < 0.0 {
                self.pulse = 0.0;
                self.pulse_rising = true;
            }
        }
    }

    /// Apply the pickup's effect to the session
    pub fn apply(&self, state: &mut GameState) {
        let duration = self.kind.duration_ms().unwrap_or(0);
        match self.kind {
            PowerUpKind::Spray => state.player.set_weapon(Weapon::Spray, duration),
            PowerUpKind::Nuke => {
                // Dying zombies were already scored by the bullet that killed them
                let cleared = state.zombies.iter().filter(|z| !z.dying).count() as u32;
                state.score += cleared as u64;
                state.zombies.clear();
                state.nuke_effect = 1.0;
                state.push_event(GameEvent::Nuke { cleared });
            }
            PowerUpKind::Shield => state.player.activate_shield(duration),
            PowerUpKind::SpeedBoost => state.player.activate_speed_boost(duration),
            PowerUpKind::Regeneration => state.player.activate_regeneration(duration),
        }
        log::debug!("Power-up {} applied at {:?}", self.kind.name(), self.pos);
        state.push_event(GameEvent::PowerUpCollected { kind: self.kind });
    }
}
