//! The player-controlled survivor

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletKind};
use crate::consts::*;
use crate::{angle_to, direction};

/// Directional movement flags for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    /// Movement direction with diagonals normalized to unit length
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Weapons the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Pistol,
    Spray,
}

impl Weapon {
    /// Minimum seconds between shots
    pub fn fire_interval(&self) -> f32 {
        match self {
            Weapon::Pistol => PISTOL_FIRE_INTERVAL,
            Weapon::Spray => SPRAY_FIRE_INTERVAL,
        }
    }

    pub fn bullet_kind(&self) -> BulletKind {
        match self {
            Weapon::Pistol => BulletKind::Pistol,
            Weapon::Spray => BulletKind::Spray,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weapon::Pistol => "PISTOL",
            Weapon::Spray => "SPRAY",
        }
    }
}

/// Linear knockback: pushes along `angle`, force bleeds off over time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Knockback {
    pub force: f32,
    pub angle: f32,
}

impl Knockback {
    pub fn new(angle: f32, force: f32) -> Self {
        Self { force, angle }
    }

    pub fn is_active(&self) -> bool {
        self.force > 0.0
    }

    /// Displacement for this tick, decaying the force toward zero
    pub fn step(&mut self, dt: f32) -> Vec2 {
        let offset = direction(self.angle) * self.force * dt;
        self.force = (self.force - KNOCKBACK_RECOVERY * dt).max(0.0);
        offset
    }
}

/// A boolean effect with a countdown (seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub active: bool,
    pub remaining: f32,
}

impl TimedEffect {
    /// Start the effect, replacing any remaining time
    pub fn activate(&mut self, secs: f32) {
        self.active = true;
        self.remaining = secs;
    }

    /// Count down; returns true on the tick the effect ends
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.active = false;
            self.remaining = 0.0;
            return true;
        }
        false
    }
}

#[inline]
fn ms_to_secs(ms: u32) -> f32 {
    ms as f32 / 1000.0
}

/// The player entity (one per session)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    /// Base movement speed (units/sec)
    pub speed: f32,
    pub weapon: Weapon,
    /// Seconds until a temporary weapon reverts to the pistol
    pub weapon_timer: f32,
    /// Simulation time of the last accepted shot
    pub last_shot: Option<f32>,
    /// Last aim direction (for rendering the gun)
    pub aim_angle: f32,
    pub invulnerable: TimedEffect,
    /// Cosmetic flash after taking damage (seconds remaining)
    pub damage_flash: f32,
    pub knockback: Knockback,
    pub shield: TimedEffect,
    pub speed_boost: TimedEffect,
    pub regeneration: TimedEffect,
    /// Time accumulated toward the next regeneration heal
    pub regen_counter: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
            weapon: Weapon::Pistol,
            weapon_timer: 0.0,
            last_shot: None,
            aim_angle: 0.0,
            invulnerable: TimedEffect::default(),
            damage_flash: 0.0,
            knockback: Knockback::default(),
            shield: TimedEffect::default(),
            speed_boost: TimedEffect::default(),
            regeneration: TimedEffect::default(),
            regen_counter: 0.0,
        }
    }

    /// Movement speed including the speed boost
    pub fn effective_speed(&self) -> f32 {
        if self.speed_boost.active {
            self.speed * SPEED_BOOST_MULTIPLIER
        } else {
            self.speed
        }
    }

    /// Advance movement and timers. Returns true if a temporary weapon
    /// expired during this tick.
    pub fn update(&mut self, dt: f32, input: &MoveInput) -> bool {
        if self.knockback.is_active() {
            self.pos += self.knockback.step(dt);
        } else {
            self.pos += input.direction() * self.effective_speed() * dt;
        }

        let mut weapon_expired = false;
        if self.weapon != Weapon::Pistol && self.weapon_timer > 0.0 {
            self.weapon_timer -= dt;
            if self.weapon_timer <= 0.0 {
                self.weapon_timer = 0.0;
                self.weapon = Weapon::Pistol;
                weapon_expired = true;
            }
        }

        self.invulnerable.tick(dt);
        self.damage_flash = (self.damage_flash - dt).max(0.0);
        self.shield.tick(dt);
        self.speed_boost.tick(dt);

        if self.regeneration.active {
            if self.health < self.max_health {
                self.regen_counter += dt;
                if self.regen_counter >= REGEN_INTERVAL_SECS {
                    self.heal(REGEN_AMOUNT);
                    self.regen_counter = 0.0;
                }
            }
            if self.regeneration.tick(dt) {
                self.regen_counter = 0.0;
            }
        }

        weapon_expired
    }

    /// Fire toward a screen-space target.
    ///
    /// The player is always drawn at the view centre, so the aim angle is
    /// measured from `view_center`. Returns `None` while the weapon is
    /// cooling down.
    pub fn shoot<R: Rng>(
        &mut self,
        target: Vec2,
        view_center: Vec2,
        now: f32,
        rng: &mut R,
    ) -> Option<Vec<Bullet>> {
        let angle = angle_to(view_center, target);
        self.aim_angle = angle;

        if let Some(last) = self.last_shot {
            if now - last < self.weapon.fire_interval() {
                return None;
            }
        }
        self.last_shot = Some(now);

        let kind = self.weapon.bullet_kind();
        let bullets = match self.weapon {
            Weapon::Pistol => vec![Bullet::new(kind, self.pos, angle, 0.0)],
            Weapon::Spray => (0..SPRAY_PELLETS)
                .map(|_| {
                    let spread = (rng.random::<f32>() - 0.5) * SPRAY_SPREAD;
                    Bullet::new(kind, self.pos, angle, spread)
                })
                .collect(),
        };
        Some(bullets)
    }

    /// Apply incoming damage. Returns true if the player died.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let amount = if self.shield.active {
            (amount * SHIELD_DAMAGE_FACTOR).floor()
        } else {
            amount
        };

        if self.invulnerable.active {
            return false;
        }

        self.health = (self.health - amount).max(0.0);
        self.damage_flash = DAMAGE_FLASH_SECS;
        self.invulnerable.activate(INVULNERABLE_SECS);

        self.health <= 0.0
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn apply_knockback(&mut self, angle: f32, force: f32) {
        self.knockback = Knockback::new(angle, force);
    }

    pub fn set_weapon(&mut self, weapon: Weapon, duration_ms: u32) {
        self.weapon = weapon;
        self.weapon_timer = ms_to_secs(duration_ms);
    }

    pub fn activate_shield(&mut self, duration_ms: u32) {
        self.shield.activate(ms_to_secs(duration_ms));
    }

    pub fn activate_speed_boost(&mut self, duration_ms: u32) {
        self.speed_boost.activate(ms_to_secs(duration_ms));
    }

    pub fn activate_regeneration(&mut self, duration_ms: u32) {
        self.regeneration.activate(ms_to_secs(duration_ms));
        self.regen_counter = 0.0;
    }
}
