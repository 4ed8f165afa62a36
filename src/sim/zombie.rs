//! Zombies: pursue the player, bite on contact, play a short death animation

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::{Knockback, Player};
use crate::consts::*;
use crate::{angle_to, direction};

/// Level-scaled stats for a freshly spawned zombie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZombieStats {
    pub speed: f32,
    pub health: f32,
    pub size: f32,
}

impl ZombieStats {
    /// Base stats for a level before per-zombie variation
    pub fn base_for_level(level: u32) -> Self {
        let level = level as f32;
        Self {
            speed: 60.0 + (level * 5.0).min(90.0),
            health: 50.0 + (level * 10.0).min(250.0),
            size: 15.0 + level.min(10.0),
        }
    }

    /// Randomize speed and health by ±20% and size by ±10%
    pub fn roll<R: Rng>(level: u32, speed_scale: f32, rng: &mut R) -> Self {
        let base = Self::base_for_level(level);
        Self {
            speed: base.speed * speed_scale * rng.random_range(0.8..1.2),
            health: base.health * rng.random_range(0.8..1.2),
            size: base.size * rng.random_range(0.9..1.1),
        }
    }
}

/// A zombie entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zombie {
    pub id: u32,
    pub pos: Vec2,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    /// Collision radius
    pub size: f32,
    /// Seconds until the next bite is allowed
    pub attack_cooldown: f32,
    pub knockback: Knockback,
    /// Direction the zombie faces (toward the player)
    pub facing: f32,
    /// Lethal damage taken; inert until removed
    pub dying: bool,
    pub death_timer: f32,
    /// False once the death animation has finished
    pub active: bool,
    /// How many times the zombie was teleported back toward the player
    #[serde(default)]
    pub relocations: u8,
    /// Sprite variant for the renderer
    #[serde(default)]
    pub sprite: u8,
}

impl Zombie {
    pub fn new(id: u32, pos: Vec2, stats: ZombieStats) -> Self {
        Self {
            id,
            pos,
            speed: stats.speed,
            health: stats.health,
            max_health: stats.health,
            size: stats.size,
            attack_cooldown: 0.0,
            knockback: Knockback::default(),
            facing: 0.0,
            dying: false,
            death_timer: 0.0,
            active: true,
            relocations: 0,
            sprite: 0,
        }
    }

    pub fn update(&mut self, dt: f32, player_pos: Vec2) {
        if self.dying {
            self.death_timer += dt;
            if self.death_timer >= ZOMBIE_DEATH_SECS {
                self.active = false;
            }
            return;
        }

        if self.attack_cooldown > 0.0 {
            self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        }

        self.facing = angle_to(self.pos, player_pos);

        if self.knockback.is_active() {
            self.pos += self.knockback.step(dt);
        } else {
            self.pos += direction(self.facing) * self.speed * dt;
        }
    }

    /// Apply bullet damage. Returns true exactly once, on the lethal hit.
    pub fn take_damage(&mut self, amount: f32, source_angle: f32) -> bool {
        self.health -= amount;
        if self.dying {
            return false;
        }

        self.knockback = Knockback::new(source_angle, ZOMBIE_HIT_KNOCKBACK);

        if self.health <= 0.0 {
            self.dying = true;
            self.death_timer = 0.0;
            return true;
        }
        false
    }

    /// Bite the player if the cooldown allows. Returns true if the player died.
    pub fn attack<R: Rng>(&mut self, player: &mut Player, rng: &mut R) -> bool {
        if self.dying || self.attack_cooldown > 0.0 {
            return false;
        }

        let min = player.max_health * ZOMBIE_MIN_DAMAGE_FRACTION;
        let max = player.max_health * ZOMBIE_MAX_DAMAGE_FRACTION;
        let damage = (min + rng.random::<f32>() * (max - min)).floor();
        player.take_damage(damage);

        // Hop back from the player and shove the player the other way
        let away = angle_to(player.pos, self.pos);
        self.pos += direction(away) * ZOMBIE_RECOIL_DISTANCE;
        player.apply_knockback(away + std::f32::consts::PI, PLAYER_HIT_KNOCKBACK);

        self.attack_cooldown = ZOMBIE_ATTACK_COOLDOWN;

        player.is_dead()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn stats() -> ZombieStats {
        ZombieStats {
            speed: 100.0,
            health: 50.0,
            size: 16.0,
        }
    }

    fn zombie_at(x: f32, y: f32) -> Zombie {
        Zombie::new(1, Vec2::new(x, y), stats())
    }

    #[test]
    fn test_pursues_player() {
        let mut z = zombie_at(0.0, 0.0);
        z.update(0.5, Vec2::new(1000.0, 0.0));
        assert!((z.pos.x - 50.0).abs() < 1e-3);
        assert!(z.pos.y.abs() < 1e-3);
    }

    #[test]
    fn test_knockback_before_pursuit() {
        let mut z = zombie_at(0.0, 0.0);
        assert!(!z.take_damage(10.0, std::f32::consts::PI));
        z.update(0.1, Vec2::new(1000.0, 0.0));
        // Pushed away from the player despite pursuing
        assert!(z.pos.x < 0.0);
        assert!((z.knockback.force - (ZOMBIE_HIT_KNOCKBACK - KNOCKBACK_RECOVERY * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn test_kill_reported_once() {
        let mut z = zombie_at(0.0, 0.0);
        assert!(!z.take_damage(25.0, 0.0));
        assert!(z.take_damage(25.0, 0.0));
        assert!(z.dying);
        assert!(!z.take_damage(25.0, 0.0));
        assert!(z.health < 0.0);
    }

    #[test]
    fn test_dying_zombie_is_inert() {
        let mut z = zombie_at(0.0, 0.0);
        z.attack_cooldown = 0.7;
        z.take_damage(100.0, 0.0);
        z.knockback = Knockback::default();
        let pos = z.pos;

        z.update(0.25, Vec2::new(100.0, 0.0));
        assert_eq!(z.pos, pos);
        assert_eq!(z.attack_cooldown, 0.7);
        assert!(z.active);

        let mut player = Player::new(Vec2::new(10.0, 0.0));
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(!z.attack(&mut player, &mut rng));
        assert_eq!(player.health, player.max_health);

        z.update(0.25, Vec2::new(100.0, 0.0));
        assert!(!z.active);
    }

    #[test]
    fn test_attack_damage_range_and_cooldown() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..50 {
            let mut player = Player::new(Vec2::new(100.0, 100.0));
            let mut z = zombie_at(90.0, 100.0);
            assert!(!z.attack(&mut player, &mut rng));
            let dealt = player.max_health - player.health;
            assert!((15.0..=30.0).contains(&dealt), "dealt {dealt}");
            assert_eq!(z.attack_cooldown, ZOMBIE_ATTACK_COOLDOWN);
            // Zombie recoiled away, player shoved the other way
            assert!((z.pos.x - (90.0 - ZOMBIE_RECOIL_DISTANCE)).abs() < 1e-3);
            assert!(player.knockback.is_active());
            assert!(crate::direction(player.knockback.angle).x > 0.99);
            // Cooling down
            let health = player.health;
            player.invulnerable.active = false;
            assert!(!z.attack(&mut player, &mut rng));
            assert_eq!(player.health, health);
        }
    }

    #[test]
    fn test_attack_reports_death() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut player = Player::new(Vec2::ZERO);
        player.health = 5.0;
        let mut z = zombie_at(10.0, 0.0);
        assert!(z.attack(&mut player, &mut rng));
        assert_eq!(player.health, 0.0);
    }

    #[test]
    fn test_stats_scale_with_level_and_cap() {
        let l1 = ZombieStats::base_for_level(1);
        assert_eq!(l1.speed, 65.0);
        assert_eq!(l1.health, 60.0);
        assert_eq!(l1.size, 16.0);

        let l50 = ZombieStats::base_for_level(50);
        assert_eq!(l50.speed, 150.0);
        assert_eq!(l50.health, 300.0);
        assert_eq!(l50.size, 25.0);
    }

    #[test]
    fn test_rolled_stats_within_variation() {
        let mut rng = Pcg32::seed_from_u64(11);
        let base = ZombieStats::base_for_level(4);
        for _ in 0..100 {
            let s = ZombieStats::roll(4, 1.0, &mut rng);
            assert!(s.speed >= base.speed * 0.8 && s.speed <= base.speed * 1.2);
            assert!(s.health >= base.health * 0.8 && s.health <= base.health * 1.2);
            assert!(s.size >= base.size * 0.9 && s.size <= base.size * 1.1);
        }
    }
}
