//! Bullets fired by the player
//!
//! A bullet travels in a straight line until it hits a zombie or leaves
//! the visible area.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::direction;

/// Which weapon produced a bullet (drives damage and radius)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletKind {
    Pistol,
    Spray,
}

impl BulletKind {
    pub fn damage(&self) -> f32 {
        match self {
            BulletKind::Pistol => PISTOL_DAMAGE,
            BulletKind::Spray => SPRAY_DAMAGE,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            BulletKind::Pistol => PISTOL_BULLET_RADIUS,
            BulletKind::Spray => SPRAY_BULLET_RADIUS,
        }
    }
}

/// A bullet entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    /// Assigned by the game state when the bullet is added
    pub id: u32,
    pub kind: BulletKind,
    pub pos: Vec2,
    /// Heading in radians (aim plus any spread)
    pub angle: f32,
    pub speed: f32,
    pub damage: f32,
    pub radius: f32,
}

impl Bullet {
    /// Build a bullet heading along `aim + spread`
    ///
    /// `spread` is zero for the pistol and a small random offset for spray
    /// pellets.
    pub fn new(kind: BulletKind, pos: Vec2, aim: f32, spread: f32) -> Self {
        Self {
            id: 0,
            kind,
            pos,
            angle: aim + spread,
            speed: BULLET_SPEED,
            damage: kind.damage(),
            radius: kind.radius(),
        }
    }

    pub fn velocity(&self) -> Vec2 {
        direction(self.angle) * self.speed
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.velocity() * dt;
    }

    /// True once the bullet is more than the cull margin outside the view
    /// (or its position is no longer a real number)
    pub fn is_out_of_bounds(&self, view: Vec2, camera: Vec2) -> bool {
        let screen = self.pos - camera;
        !screen.is_finite()
            || screen.x < -BULLET_CULL_MARGIN
            || screen.x > view.x + BULLET_CULL_MARGIN
            || screen.y < -BULLET_CULL_MARGIN
            || screen.y > view.y + BULLET_CULL_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_bullet_moves_along_angle() {
        let mut bullet = Bullet::new(BulletKind::Pistol, Vec2::new(100.0, 100.0), 0.0, 0.0);
        bullet.update(0.1);
        assert!((bullet.pos.x - 150.0).abs() < 1e-4);
        assert!((bullet.pos.y - 100.0).abs() < 1e-4);

        let mut bullet = Bullet::new(BulletKind::Pistol, Vec2::ZERO, FRAC_PI_2, 0.0);
        bullet.update(1.0);
        assert!(bullet.pos.x.abs() < 1e-3);
        assert!((bullet.pos.y - BULLET_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_spread_offsets_heading() {
        let bullet = Bullet::new(BulletKind::Spray, Vec2::ZERO, 1.0, 0.15);
        assert!((bullet.angle - 1.15).abs() < 1e-6);
        assert_eq!(bullet.damage, SPRAY_DAMAGE);
        assert_eq!(bullet.radius, SPRAY_BULLET_RADIUS);
    }

    #[test]
    fn test_out_of_bounds_margin() {
        let view = Vec2::new(800.0, 600.0);
        let camera = Vec2::new(1000.0, 1000.0);
        let at = |x: f32, y: f32| Bullet::new(BulletKind::Pistol, Vec2::new(x, y), 0.0, 0.0);

        assert!(!at(1400.0, 1300.0).is_out_of_bounds(view, camera));
        // Just outside the view but inside the margin
        assert!(!at(960.0, 1300.0).is_out_of_bounds(view, camera));
        assert!(!at(1840.0, 1640.0).is_out_of_bounds(view, camera));
        // Past the margin on each side
        assert!(at(949.0, 1300.0).is_out_of_bounds(view, camera));
        assert!(at(1851.0, 1300.0).is_out_of_bounds(view, camera));
        assert!(at(1400.0, 949.0).is_out_of_bounds(view, camera));
        assert!(at(1400.0, 1651.0).is_out_of_bounds(view, camera));
    }

    #[test]
    fn test_nan_bullet_is_culled() {
        let bullet = Bullet::new(BulletKind::Spray, Vec2::new(f32::NAN, 0.0), 0.0, 0.0);
        assert!(bullet.is_out_of_bounds(Vec2::new(800.0, 600.0), Vec2::ZERO));
    }

    proptest! {
        #[test]
        fn bullet_eventually_leaves_view(angle in -3.14f32..3.14) {
            let view = Vec2::new(800.0, 600.0);
            let camera = Vec2::ZERO;
            let mut bullet = Bullet::new(BulletKind::Pistol, Vec2::new(400.0, 300.0), angle, 0.0);
            let mut steps = 0;
            while !bullet.is_out_of_bounds(view, camera) {
                bullet.update(0.1);
                steps += 1;
                prop_assert!(steps < 100);
            }
        }
    }
}
