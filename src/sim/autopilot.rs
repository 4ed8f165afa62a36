//! Idle/demo mode - a simple bot that plays the game
//!
//! Used by the attract screen and by headless runs. Reads the state only, so
//! a session driven by the autopilot stays deterministic.

use glam::Vec2;

use super::player::MoveInput;
use super::state::GameState;
use super::tick::TickInput;
use crate::{angle_to, direction, distance, normalize_angle};

/// Zombies closer than this make the bot back off
const DANGER_RADIUS: f32 = 220.0;
/// Start steering away from map edges inside this band
const EDGE_AVOID_MARGIN: f32 = 150.0;
/// Axis component needed before a key is pressed
const STEER_THRESHOLD: f32 = 0.38;

/// Decide this tick's input from the current state
pub fn plan(state: &GameState) -> TickInput {
    let player = state.player.pos;

    let nearest_zombie = state
        .zombies
        .iter()
        .filter(|z| !z.dying)
        .min_by(|a, b| {
            distance(a.pos, player)
                .partial_cmp(&distance(b.pos, player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let nearest_powerup = state.powerups.iter().min_by(|a, b| {
        distance(a.pos, player)
            .partial_cmp(&distance(b.pos, player))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut heading = Vec2::ZERO;
    if let Some(zombie) = nearest_zombie.filter(|z| distance(z.pos, player) < DANGER_RADIUS) {
        // Back away, wobbling so the bot does not run in a straight line
        let away = angle_to(zombie.pos, player);
        let wobble = (state.time * 0.7).sin() * 0.5;
        heading = direction(normalize_angle(away + wobble));
    } else if let Some(powerup) = nearest_powerup {
        heading = (powerup.pos - player).normalize_or_zero();
    }
    heading += edge_push(player, state.settings.map_size());

    let (aim, firing) = match nearest_zombie {
        // Aim in screen space: the camera maps world to view
        Some(zombie) => (zombie.pos - state.camera, true),
        None => (state.view_size() / 2.0 + direction(state.player.aim_angle), false),
    };

    TickInput {
        movement: steer(heading),
        aim,
        firing,
        autopilot: false,
    }
}

/// Push away from walls the player is hugging
fn edge_push(pos: Vec2, map: Vec2) -> Vec2 {
    let axis = |p: f32, extent: f32| {
        if p < EDGE_AVOID_MARGIN {
            1.0
        } else if p > extent - EDGE_AVOID_MARGIN {
            -1.0
        } else {
            0.0
        }
    };
    Vec2::new(axis(pos.x, map.x), axis(pos.y, map.y))
}

/// Turn a desired heading into key presses
fn steer(heading: Vec2) -> MoveInput {
    let dir = heading.normalize_or_zero();
    MoveInput {
        up: dir.y < -STEER_THRESHOLD,
        down: dir.y > STEER_THRESHOLD,
        left: dir.x < -STEER_THRESHOLD,
        right: dir.x > STEER_THRESHOLD,
    }
}
