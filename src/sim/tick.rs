//! Simulation tick
//!
//! Core game loop that advances the session by one clamped time step.
//! Order per tick: waves and spawning, player, camera, zombies, bullets,
//! power-ups, then firing.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::autopilot;
use super::collision::{circles_overlap, clamp_to_rect};
use super::player::MoveInput;
use super::powerup::PowerUp;
use super::state::{GameEvent, GamePhase, GameState};
use super::zombie::{Zombie, ZombieStats};
use crate::consts::*;
use crate::{angle_to, direction, distance};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub movement: MoveInput,
    /// Pointer position in screen coordinates
    pub aim: Vec2,
    /// Fire button held
    pub firing: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub autopilot: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Frozen before start and after game over
    if !state.is_running() {
        return;
    }

    // Cap delta time to prevent huge jumps after a pause
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };

    let planned;
    let input = if input.autopilot {
        planned = autopilot::plan(state);
        &planned
    } else {
        input
    };

    state.time += dt;

    update_waves(state, dt);
    update_powerup_spawns(state, dt);
    if state.settings.stuck_remediation {
        remediate_stuck_zombies(state, dt);
    }

    if state.player.update(dt, &input.movement) {
        state.push_event(GameEvent::WeaponExpired);
    }
    let bounds = state.map_bounds();
    state.player.pos = clamp_to_rect(state.player.pos, state.player.radius, &bounds);
    state.update_camera();

    if update_zombies(state, dt) {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {}, level {}, wave {}",
            state.score,
            state.level,
            state.waves.wave
        );
        state.push_event(GameEvent::GameOver {
            score: state.score,
            level: state.level,
            wave: state.waves.wave,
        });
        return;
    }

    update_bullets(state, dt);
    update_powerups(state, dt);

    if input.firing && !input.aim.is_finite() {
        log::warn!("Ignoring fire request with invalid aim {:?}", input.aim);
    } else if input.firing {
        let view_center = state.view_size() / 2.0;
        let now = state.time;
        if let Some(bullets) = state.player.shoot(input.aim, view_center, now, &mut state.rng) {
            state.add_bullets(bullets);
        }
    }

    state.nuke_effect = (state.nuke_effect - dt * NUKE_FADE_RATE).max(0.0);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Zombie quota for a wave, before spawning starts
pub fn wave_quota(level: u32, wave_in_level: u32, scale: f32) -> u32 {
    let base = 5 + level.saturating_sub(1) * 3 + wave_in_level.saturating_sub(1) * 2;
    ((base as f32 * scale).round() as u32).max(1)
}

fn start_wave(state: &mut GameState) {
    let quota = wave_quota(
        state.level,
        state.waves.wave_in_level,
        state.settings.difficulty.quota_scale(),
    );
    let waves = &mut state.waves;
    waves.wave += 1;
    waves.active = true;
    waves.remaining = quota;
    // First zombie shows up right away
    waves.spawn_accumulator = 1.0;

    log::info!(
        "Wave {} started (level {}, {} zombies)",
        waves.wave,
        state.level,
        quota
    );
    let wave = waves.wave;
    state.push_event(GameEvent::WaveStarted {
        wave,
        zombies: quota,
    });
}

fn complete_wave(state: &mut GameState) {
    state.waves.active = false;
    state.waves.timer = WAVE_DELAY;

    if state.waves.wave_in_level >= WAVES_PER_LEVEL {
        state.level += 1;
        state.waves.wave_in_level = 1;
        state.player.heal(LEVEL_CLEAR_HEAL);
        log::info!("Level {} reached", state.level);
        state.push_event(GameEvent::LevelUp {
            level: state.level,
            healed: LEVEL_CLEAR_HEAL,
        });
    } else {
        state.waves.wave_in_level += 1;
        state.player.heal(WAVE_CLEAR_HEAL);
        log::info!("Wave {} cleared", state.waves.wave);
        state.push_event(GameEvent::WaveCleared {
            wave: state.waves.wave,
            healed: WAVE_CLEAR_HEAL,
        });
    }
}

/// Wave countdown, completion and gradual spawning
fn update_waves(state: &mut GameState, dt: f32) {
    if !state.waves.active {
        state.waves.timer -= dt;
        if state.waves.timer <= 0.0 {
            start_wave(state);
        }
    } else if state.zombies.is_empty() && state.waves.remaining == 0 {
        complete_wave(state);
    }

    if state.waves.active && state.waves.remaining > 0 {
        let rate = SPAWN_RATE_BASE + state.level as f32 * SPAWN_RATE_PER_LEVEL;
        let waves = &mut state.waves;
        waves.spawn_accumulator += dt * rate;
        let count = (waves.spawn_accumulator.floor() as u32)
            .min(MAX_SPAWNS_PER_TICK)
            .min(waves.remaining);
        waves.spawn_accumulator =
            (waves.spawn_accumulator - count as f32).min(MAX_SPAWNS_PER_TICK as f32);
        waves.remaining -= count;

        for _ in 0..count {
            spawn_zombie(state);
        }
    }
}

/// Place a zombie at a random bearing 400-700 units from the player
fn spawn_zombie(state: &mut GameState) {
    let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
    let dist = state.rng.random_range(SPAWN_MIN_DISTANCE..SPAWN_MAX_DISTANCE);
    let pos = state.player.pos + direction(angle) * dist;
    let pos = state.map_bounds().inset(SPAWN_EDGE_MARGIN).clamp(pos);

    let speed_scale = state.settings.difficulty.speed_scale();
    let stats = ZombieStats::roll(state.level, speed_scale, &mut state.rng);
    let sprite = state.rng.random_range(0..3u8);

    let id = state.next_entity_id();
    let mut zombie = Zombie::new(id, pos, stats);
    zombie.sprite = sprite;
    log::debug!("Spawned zombie {} at {:?}", id, pos);
    state.zombies.push(zombie);
}

fn update_powerup_spawns(state: &mut GameState, dt: f32) {
    state.powerup_timer -= dt;
    if state.powerup_timer > 0.0 {
        return;
    }

    let id = state.next_entity_id();
    let camera = state.camera;
    let view = state.view_size();
    let map = state.settings.map_size();
    let powerup = PowerUp::random(id, &mut state.rng, camera, view, map);
    log::debug!("Spawned {} power-up at {:?}", powerup.kind.name(), powerup.pos);
    state.powerups.push(powerup);

    state.powerup_timer = state.settings.powerup_interval * state.rng.random_range(0.8..1.2);
}

/// Teleport zombies that drifted too far (or off the map) back toward the
/// player; cull repeat offenders so a wave can always finish.
fn remediate_stuck_zombies(state: &mut GameState, dt: f32) {
    state.stuck_check_timer -= dt;
    if state.stuck_check_timer > 0.0 {
        return;
    }
    state.stuck_check_timer = STUCK_CHECK_INTERVAL;

    let player_pos = state.player.pos;
    let bounds = state.map_bounds();
    let spawn_area = bounds.inset(SPAWN_EDGE_MARGIN);
    let mut events = Vec::new();

    for zombie in state.zombies.iter_mut().filter(|z| !z.dying) {
        let stray = distance(zombie.pos, player_pos) > STUCK_DISTANCE;
        if !stray && bounds.contains(zombie.pos) {
            continue;
        }

        if zombie.relocations >= MAX_RELOCATIONS {
            zombie.active = false;
            log::debug!("Culled stuck zombie {}", zombie.id);
            events.push(GameEvent::ZombieCulled { id: zombie.id });
        } else {
            let angle = angle_to(player_pos, zombie.pos);
            zombie.pos = spawn_area.clamp(player_pos + direction(angle) * RELOCATE_DISTANCE);
            zombie.relocations += 1;
            log::debug!("Relocated zombie {} ({})", zombie.id, zombie.relocations);
            events.push(GameEvent::ZombieRelocated { id: zombie.id });
        }
    }

    state.zombies.retain(|z| z.active);
    for event in events {
        state.push_event(event);
    }
}

/// Move zombies, let them bite, drop finished corpses.
/// Returns true if the player died.
fn update_zombies(state: &mut GameState, dt: f32) -> bool {
    let mut player_died = false;

    for i in 0..state.zombies.len() {
        state.zombies[i].update(dt, state.player.pos);

        let zombie = &state.zombies[i];
        if !zombie.active || zombie.dying {
            continue;
        }
        if !circles_overlap(zombie.pos, zombie.size, state.player.pos, state.player.radius) {
            continue;
        }

        let health_before = state.player.health;
        let died = state.zombies[i].attack(&mut state.player, &mut state.rng);
        let damage = health_before - state.player.health;
        if damage > 0.0 {
            state.push_event(GameEvent::PlayerHit {
                damage,
                health: state.player.health,
            });
        }
        if died {
            player_died = true;
            break;
        }
    }

    state.zombies.retain(|z| z.active);
    player_died
}

/// Move bullets, cull off-screen ones, resolve hits on living zombies
fn update_bullets(state: &mut GameState, dt: f32) {
    let view = state.view_size();
    let camera = state.camera;
    let bullets = std::mem::take(&mut state.bullets);
    let mut kept = Vec::with_capacity(bullets.len());

    for mut bullet in bullets {
        bullet.update(dt);
        if bullet.is_out_of_bounds(view, camera) {
            continue;
        }

        let target = state
            .zombies
            .iter_mut()
            .find(|z| !z.dying && circles_overlap(bullet.pos, bullet.radius, z.pos, z.size));

        match target {
            Some(zombie) => {
                if zombie.take_damage(bullet.damage, bullet.angle) {
                    let id = zombie.id;
                    state.score += 1;
                    state.push_event(GameEvent::ZombieKilled {
                        id,
                        score: state.score,
                    });
                }
            }
            None => kept.push(bullet),
        }
    }

    state.bullets = kept;
}

/// Animate pickups and apply the ones the player touches
fn update_powerups(state: &mut GameState, dt: f32) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let mut collected = Vec::new();

    state.powerups.retain_mut(|p| {
        p.update(dt);
        if circles_overlap(p.pos, p.radius, player_pos, player_radius) {
            collected.push(p.clone());
            false
        } else {
            true
        }
    });

    for powerup in collected {
        powerup.apply(state);
    }
}
