//! Game state and core simulation types
//!
//! All state that must survive a snapshot/restore for determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::collision::Rect;
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use super::zombie::Zombie;
use crate::consts::*;
use crate::settings::Settings;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not started (start screen)
    NotStarted,
    /// Active gameplay
    Running,
    /// Player died; the simulation is frozen
    GameOver,
}

/// Wave progression within a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveState {
    /// Waves started so far in the session (1-based once the first starts)
    pub wave: u32,
    /// Position of the current wave within its level (1..=WAVES_PER_LEVEL)
    pub wave_in_level: u32,
    /// Zombies of the quota not spawned yet
    pub remaining: u32,
    /// Whether a wave is in progress
    pub active: bool,
    /// Countdown until the next wave starts (seconds)
    pub timer: f32,
    /// Fractional spawns carried between ticks
    pub spawn_accumulator: f32,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            wave: 0,
            wave_in_level: 1,
            remaining: 0,
            active: false,
            timer: FIRST_WAVE_DELAY,
            spawn_accumulator: 0.0,
        }
    }
}

/// Things the presentation layer may want to announce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveStarted { wave: u32, zombies: u32 },
    WaveCleared { wave: u32, healed: f32 },
    LevelUp { level: u32, healed: f32 },
    ZombieKilled { id: u32, score: u64 },
    PlayerHit { damage: f32, health: f32 },
    PowerUpCollected { kind: PowerUpKind },
    Nuke { cleared: u32 },
    WeaponExpired,
    ZombieRelocated { id: u32 },
    ZombieCulled { id: u32 },
    GameOver { score: u64, level: u32, wave: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; its internal state is part of the snapshot
    pub rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Simulation clock (seconds of clamped tick time)
    pub time: f32,
    /// Difficulty level (1-based)
    pub level: u32,
    pub waves: WaveState,
    pub score: u64,
    pub player: Player,
    /// Active zombies (sorted by id)
    pub zombies: Vec<Zombie>,
    /// Active bullets (sorted by id)
    pub bullets: Vec<Bullet>,
    /// Active pickups (sorted by id)
    pub powerups: Vec<PowerUp>,
    /// Top-left of the view in map coordinates
    pub camera: Vec2,
    /// Full-screen nuke flash intensity (1 = peak, decays to 0)
    pub nuke_effect: f32,
    /// Countdown to the next power-up spawn (seconds)
    pub powerup_timer: f32,
    /// Countdown to the next stuck-zombie scan (seconds)
    pub stuck_check_timer: f32,
    /// Events produced since the host last drained them
    #[serde(skip)]
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed (not started yet)
    pub fn new(seed: u64, settings: Settings) -> Self {
        let settings = settings.validated();
        let map = settings.map_size();
        let view = settings.view_size();
        let player = Player::new(map / 2.0);
        let camera = player.pos - view / 2.0;
        let powerup_timer = settings.powerup_interval / 2.0;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            phase: GamePhase::NotStarted,
            time: 0.0,
            level: 1,
            waves: WaveState::default(),
            score: 0,
            player,
            zombies: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            camera,
            nuke_effect: 0.0,
            powerup_timer,
            stuck_check_timer: STUCK_CHECK_INTERVAL,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Begin play from a clean slate
    pub fn start(&mut self) {
        *self = Self::new(self.seed, self.settings.clone());
        self.phase = GamePhase::Running;
        log::info!("Session started (seed {})", self.seed);
    }

    /// Throw away everything and start a fresh session
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.start();
    }

    /// Update the view size (window resized)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.settings.view_width = width;
        self.settings.view_height = height;
        self.update_camera();
    }

    pub fn view_size(&self) -> Vec2 {
        self.settings.view_size()
    }

    pub fn map_bounds(&self) -> Rect {
        Rect::from_size(self.settings.map_size())
    }

    /// Centre the camera on the player
    pub fn update_camera(&mut self) {
        self.camera = self.player.pos - self.view_size() / 2.0;
    }

    /// Zombies alive plus zombies still owed by the current wave
    pub fn zombies_left(&self) -> u32 {
        self.zombies.len() as u32 + self.waves.remaining
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add freshly fired bullets, assigning their IDs
    pub fn add_bullets(&mut self, bullets: Vec<Bullet>) {
        for mut bullet in bullets {
            bullet.id = self.next_entity_id();
            self.bullets.push(bullet);
        }
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.zombies.sort_by_key(|z| z.id);
        self.bullets.sort_by_key(|b| b.id);
        self.powerups.sort_by_key(|p| p.id);
    }

    /// Serialize a snapshot of the session
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a session from a snapshot
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut state: Self = serde_json::from_str(json)?;
        state.settings = state.settings.validated();
        state.normalize_order();
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::BulletKind;

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::new(1, Settings::default());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.pos, Vec2::new(2000.0, 2000.0));
        assert_eq!(state.camera, Vec2::new(2000.0 - 640.0, 2000.0 - 360.0));
    }

    #[test]
    fn test_restart_clears_everything() {
        let mut state = GameState::new(1, Settings::default());
        state.start();
        state.score = 40;
        state.level = 3;
        state.player.health = 12.0;
        state.add_bullets(vec![Bullet::new(BulletKind::Pistol, Vec2::ZERO, 0.0, 0.0)]);
        state.push_event(GameEvent::WeaponExpired);
        state.phase = GamePhase::GameOver;

        state.restart(2);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.seed, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.health, state.player.max_health);
        assert!(state.bullets.is_empty());
        assert!(state.drain_events().is_empty());
        assert_eq!(state.waves, WaveState::default());
        assert_eq!(state.next_entity_id(), 1);
    }

    #[test]
    fn test_bullet_ids_are_assigned() {
        let mut state = GameState::new(1, Settings::default());
        let b = Bullet::new(BulletKind::Spray, Vec2::ZERO, 0.0, 0.0);
        state.add_bullets(vec![b.clone(), b]);
        assert_eq!(state.bullets[0].id, 1);
        assert_eq!(state.bullets[1].id, 2);
    }

    #[test]
    fn test_resize_recenters_camera() {
        let mut state = GameState::new(1, Settings::default());
        state.resize(800.0, 600.0);
        assert_eq!(state.camera, state.player.pos - Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = GameState::new(77, Settings::default());
        state.start();
        state.score = 9;
        state.push_event(GameEvent::WeaponExpired);

        let json = state.to_json().expect("serialize");
        let mut restored = GameState::from_json(&json).expect("deserialize");

        assert_eq!(restored.score, 9);
        assert_eq!(restored.player, state.player);
        assert_eq!(restored.rng, state.rng);
        // Pending events are not part of a snapshot
        assert!(restored.drain_events().is_empty());
        assert_eq!(restored.to_json().expect("serialize"), json);
    }

    #[test]
    fn test_new_session_rejects_zero_powerup_interval() {
        let settings = Settings {
            powerup_interval: 0.0,
            ..Settings::default()
        };
        let state = GameState::new(1, settings);
        assert_eq!(state.settings.powerup_interval, Settings::default().powerup_interval);
        assert!(state.powerup_timer > 0.0);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(GameState::from_json("{\"seed\": 1}").is_err());
    }
}
