//! Host harness
//!
//! Drives the simulation from a variable-rate frame callback: a fixed-step
//! accumulator feeds `tick`, and each tick runs behind an error boundary so a
//! defect halts the session instead of tearing down the host loop.

use std::panic::{self, AssertUnwindSafe};

use crate::consts::*;
use crate::hud::Hud;
use crate::platform::{InputProvider, NotificationSink, Renderer, UiSink};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickInput, tick};

pub struct App {
    pub state: GameState,
    accumulator: f32,
    hud: Hud,
    halted: bool,
}

impl App {
    /// Create a session (not started yet)
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed, settings),
            accumulator: 0.0,
            hud: Hud::new(),
            halted: false,
        }
    }

    /// Resume from a snapshot
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            hud: Hud::new(),
            halted: false,
        }
    }

    pub fn start(&mut self) {
        self.reset_host();
        self.state.start();
    }

    /// Start over with a new seed, dropping everything from the last session
    pub fn restart(&mut self, seed: u64) {
        self.reset_host();
        self.state.restart(seed);
    }

    /// Stop ticking; the state stays readable for the renderer
    pub fn stop(&mut self) {
        if !self.halted {
            log::info!("Session stopped at {:.1}s", self.state.time);
        }
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.state.resize(width, height);
        } else {
            log::warn!("Ignoring invalid view size {}x{}", width, height);
        }
    }

    fn reset_host(&mut self) {
        self.accumulator = 0.0;
        self.halted = false;
        self.hud.reset();
    }

    /// Advance by one host frame
    ///
    /// Runs as many fixed `SIM_DT` ticks as the accumulated time allows (at
    /// most `MAX_SUBSTEPS`), then pushes HUD changes and notifications.
    /// Returns the number of ticks run.
    pub fn frame(
        &mut self,
        frame_dt: f32,
        input: &mut dyn InputProvider,
        ui: &mut dyn UiSink,
        notifications: &mut dyn NotificationSink,
    ) -> u32 {
        if self.halted {
            return 0;
        }
        if !frame_dt.is_finite() || frame_dt < 0.0 {
            log::warn!("Ignoring invalid frame delta {}", frame_dt);
            return 0;
        }

        // Cap delta time to prevent spiral of death after a pause
        self.accumulator += frame_dt.min(MAX_DT);

        let input = input.poll();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if !self.guarded_tick(&input) {
                break;
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than carrying it into the next frame
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let events = self.state.drain_events();
        self.hud.announce(&events, notifications);
        self.hud.update(&self.state, ui);

        substeps
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(&self.state);
    }

    fn guarded_tick(&mut self, input: &TickInput) -> bool {
        self.run_guarded(|state| tick(state, input, SIM_DT))
    }

    /// Run a state mutation behind the error boundary.
    /// Returns false (and halts) if it panicked.
    fn run_guarded(&mut self, f: impl FnOnce(&mut GameState)) -> bool {
        let state = &mut self.state;
        match panic::catch_unwind(AssertUnwindSafe(|| f(state))) {
            Ok(()) => true,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                log::error!("Tick panicked at {:.2}s: {}", self.state.time, message);
                self.halted = true;
                false
            }
        }
    }
}
