//! Zombie Survival entry point
//!
//! The browser build starts from `web::wasm_start`. The native binary runs
//! a headless autopilot session:
//!
//! ```text
//! zombie-survival [seed] [seconds] [settings.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use zombie_survival::consts::SIM_DT;
    use zombie_survival::platform::{HudField, NotificationSink, Renderer, UiSink};
    use zombie_survival::sim::{GameState, TickInput};
    use zombie_survival::{App, Settings};

    const DEFAULT_SECONDS: f32 = 120.0;

    /// Logs HUD changes at debug level
    struct LogUi;

    impl UiSink for LogUi {
        fn display(&mut self, field: HudField, value: &str) {
            log::debug!("hud {} = {}", field.as_str(), value);
        }
    }

    /// Logs notifications as they would pop up on screen
    struct LogNotifications;

    impl NotificationSink for LogNotifications {
        fn notify(&mut self, message: &str, _duration_ms: u32) {
            log::info!("{}", message);
        }
    }

    /// Prints a one-line summary every few seconds of sim time
    struct SummaryRenderer {
        next_report: f32,
    }

    impl Renderer for SummaryRenderer {
        fn draw(&mut self, state: &GameState) {
            if state.time < self.next_report {
                return;
            }
            self.next_report = state.time + 10.0;
            log::info!(
                "t={:.0}s level {} wave {} score {} health {:.0} zombies {} bullets {}",
                state.time,
                state.level,
                state.waves.wave,
                state.score,
                state.player.health,
                state.zombies.len(),
                state.bullets.len()
            );
        }
    }

    pub fn run() {
        let args: Vec<String> = std::env::args().skip(1).collect();

        let seed = match args.first() {
            Some(arg) => arg.parse().unwrap_or_else(|_| {
                log::warn!("Invalid seed {:?}, using 1", arg);
                1
            }),
            None => 1,
        };
        let seconds = match args.get(1) {
            Some(arg) => arg.parse().unwrap_or_else(|_| {
                log::warn!("Invalid duration {:?}, using {}s", arg, DEFAULT_SECONDS);
                DEFAULT_SECONDS
            }),
            None => DEFAULT_SECONDS,
        };
        let settings = match args.get(2) {
            Some(path) => Settings::load(Path::new(path)),
            None => Settings::default(),
        };

        log::info!(
            "Running autopilot session: seed {}, {}s, difficulty {}",
            seed,
            seconds,
            settings.difficulty.as_str()
        );

        let mut app = App::new(seed, settings);
        app.start();

        let mut input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut ui = LogUi;
        let mut notifications = LogNotifications;
        let mut renderer = SummaryRenderer { next_report: 0.0 };

        let frames = (seconds / SIM_DT).ceil() as u64;
        for _ in 0..frames {
            app.frame(SIM_DT, &mut input, &mut ui, &mut notifications);
            app.render(&mut renderer);
            if app.is_game_over() || app.is_halted() {
                break;
            }
        }

        let state = &app.state;
        log::info!(
            "Session ended after {:.1}s: score {}, level {}, wave {}{}",
            state.time,
            state.score,
            state.level,
            state.waves.wave,
            if app.is_game_over() { " (player died)" } else { "" }
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Zombie Survival (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
