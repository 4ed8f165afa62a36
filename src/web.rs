//! Browser entry point
//!
//! Exposes the host harness to a JS canvas page. The page owns the DOM,
//! the canvas renderer and the event listeners; it pushes input into
//! `WebGame`, calls `frame` from `requestAnimationFrame`, and reads back the
//! snapshot plus queued HUD values and notifications as JSON.

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::platform::{HudField, NotificationSink, UiSink};
use crate::settings::Settings;
use crate::sim::TickInput;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed (module re-initialized)
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Zombie Survival starting...");
}

/// HUD values queued for the page
#[derive(Default)]
struct PageHud {
    fields: Vec<(HudField, String)>,
}

impl UiSink for PageHud {
    fn display(&mut self, field: HudField, value: &str) {
        self.fields.push((field, value.to_string()));
    }
}

/// Notifications queued for the page
#[derive(Default)]
struct PageNotifications {
    pending: Vec<(String, u32)>,
}

impl NotificationSink for PageNotifications {
    fn notify(&mut self, message: &str, duration_ms: u32) {
        self.pending.push((message.to_string(), duration_ms));
    }
}

#[wasm_bindgen]
pub struct WebGame {
    app: App,
    input: TickInput,
    hud: PageHud,
    notifications: PageNotifications,
    last_time: f64,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `settings_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str) -> WebGame {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).unwrap_or_else(|e| {
                log::warn!("Invalid settings, using defaults: {}", e);
                Settings::default()
            })
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            app: App::new(seed, settings),
            input: TickInput::default(),
            hud: PageHud::default(),
            notifications: PageNotifications::default(),
            last_time: 0.0,
        }
    }

    /// Resume from a snapshot produced by `snapshot()`
    pub fn from_snapshot(json: &str) -> Result<WebGame, JsValue> {
        let state = crate::sim::GameState::from_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebGame {
            app: App::from_state(state),
            input: TickInput::default(),
            hud: PageHud::default(),
            notifications: PageNotifications::default(),
            last_time: 0.0,
        })
    }

    pub fn start(&mut self) {
        self.last_time = 0.0;
        self.app.start();
    }

    pub fn restart(&mut self) {
        let seed = js_sys::Date::now() as u64;
        self.last_time = 0.0;
        self.app.restart(seed);
        log::info!("Game restarted with seed: {}", seed);
    }

    pub fn stop(&mut self) {
        self.app.stop();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.app.resize(width, height);
    }

    pub fn set_keys(&mut self, up: bool, down: bool, left: bool, right: bool) {
        self.input.movement.up = up;
        self.input.movement.down = down;
        self.input.movement.left = left;
        self.input.movement.right = right;
    }

    /// Pointer position in canvas pixels
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.input.aim = glam::Vec2::new(x, y);
    }

    pub fn set_firing(&mut self, firing: bool) {
        self.input.firing = firing;
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    /// Advance from a `requestAnimationFrame` timestamp (milliseconds)
    pub fn frame(&mut self, time: f64) -> u32 {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            crate::consts::SIM_DT
        };
        self.last_time = time;

        self.app
            .frame(dt, &mut self.input, &mut self.hud, &mut self.notifications)
    }

    pub fn is_game_over(&self) -> bool {
        self.app.is_game_over()
    }

    pub fn is_halted(&self) -> bool {
        self.app.is_halted()
    }

    /// Full state for the canvas renderer (and for saving)
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.app
            .state
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Changed HUD fields since the last call, as `{"field": "value"}`
    pub fn take_hud(&mut self) -> String {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .hud
            .fields
            .drain(..)
            .map(|(field, value)| (field.as_str().to_string(), value.into()))
            .collect();
        serde_json::Value::Object(fields).to_string()
    }

    /// Pending notifications as `[{"message": ..., "duration_ms": ...}]`
    pub fn take_notifications(&mut self) -> String {
        let notes: Vec<serde_json::Value> = self
            .notifications
            .pending
            .drain(..)
            .map(|(message, duration_ms)| {
                serde_json::json!({ "message": message, "duration_ms": duration_ms })
            })
            .collect();
        serde_json::Value::Array(notes).to_string()
    }
}
