//! Platform abstraction layer
//!
//! Narrow interfaces to the collaborators that live outside the core:
//! - Input (keyboard flags, pointer position, fire button)
//! - Rendering (draws the read-only state)
//! - HUD text fields
//! - Transient notifications
//!
//! None of these can fail from the core's point of view.

use crate::sim::{GameState, TickInput};

/// Named HUD values the UI sink knows how to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudField {
    Health,
    Level,
    Wave,
    Score,
    Zombies,
    Weapon,
}

impl HudField {
    pub const ALL: [HudField; 6] = [
        HudField::Health,
        HudField::Level,
        HudField::Wave,
        HudField::Score,
        HudField::Zombies,
        HudField::Weapon,
    ];

    /// Element name used by the page
    pub fn as_str(&self) -> &'static str {
        match self {
            HudField::Health => "health",
            HudField::Level => "level",
            HudField::Wave => "wave",
            HudField::Score => "score",
            HudField::Zombies => "zombies",
            HudField::Weapon => "weapon",
        }
    }
}

/// Supplies the input for the next frame
pub trait InputProvider {
    fn poll(&mut self) -> TickInput;
}

/// A fixed input replays itself every frame
impl InputProvider for TickInput {
    fn poll(&mut self) -> TickInput {
        self.clone()
    }
}

/// Draws the current state; the camera offset is `state.camera`
pub trait Renderer {
    fn draw(&mut self, state: &GameState);
}

/// Shows a named HUD value
pub trait UiSink {
    fn display(&mut self, field: HudField, value: &str);
}

/// Shows a transient message for `duration_ms`
pub trait NotificationSink {
    fn notify(&mut self, message: &str, duration_ms: u32);
}
