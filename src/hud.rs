//! HUD presentation
//!
//! Turns state changes into UI-sink values and game events into
//! notification messages. Only fields that changed since the last push are
//! sent, so a DOM-backed sink does no redundant work.

use crate::platform::{HudField, NotificationSink, UiSink};
use crate::sim::{GameEvent, GameState};

/// How long notifications stay on screen
pub const NOTIFICATION_MS: u32 = 2000;

/// Values shown on the HUD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudSnapshot {
    pub health: u32,
    pub level: u32,
    pub wave: u32,
    pub score: u64,
    /// Active zombies plus the ones the current wave still owes
    pub zombies: u32,
    pub weapon: &'static str,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            health: state.player.health.ceil().max(0.0) as u32,
            level: state.level,
            wave: state.waves.wave,
            score: state.score,
            zombies: state.zombies_left(),
            weapon: state.player.weapon.as_str(),
        }
    }

    pub fn value(&self, field: HudField) -> String {
        match field {
            HudField::Health => self.health.to_string(),
            HudField::Level => self.level.to_string(),
            HudField::Wave => self.wave.to_string(),
            HudField::Score => self.score.to_string(),
            HudField::Zombies => self.zombies.to_string(),
            HudField::Weapon => self.weapon.to_string(),
        }
    }
}

/// Notification text for an event, if it is worth announcing
pub fn event_message(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::WaveStarted { wave, zombies } => {
            Some(format!("WAVE {wave} STARTED: {zombies} ZOMBIES"))
        }
        GameEvent::WaveCleared { healed, .. } => {
            Some(format!("WAVE COMPLETE! +{} HEALTH", *healed as u32))
        }
        GameEvent::LevelUp { level, healed } => {
            Some(format!("LEVEL {level} REACHED! +{} HEALTH", *healed as u32))
        }
        GameEvent::PowerUpCollected { kind } => Some(format!("{} ACTIVATED", kind.name())),
        GameEvent::Nuke { cleared } => Some(format!("NUKE! +{cleared} SCORE")),
        GameEvent::WeaponExpired => Some("SPRAY GUN EXPIRED".to_string()),
        GameEvent::GameOver { score, .. } => Some(format!("GAME OVER - SCORE {score}")),
        GameEvent::ZombieKilled { .. }
        | GameEvent::PlayerHit { .. }
        | GameEvent::ZombieRelocated { .. }
        | GameEvent::ZombieCulled { .. } => None,
    }
}

/// Remembers what the UI shows and pushes the differences
#[derive(Debug, Default)]
pub struct Hud {
    shown: Option<HudSnapshot>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what was shown; the next update pushes every field
    pub fn reset(&mut self) {
        self.shown = None;
    }

    /// Push changed fields to the UI sink
    pub fn update(&mut self, state: &GameState, ui: &mut dyn UiSink) {
        let snapshot = HudSnapshot::from_state(state);
        if self.shown.as_ref() == Some(&snapshot) {
            return;
        }

        for field in HudField::ALL {
            let value = snapshot.value(field);
            let changed = match &self.shown {
                Some(shown) => shown.value(field) != value,
                None => true,
            };
            if changed {
                ui.display(field, &value);
            }
        }
        self.shown = Some(snapshot);
    }

    /// Forward announceable events to the notification sink
    pub fn announce(&self, events: &[GameEvent], notifications: &mut dyn NotificationSink) {
        for message in events.iter().filter_map(event_message) {
            notifications.notify(&message, NOTIFICATION_MS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::PowerUpKind;

    #[derive(Default)]
    struct RecordingUi {
        shown: Vec<(HudField, String)>,
    }

    impl UiSink for RecordingUi {
        fn display(&mut self, field: HudField, value: &str) {
            self.shown.push((field, value.to_string()));
        }
    }

    #[derive(Default)]
    struct RecordingNotes {
        messages: Vec<(String, u32)>,
    }

    impl NotificationSink for RecordingNotes {
        fn notify(&mut self, message: &str, duration_ms: u32) {
            self.messages.push((message.to_string(), duration_ms));
        }
    }

    fn state() -> GameState {
        let mut state = GameState::new(1, Settings::default());
        state.start();
        state
    }

    #[test]
    fn test_first_update_pushes_everything() {
        let state = state();
        let mut hud = Hud::new();
        let mut ui = RecordingUi::default();
        hud.update(&state, &mut ui);

        assert_eq!(ui.shown.len(), HudField::ALL.len());
        assert!(ui.shown.contains(&(HudField::Health, "100".to_string())));
        assert!(ui.shown.contains(&(HudField::Weapon, "PISTOL".to_string())));
    }

    #[test]
    fn test_only_changes_are_pushed() {
        let mut state = state();
        let mut hud = Hud::new();
        let mut ui = RecordingUi::default();
        hud.update(&state, &mut ui);
        ui.shown.clear();

        hud.update(&state, &mut ui);
        assert!(ui.shown.is_empty());

        state.score = 3;
        state.waves.remaining = 4;
        hud.update(&state, &mut ui);
        assert_eq!(ui.shown, vec![
            (HudField::Score, "3".to_string()),
            (HudField::Zombies, "4".to_string()),
        ]);

        hud.reset();
        ui.shown.clear();
        hud.update(&state, &mut ui);
        assert_eq!(ui.shown.len(), HudField::ALL.len());
    }

    #[test]
    fn test_fractional_health_rounds_up() {
        let mut state = state();
        state.player.health = 0.4;
        assert_eq!(HudSnapshot::from_state(&state).health, 1);
    }

    #[test]
    fn test_events_become_notifications() {
        let hud = Hud::new();
        let mut notes = RecordingNotes::default();
        let events = [
            GameEvent::WaveStarted { wave: 2, zombies: 7 },
            GameEvent::ZombieKilled { id: 4, score: 1 },
            GameEvent::LevelUp {
                level: 2,
                healed: 35.0,
            },
            GameEvent::PowerUpCollected {
                kind: PowerUpKind::Shield,
            },
        ];
        hud.announce(&events, &mut notes);

        let messages: Vec<_> = notes.messages.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(messages, vec![
            "WAVE 2 STARTED: 7 ZOMBIES",
            "LEVEL 2 REACHED! +35 HEALTH",
            "SHIELD ACTIVATED",
        ]);
        assert!(notes.messages.iter().all(|(_, ms)| *ms == NOTIFICATION_MS));
    }
}
