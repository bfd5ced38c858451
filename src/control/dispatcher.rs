// src/control/dispatcher.rs
//
// Turns the two hands' stable gestures into at most one playback command
// per cooldown window. The cooldown is global: a command from either hand
// blocks both. Right hand wins when both show a non-idle gesture.

use crate::types::{Command, Gesture};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Minimum time between two dispatched commands
    pub cooldown_ms: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { cooldown_ms: 2000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatcherState {
    pub last_fired_at_ms: Option<u64>,
}

pub struct ActionDispatcher {
    cooldown_ms: u64,
    state: DispatcherState,
}

impl ActionDispatcher {
    pub fn new(config: &DispatcherConfig) -> Self {
        Self {
            cooldown_ms: config.cooldown_ms,
            state: DispatcherState::default(),
        }
    }

    /// Check the cooldown, pick the active hand, map it to a command.
    /// Records the fire time only when a command is returned.
    pub fn dispatch(&mut self, left: Gesture, right: Gesture, now_ms: u64) -> Option<Command> {
        if self.in_cooldown(now_ms) {
            return None;
        }

        let active = if right != Gesture::Idle { right } else { left };
        let command = command_for(active)?;

        self.state.last_fired_at_ms = Some(now_ms);
        Some(command)
    }

    /// A timestamp earlier than the last fire counts as still cooling down.
    pub fn in_cooldown(&self, now_ms: u64) -> bool {
        self.state
            .last_fired_at_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.cooldown_ms)
    }

    pub fn state(&self) -> &DispatcherState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = DispatcherState::default();
    }
}

/// PINCH is reserved and maps to nothing.
pub fn command_for(gesture: Gesture) -> Option<Command> {
    match gesture {
        Gesture::Victory => Some(Command::Next),
        Gesture::Grab => Some(Command::Pause),
        Gesture::PalmOpen => Some(Command::Play),
        Gesture::Point => Some(Command::Previous),
        Gesture::Idle | Gesture::Pinch => None,
    }
}
