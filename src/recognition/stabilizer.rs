// src/recognition/stabilizer.rs
//
// Debounces the classifier's per-frame output. A raw gesture only
// becomes the stable gesture after it has been seen on `hold_frames`
// consecutive frames for that hand; anything shorter reads as IDLE.
// A frame without the hand resets the streak.

use crate::types::{Gesture, HandSide};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Consecutive identical frames required (~250ms at 30fps)
    pub hold_frames: u32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self { hold_frames: 8 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StabilizerState {
    pub last_raw: Gesture,
    pub consecutive_frames: u32,
    pub stable: Gesture,
}

/// Holds one `StabilizerState` per hand side.
pub struct HandStabilizer {
    hold_frames: u32,
    states: [StabilizerState; 2],
}

impl HandStabilizer {
    pub fn new(config: &StabilizerConfig) -> Self {
        Self {
            hold_frames: config.hold_frames,
            states: [StabilizerState::default(); 2],
        }
    }

    /// Advance one side by one frame and return its stable gesture.
    pub fn update(&mut self, side: HandSide, raw: Gesture, hand_present: bool) -> Gesture {
        let hold_frames = self.hold_frames;
        let state = &mut self.states[side.index()];

        if !hand_present {
            state.consecutive_frames = 0;
            state.stable = Gesture::Idle;
            return state.stable;
        }

        if raw == state.last_raw {
            state.consecutive_frames = state.consecutive_frames.saturating_add(1);
        } else {
            state.last_raw = raw;
            state.consecutive_frames = 1;
        }

        state.stable = if state.consecutive_frames >= hold_frames {
            raw
        } else {
            Gesture::Idle
        };
        state.stable
    }

    pub fn state(&self, side: HandSide) -> &StabilizerState {
        &self.states[side.index()]
    }

    pub fn stable(&self, side: HandSide) -> Gesture {
        self.states[side.index()].stable
    }

    pub fn reset(&mut self) {
        self.states = [StabilizerState::default(); 2];
    }
}
