// src/pipeline/frame_context.rs
//
// Everything the session worked out for one frame. Both hands are
// classified and stabilized before the dispatcher runs, so every field
// here refers to the same frame.

use crate::types::{Command, Gesture, HandObservation, HandSide};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchedCommand {
    pub id: Uuid,
    pub command: Command,
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone)]
pub struct FrameContext {
    pub frame_id: u64,
    pub timestamp_ms: u64,

    hands: [Option<HandObservation>; 2],
    raw: [Gesture; 2],
    stable: [Gesture; 2],

    pub dispatched: Option<DispatchedCommand>,
}

impl FrameContext {
    pub fn new(frame_id: u64, timestamp_ms: u64) -> Self {
        Self {
            frame_id,
            timestamp_ms,
            hands: [None, None],
            raw: [Gesture::Idle; 2],
            stable: [Gesture::Idle; 2],
            dispatched: None,
        }
    }

    /// First observation per side wins; detector duplicates are dropped.
    pub(crate) fn insert_hand(&mut self, hand: HandObservation) {
        let slot = &mut self.hands[hand.side.index()];
        if slot.is_none() {
            *slot = Some(hand);
        }
    }

    pub(crate) fn set_gestures(&mut self, side: HandSide, raw: Gesture, stable: Gesture) {
        self.raw[side.index()] = raw;
        self.stable[side.index()] = stable;
    }

    pub fn hand(&self, side: HandSide) -> Option<&HandObservation> {
        self.hands[side.index()].as_ref()
    }

    pub fn is_present(&self, side: HandSide) -> bool {
        self.hands[side.index()].is_some()
    }

    pub fn raw_gesture(&self, side: HandSide) -> Gesture {
        self.raw[side.index()]
    }

    pub fn stable_gesture(&self, side: HandSide) -> Gesture {
        self.stable[side.index()]
    }

    pub fn has_hands(&self) -> bool {
        self.hands.iter().any(Option::is_some)
    }

    pub fn command(&self) -> Option<Command> {
        self.dispatched.map(|d| d.command)
    }
}
