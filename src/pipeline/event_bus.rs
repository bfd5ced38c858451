// src/pipeline/event_bus.rs
//
// Decoupled event system. The session publishes what happened on each
// frame; presentation adapters drain and render it.

use crate::control::CommandResult;
use crate::types::{Command, Gesture, HandSide};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    StableGestureChanged {
        side: HandSide,
        gesture: Gesture,
        timestamp_ms: u64,
    },

    /// Throttled marker update while a hand is visible; sent once,
    /// unthrottled, when it disappears.
    HandUpdate {
        side: HandSide,
        visible: bool,
        palm: Option<(f32, f32)>,
        raw_gesture: Option<Gesture>,
        timestamp_ms: u64,
    },

    /// Fired before execution starts, so the UI can update optimistically.
    CommandDispatched {
        command_id: Uuid,
        command: Command,
        timestamp_ms: u64,
    },

    CommandResult {
        command_id: Uuid,
        #[serde(flatten)]
        result: CommandResult,
    },
}

pub struct EventBus {
    events: VecDeque<PipelineEvent>,
    max_pending: usize,
}

impl EventBus {
    pub fn new(max_pending: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_pending),
            max_pending: max_pending.max(1),
        }
    }

    pub fn publish(&mut self, event: PipelineEvent) {
        if self.events.len() >= self.max_pending {
            warn!(
                "Event bus full ({} events), dropping oldest",
                self.max_pending
            );
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<PipelineEvent> {
        self.events.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.events.len()
    }
}
