// src/pipeline/orchestrator.rs
//
// A capture session: owns all per-hand and dispatch state and advances it
// one frame at a time.
//
// Per frame:
//   1. classify + stabilize LEFT, then RIGHT
//   2. publish hand marker / stable-gesture events, record history
//   3. run the dispatcher once on both stable gestures
//
// Nothing here awaits. Command execution belongs to the caller, which
// feeds the outcome back through `record_result`.

use crate::control::{ActionDispatcher, CommandResult};
use crate::recognition::{classify, ClassifierConfig, HandStabilizer};
use crate::types::{Config, Gesture, HandObservation, HandSide};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event_bus::{EventBus, PipelineEvent};
use super::frame_context::{DispatchedCommand, FrameContext};
use super::gesture_history::GestureHistory;
use super::metrics::PipelineMetrics;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Stable gestures kept for display
    pub history_capacity: usize,
    /// Minimum spacing of visible-hand marker updates, per side
    pub hand_ui_throttle_ms: u64,
    /// Event bus bound before the oldest events are dropped
    pub max_pending_events: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: 10,
            hand_ui_throttle_ms: 50,
            max_pending_events: 256,
        }
    }
}

pub struct GestureSession {
    classifier: ClassifierConfig,
    hand_ui_throttle_ms: u64,
    stabilizer: HandStabilizer,
    dispatcher: ActionDispatcher,
    history: GestureHistory,
    events: EventBus,
    metrics: PipelineMetrics,

    // Per-side presentation state
    last_stable: [Gesture; 2],
    hand_visible: [bool; 2],
    last_hand_update_ms: [Option<u64>; 2],

    next_frame_id: u64,
}

impl GestureSession {
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: config.classifier.clone(),
            hand_ui_throttle_ms: config.session.hand_ui_throttle_ms,
            stabilizer: HandStabilizer::new(&config.stabilizer),
            dispatcher: ActionDispatcher::new(&config.dispatcher),
            history: GestureHistory::with_capacity(config.session.history_capacity),
            events: EventBus::new(config.session.max_pending_events),
            metrics: PipelineMetrics::new(),
            last_stable: [Gesture::Idle; 2],
            hand_visible: [false; 2],
            last_hand_update_ms: [None; 2],
            next_frame_id: 0,
        }
    }

    /// Process one detector frame. Sides missing from `hands` count as absent.
    pub fn process_frame(&mut self, timestamp_ms: u64, hands: &[HandObservation]) -> FrameContext {
        let mut ctx = FrameContext::new(self.next_frame_id, timestamp_ms);
        self.next_frame_id += 1;

        for hand in hands {
            ctx.insert_hand(*hand);
        }

        for side in HandSide::ALL {
            let observation = ctx.hand(side).copied();
            let raw = observation
                .map(|h| classify(&h.landmarks, &self.classifier))
                .unwrap_or(Gesture::Idle);
            let stable = self.stabilizer.update(side, raw, observation.is_some());
            ctx.set_gestures(side, raw, stable);

            self.publish_hand_update(side, observation.as_ref(), raw, timestamp_ms);
            self.publish_stable_change(side, stable, timestamp_ms);
        }

        let left = ctx.stable_gesture(HandSide::Left);
        let right = ctx.stable_gesture(HandSide::Right);
        if let Some(command) = self.dispatcher.dispatch(left, right, timestamp_ms) {
            let dispatched = DispatchedCommand {
                id: Uuid::new_v4(),
                command,
                timestamp_ms,
            };
            self.events.publish(PipelineEvent::CommandDispatched {
                command_id: dispatched.id,
                command,
                timestamp_ms,
            });
            self.metrics.inc(&self.metrics.commands_dispatched);
            ctx.dispatched = Some(dispatched);
        }

        self.metrics.inc(&self.metrics.total_frames);
        if ctx.has_hands() {
            self.metrics.inc(&self.metrics.frames_with_hands);
        }
        ctx
    }

    /// Publish the outcome of a command dispatched earlier.
    pub fn record_result(&mut self, command_id: Uuid, result: CommandResult) {
        self.metrics.record_result(&result);
        self.events
            .publish(PipelineEvent::CommandResult { command_id, result });
    }

    fn publish_hand_update(
        &mut self,
        side: HandSide,
        observation: Option<&HandObservation>,
        raw: Gesture,
        timestamp_ms: u64,
    ) {
        let i = side.index();
        match observation {
            Some(hand) => {
                self.hand_visible[i] = true;
                let due = self.last_hand_update_ms[i]
                    .map_or(true, |last| timestamp_ms.saturating_sub(last) > self.hand_ui_throttle_ms);
                if due {
                    self.last_hand_update_ms[i] = Some(timestamp_ms);
                    self.events.publish(PipelineEvent::HandUpdate {
                        side,
                        visible: true,
                        palm: Some(hand.palm()),
                        raw_gesture: Some(raw),
                        timestamp_ms,
                    });
                }
            }
            None if self.hand_visible[i] => {
                self.hand_visible[i] = false;
                self.last_hand_update_ms[i] = None;
                self.events.publish(PipelineEvent::HandUpdate {
                    side,
                    visible: false,
                    palm: None,
                    raw_gesture: None,
                    timestamp_ms,
                });
            }
            None => {}
        }
    }

    fn publish_stable_change(&mut self, side: HandSide, stable: Gesture, timestamp_ms: u64) {
        let i = side.index();
        if stable == self.last_stable[i] {
            return;
        }
        self.last_stable[i] = stable;
        self.history.record(side, stable, timestamp_ms);
        self.events.publish(PipelineEvent::StableGestureChanged {
            side,
            gesture: stable,
            timestamp_ms,
        });
    }

    pub fn drain_events(&mut self) -> Vec<PipelineEvent> {
        self.events.drain()
    }

    pub fn history(&self) -> &GestureHistory {
        &self.history
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    pub fn stabilizer(&self) -> &HandStabilizer {
        &self.stabilizer
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    /// Drop all per-hand and cooldown state, e.g. when the camera restarts.
    pub fn reset(&mut self) {
        self.stabilizer.reset();
        self.dispatcher.reset();
        self.last_stable = [Gesture::Idle; 2];
        self.hand_visible = [false; 2];
        self.last_hand_update_ms = [None; 2];
    }
}
