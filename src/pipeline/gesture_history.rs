// src/pipeline/gesture_history.rs
//
// Ring buffer of recent stable gestures for on-screen history.
// In-memory only; newest entry first.

use crate::types::{Gesture, HandSide};
use serde::Serialize;
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub side: HandSide,
    pub gesture: Gesture,
    pub timestamp_ms: u64,
}

pub struct GestureHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl GestureHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// IDLE is not history.
    pub fn record(&mut self, side: HandSide, gesture: Gesture, timestamp_ms: u64) {
        if gesture.is_idle() || self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(HistoryEntry {
            side,
            gesture,
            timestamp_ms,
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for GestureHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_newest_up_to_capacity() {
        let mut history = GestureHistory::with_capacity(3);
        for ts in 0..5u64 {
            history.record(HandSide::Right, Gesture::Victory, ts);
        }

        let stamps: Vec<u64> = history.entries().map(|e| e.timestamp_ms).collect();
        assert_eq!(stamps, vec![4, 3, 2]);
        assert_eq!(history.latest().map(|e| e.timestamp_ms), Some(4));
    }

    #[test]
    fn test_idle_is_ignored() {
        let mut history = GestureHistory::new();
        history.record(HandSide::Left, Gesture::Idle, 0);
        assert!(history.is_empty());

        history.record(HandSide::Left, Gesture::Pinch, 1);
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
    }
}
