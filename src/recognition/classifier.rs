// src/recognition/classifier.rs
//
// Maps a single hand's 21 landmarks to a discrete gesture.
//
// A finger counts as extended when its tip sits farther from the wrist
// than its PIP joint by `extension_margin`. Distances use the image
// plane only; z is ignored.
//
// Precedence (first match wins):
//   PINCH → PALM_OPEN → GRAB → POINT → VICTORY → IDLE

use crate::types::{Gesture, Landmark, LANDMARK_COUNT};
use serde::{Deserialize, Serialize};

/// Hand landmark indices (MediaPipe hand model layout).
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Tip-to-wrist must exceed PIP-to-wrist by this factor for "extended"
    pub extension_margin: f32,
    /// Thumb tip to index tip distance (normalized units) that counts as a pinch
    pub pinch_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            extension_margin: 1.2,
            pinch_threshold: 0.05,
        }
    }
}

/// Extension state of the four non-thumb fingers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerExtension {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerExtension {
    pub fn measure(points: &[Landmark; LANDMARK_COUNT], margin: f32) -> Self {
        let wrist = &points[landmarks::WRIST];
        let extended = |tip: usize, pip: usize| {
            wrist.distance_2d(&points[tip]) > wrist.distance_2d(&points[pip]) * margin
        };

        Self {
            index: extended(landmarks::INDEX_TIP, landmarks::INDEX_PIP),
            middle: extended(landmarks::MIDDLE_TIP, landmarks::MIDDLE_PIP),
            ring: extended(landmarks::RING_TIP, landmarks::RING_PIP),
            pinky: extended(landmarks::PINKY_TIP, landmarks::PINKY_PIP),
        }
    }
}

/// Thumb tip to index tip distance in the image plane.
pub fn pinch_distance(points: &[Landmark; LANDMARK_COUNT]) -> f32 {
    points[landmarks::THUMB_TIP].distance_2d(&points[landmarks::INDEX_TIP])
}

pub fn classify(points: &[Landmark; LANDMARK_COUNT], config: &ClassifierConfig) -> Gesture {
    if pinch_distance(points) < config.pinch_threshold {
        return Gesture::Pinch;
    }

    let fingers = FingerExtension::measure(points, config.extension_margin);
    match (fingers.index, fingers.middle, fingers.ring, fingers.pinky) {
        (true, true, true, true) => Gesture::PalmOpen,
        (false, false, false, false) => Gesture::Grab,
        (true, false, false, false) => Gesture::Point,
        (true, true, false, false) => Gesture::Victory,
        _ => Gesture::Idle,
    }
}
