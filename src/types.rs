use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::control::{DispatcherConfig, ExecutorConfig};
use crate::pipeline::SessionConfig;
use crate::recognition::{ClassifierConfig, StabilizerConfig};

/// Number of landmarks the hand detector reports per hand.
pub const LANDMARK_COUNT: usize = 21;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub stabilizer: StabilizerConfig,
    pub dispatcher: DispatcherConfig,
    pub executor: ExecutorConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "gesture_remote=info".to_string(),
        }
    }
}

/// One tracked point on a hand, normalized to the frame (x, y in [0, 1]).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance in the image plane; depth is ignored.
    pub fn distance_2d(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandSide {
    #[serde(alias = "Left", alias = "LEFT")]
    Left,
    #[serde(alias = "Right", alias = "RIGHT")]
    Right,
}

impl HandSide {
    pub const ALL: [HandSide; 2] = [HandSide::Left, HandSide::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }

    /// Slot used by per-side state arrays.
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// A single detected hand within one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandObservation {
    pub side: HandSide,
    pub landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandObservation {
    /// Fails when the detector reported anything other than 21 points.
    pub fn new(side: HandSide, landmarks: &[Landmark]) -> Result<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] = landmarks.try_into().map_err(|_| {
            anyhow!(
                "{} hand: expected {} landmarks, got {}",
                side.as_str(),
                LANDMARK_COUNT,
                landmarks.len()
            )
        })?;
        Ok(Self { side, landmarks })
    }

    /// Palm center used for on-screen hand markers (middle finger MCP).
    pub fn palm(&self) -> (f32, f32) {
        let mcp = self.landmarks[crate::recognition::landmarks::MIDDLE_MCP];
        (mcp.x, mcp.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gesture {
    #[default]
    Idle,
    Pinch,
    Grab,
    PalmOpen,
    Point,
    Victory,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Pinch => "PINCH",
            Self::Grab => "GRAB",
            Self::PalmOpen => "PALM_OPEN",
            Self::Point => "POINT",
            Self::Victory => "VICTORY",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Next,
    Previous,
    Pause,
    Play,
}

impl Command {
    /// Action identifier understood by the local control daemon.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Pause => "pause",
            Self::Play => "play",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_rejects_wrong_landmark_count() {
        let points = vec![Landmark::default(); 20];
        let err = HandObservation::new(HandSide::Left, &points).unwrap_err();
        assert!(err.to_string().contains("expected 21 landmarks, got 20"));

        let points = vec![Landmark::default(); LANDMARK_COUNT];
        assert!(HandObservation::new(HandSide::Left, &points).is_ok());
    }

    #[test]
    fn test_hand_side_accepts_detector_labels() {
        let side: HandSide = serde_json::from_str("\"Right\"").unwrap();
        assert_eq!(side, HandSide::Right);
        let side: HandSide = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(side, HandSide::Left);
    }

    #[test]
    fn test_gesture_serializes_as_tag() {
        let json = serde_json::to_string(&Gesture::PalmOpen).unwrap();
        assert_eq!(json, "\"PALM_OPEN\"");
        assert_eq!(Gesture::PalmOpen.as_str(), "PALM_OPEN");
    }
}
