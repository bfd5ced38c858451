// src/recognition/mod.rs
//
// Per-frame gesture recognition.
//
// Signal flow:
//   21 landmarks → classifier::classify → raw Gesture
//   raw Gesture  → stabilizer::HandStabilizer (per side) → stable Gesture

pub mod classifier;
pub mod stabilizer;

pub use classifier::{classify, landmarks, ClassifierConfig, FingerExtension};
pub use stabilizer::{HandStabilizer, StabilizerConfig, StabilizerState};
