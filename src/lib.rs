//! # gesture_remote
//!
//! Hand-gesture remote control for music playback.
//!
//! Each camera frame's hand landmarks go through a fixed pipeline:
//!
//! | Stage | Module | Output |
//! |---|---|---|
//! | Classify | [`recognition::classifier`] | raw [`Gesture`] per hand |
//! | Stabilize | [`recognition::stabilizer`] | stable [`Gesture`] per hand |
//! | Dispatch | [`control::dispatcher`] | at most one [`Command`] per cooldown |
//! | Execute | [`control::executor`] | [`control::CommandResult`] |
//!
//! ## Gesture → Command
//!
//! | Gesture | Command |
//! |---|---|
//! | VICTORY | NEXT |
//! | POINT | PREVIOUS |
//! | GRAB | PAUSE |
//! | PALM_OPEN | PLAY |
//! | PINCH | (reserved) |
//!
//! The right hand wins when both hands hold a gesture. All session state
//! lives in a [`pipeline::GestureSession`] owned by the caller.

pub mod config;
pub mod control;
pub mod detector;
pub mod pipeline;
pub mod recognition;
pub mod types;

pub use types::{Command, Config, Gesture, HandObservation, HandSide, Landmark};
