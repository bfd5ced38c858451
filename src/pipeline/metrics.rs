// src/pipeline/metrics.rs
//
// Counters for a capture session. Cloning shares the same counters, so
// command tasks and the frame loop can both report.

use crate::control::{CommandOutcome, CommandResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct PipelineMetrics {
    pub total_frames: Arc<AtomicU64>,
    pub frames_with_hands: Arc<AtomicU64>,
    pub commands_dispatched: Arc<AtomicU64>,
    pub local_successes: Arc<AtomicU64>,
    pub remote_successes: Arc<AtomicU64>,
    pub auth_failures: Arc<AtomicU64>,
    pub command_failures: Arc<AtomicU64>,
    pub started_at: Instant,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self {
            total_frames: Arc::new(AtomicU64::new(0)),
            frames_with_hands: Arc::new(AtomicU64::new(0)),
            commands_dispatched: Arc::new(AtomicU64::new(0)),
            local_successes: Arc::new(AtomicU64::new(0)),
            remote_successes: Arc::new(AtomicU64::new(0)),
            auth_failures: Arc::new(AtomicU64::new(0)),
            command_failures: Arc::new(AtomicU64::new(0)),
            started_at: Instant::now(),
        }
    }

    pub fn inc(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_result(&self, result: &CommandResult) {
        let counter = match result.outcome {
            CommandOutcome::LocalOk => &self.local_successes,
            CommandOutcome::RemoteOk => &self.remote_successes,
            CommandOutcome::Unauthenticated | CommandOutcome::Forbidden => &self.auth_failures,
            CommandOutcome::NoDevice | CommandOutcome::Failed { .. } => &self.command_failures,
        };
        self.inc(counter);
    }

    pub fn fps(&self) -> f64 {
        let frames = self.total_frames.load(Ordering::Relaxed);
        let elapsed = self.started_at.elapsed().as_secs_f64();
        if elapsed > 0.01 {
            frames as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_frames: self.total_frames.load(Ordering::Relaxed),
            frames_with_hands: self.frames_with_hands.load(Ordering::Relaxed),
            fps: self.fps(),
            commands_dispatched: self.commands_dispatched.load(Ordering::Relaxed),
            local_successes: self.local_successes.load(Ordering::Relaxed),
            remote_successes: self.remote_successes.load(Ordering::Relaxed),
            auth_failures: self.auth_failures.load(Ordering::Relaxed),
            command_failures: self.command_failures.load(Ordering::Relaxed),
            elapsed_secs: self.started_at.elapsed().as_secs_f64(),
        }
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSummary {
    pub total_frames: u64,
    pub frames_with_hands: u64,
    pub fps: f64,
    pub commands_dispatched: u64,
    pub local_successes: u64,
    pub remote_successes: u64,
    pub auth_failures: u64,
    pub command_failures: u64,
    pub elapsed_secs: f64,
}
