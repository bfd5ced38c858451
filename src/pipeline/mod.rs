// src/pipeline/mod.rs

pub mod event_bus;
pub mod frame_context;
pub mod gesture_history;
pub mod metrics;
pub mod orchestrator;

pub use event_bus::{EventBus, PipelineEvent};
pub use frame_context::{DispatchedCommand, FrameContext};
pub use gesture_history::{GestureHistory, HistoryEntry};
pub use metrics::{MetricsSummary, PipelineMetrics};
pub use orchestrator::{GestureSession, SessionConfig};
