//! # media-pipeline-core
//!
//! Thread-handoff core for real-time media pipelines.
//!
//! Provides the two synchronization points between foreign producer threads
//! and a confined owner thread: the `FrameCadenceAdapter`, which moves video
//! frames onto an owner task queue and reports frame-rate constraint
//! telemetry, and the reference-counted `AudioState`, which aggregates send
//! streams and controls playout and recording on an `AudioTransport`.
//!
//! ## Architecture
//!
//! ```text
//! media-pipeline-core (this crate)
//! ├── traits/       ← TaskScheduler, Clock, MetricsSink, AudioTransport, FrameCadenceCallback, FieldTrialsView
//! ├── models/       ← PipelineError, configs, VideoFrame, FrameRateConstraints, CadenceSession, audio models
//! ├── scheduling/   ← TaskQueue, ManualTaskQueue, ScopedTaskSafety/CancellationToken, ThreadChecker
//! ├── processing/   ← constraint telemetry, AudioLevel meter
//! ├── session/      ← FrameCadenceAdapter, AudioState, NullAudioPoller
//! └── storage/      ← InMemoryMetrics
//! ```

pub mod models;
pub mod processing;
pub mod scheduling;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::audio_models::{
    AudioInputStats, AudioLevelSnapshot, RefCountReleaseStatus, SendStreamId, SendingStreamsUpdate,
    StreamProperties,
};
pub use models::config::{AudioStateConfig, CadenceConfig, PipelineConfig};
pub use models::error::PipelineError;
pub use models::frame::{FrameRateConstraints, VideoFrame};
pub use models::state::{CadenceSession, PlayoutMode};
pub use models::time::Timestamp;
pub use processing::audio_level::AudioLevel;
pub use scheduling::cancellation::{CancellationToken, ScopedTaskSafety};
pub use scheduling::manual_queue::ManualTaskQueue;
pub use scheduling::task_queue::TaskQueue;
pub use scheduling::thread_checker::{RaceChecker, ThreadChecker};
pub use session::audio_state::{AudioState, AudioStateRef};
pub use session::frame_cadence::FrameCadenceAdapter;
pub use session::null_poller::NullAudioPoller;
pub use storage::metrics_store::InMemoryMetrics;
pub use traits::audio_transport::AudioTransport;
pub use traits::clock::{Clock, SimulatedClock, SystemClock};
pub use traits::field_trials::{FieldTrials, FieldTrialsView};
pub use traits::frame_sink::{FrameCadenceCallback, VideoFrameSink};
pub use traits::metrics_sink::MetricsSink;
pub use traits::task_scheduler::{Task, TaskScheduler};
