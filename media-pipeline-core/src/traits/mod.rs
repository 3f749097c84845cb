pub mod audio_transport;
pub mod clock;
pub mod field_trials;
pub mod frame_sink;
pub mod metrics_sink;
pub mod task_scheduler;
