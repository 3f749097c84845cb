use thiserror::Error;

/// Errors surfaced while building or configuring pipeline components.
///
/// Runtime operations on the adapter and the audio state never return these;
/// misuse there is a programming error and panics instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("failed to spawn thread: {0}")]
    ThreadSpawn(String),

    #[error("task queue stopped")]
    QueueStopped,

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),
}
