//! Error types for admission control operations.

use thiserror::Error;

/// Errors produced by the pool, the collaborators, and the controller loop.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Admission was requested but no workload is waiting.
    #[error("waiting queue is empty")]
    EmptyWaitingQueue,
    /// Eviction was requested but no workload is running.
    #[error("running queue is empty")]
    EmptyRunningQueue,
    /// The OS refused to create a workload process.
    #[error("spawn failure: {0}")]
    SpawnFailure(String),
    /// A workload process could not be killed.
    #[error("termination failure: {0}")]
    TerminationFailure(String),
    /// The resource sensor could not be read or parsed.
    #[error("sensor failure: {0}")]
    SensorFailure(String),
    /// A workload demand fell outside `[0, 1)`.
    #[error("invalid demand: {0}")]
    InvalidDemand(f64),
    /// Configuration rejected during validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ControllerError {
    /// Whether the error must abort the admission loop.
    ///
    /// Empty-queue conditions are expected during normal operation and are
    /// treated as no-op cycles; everything else propagates.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::EmptyWaitingQueue | Self::EmptyRunningQueue)
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
