#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Error types for the harness.

use thiserror::Error;

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Boxed error returned by a workload.
///
/// The harness surfaces this to the caller unmodified; downcasting recovers
/// the workload's own error type.
pub type WorkloadError = Box<dyn std::error::Error + Send + Sync>;

/// Harness error taxonomy.
///
/// One variant per failure phase, so a caller can tell "the thing being
/// measured broke" apart from "the measurement broke".
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The measured workload itself failed.
    #[error("workload failed: {0}")]
    Workload(#[source] WorkloadError),

    /// The profiling session could not start or stop cleanly.
    #[error("profiling session failed: {0}")]
    Session(String),

    /// Profile data could not be serialized.
    #[error("failed to serialize profile data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The profile artifact could not be written.
    #[error("failed to write profile artifact: {0}")]
    ArtifactWrite(String),

    /// The profile artifact could not be read back.
    #[error("failed to read profile artifact: {0}")]
    ArtifactRead(String),

    /// Configuration was rejected at validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sampling interval is below the supported floor.
    #[error("sampling interval {0}us is below the minimum of {1}us")]
    SamplingIntervalTooShort(u64, u64),
}
