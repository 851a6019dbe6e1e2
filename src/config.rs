#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Configuration for harness runs.

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default artifact destination, relative to the working directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "test.prof";

/// Default cadence of the profile sampler.
pub const DEFAULT_SAMPLING_INTERVAL: Duration = Duration::from_micros(100);

/// Minimum sampling interval in microseconds; anything shorter degenerates
/// into busy-waiting next to a millisecond-scale workload.
const MIN_SAMPLING_INTERVAL_MICROS: u64 = 10;

/// Configuration for one harness run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// When true, wrap the workload in a profiling session and persist results.
    enable_profiling: bool,

    /// Artifact destination for profiled runs.
    output_path: PathBuf,

    /// Interval between profile samples.
    sampling_interval: Duration,
}

impl HarnessConfig {
    /// Create a new harness configuration with validation.
    ///
    /// # Arguments
    ///
    /// * `enable_profiling` - Wrap the run in a profile session and persist results
    /// * `output_path` - Artifact destination for profiled runs
    /// * `sampling_interval` - How often the session samples
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The output path is empty
    /// - The sampling interval is below the minimum
    ///
    /// # Examples
    ///
    /// ```
    /// # use perf_harness::{HarnessConfig, DEFAULT_SAMPLING_INTERVAL};
    /// # use std::path::PathBuf;
    /// let config = HarnessConfig::new(
    ///     true,
    ///     PathBuf::from("test.prof"),
    ///     DEFAULT_SAMPLING_INTERVAL,
    /// );
    /// assert!(config.is_ok());
    /// ```
    pub fn new(
        enable_profiling: bool,
        output_path: PathBuf,
        sampling_interval: Duration,
    ) -> Result<Self> {
        Self::validate_output_path(&output_path)?;
        Self::validate_sampling_interval(sampling_interval)?;

        Ok(Self {
            enable_profiling,
            output_path,
            sampling_interval,
        })
    }

    /// Configuration for a plain run: no instrumentation, no artifact.
    ///
    /// # Errors
    ///
    /// Returns error if configuration validation fails.
    pub fn plain() -> Result<Self> {
        Self::new(
            false,
            PathBuf::from(DEFAULT_ARTIFACT_PATH),
            DEFAULT_SAMPLING_INTERVAL,
        )
    }

    /// Configuration for a profiled run with the default artifact path.
    ///
    /// # Errors
    ///
    /// Returns error if configuration validation fails.
    pub fn profiled() -> Result<Self> {
        Self::new(
            true,
            PathBuf::from(DEFAULT_ARTIFACT_PATH),
            DEFAULT_SAMPLING_INTERVAL,
        )
    }

    /// Override the artifact destination.
    #[must_use]
    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = path;
        self
    }

    /// Whether profiling wraps the run.
    #[must_use]
    pub const fn profiling_enabled(&self) -> bool {
        self.enable_profiling
    }

    /// Get the artifact destination.
    #[must_use]
    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    /// Get the sampler cadence.
    #[must_use]
    pub const fn sampling_interval(&self) -> Duration {
        self.sampling_interval
    }

    /// Validate the artifact destination.
    fn validate_output_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            Err(HarnessError::InvalidConfig(
                "output path cannot be empty".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate the sampling interval against the busy-wait floor.
    fn validate_sampling_interval(interval: Duration) -> Result<()> {
        let micros = u64::try_from(interval.as_micros()).unwrap_or(u64::MAX);
        if micros < MIN_SAMPLING_INTERVAL_MICROS {
            Err(HarnessError::SamplingIntervalTooShort(
                micros,
                MIN_SAMPLING_INTERVAL_MICROS,
            ))
        } else {
            Ok(())
        }
    }
}
