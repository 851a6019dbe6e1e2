#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! The summarized statistics view of a profile session and its artifact.

use crate::error::{HarnessError, Result};
use crate::metrics::Sample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Summary statistics plus the raw samples from one completed session.
///
/// This is the persisted form: the whole value serializes to the profile
/// artifact and loads back for offline analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Wall-clock start of the session.
    started_at: DateTime<Utc>,

    /// Total session duration in microseconds.
    duration_us: u64,

    /// Number of samples collected.
    sample_count: u64,

    /// Maximum RSS observed across samples (kilobytes).
    max_rss_kb: u64,

    /// Average RSS across RSS-bearing samples (kilobytes).
    avg_rss_kb: u64,

    /// The raw samples, in capture order.
    samples: Vec<Sample>,
}

impl ProfileReport {
    /// Fold collected samples into the summarized view.
    #[must_use]
    pub fn from_samples(
        started_at: DateTime<Utc>,
        duration: Duration,
        samples: Vec<Sample>,
    ) -> Self {
        let mut sample_count = 0_u64;
        let mut rss_count = 0_u64;
        let mut total_rss_kb = 0_u64;
        let mut max_rss_kb = 0_u64;

        for sample in &samples {
            sample_count += 1;
            if let Some(rss) = sample.rss_kb() {
                rss_count += 1;
                total_rss_kb += rss;
                if rss > max_rss_kb {
                    max_rss_kb = rss;
                }
            }
        }

        let avg_rss_kb = if rss_count > 0 {
            total_rss_kb / rss_count
        } else {
            0
        };

        Self {
            started_at,
            duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            sample_count,
            max_rss_kb,
            avg_rss_kb,
            samples,
        }
    }

    /// Get the wall-clock session start.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Get the session duration in microseconds.
    #[must_use]
    pub const fn duration_us(&self) -> u64 {
        self.duration_us
    }

    /// Get the session duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_micros(self.duration_us)
    }

    /// Get the sample count.
    #[must_use]
    pub const fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Get the maximum RSS in kilobytes.
    #[must_use]
    pub const fn max_rss_kb(&self) -> u64 {
        self.max_rss_kb
    }

    /// Get the maximum RSS in megabytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable precision loss for display purposes
    pub const fn max_rss_mb(&self) -> f64 {
        self.max_rss_kb as f64 / 1024.0
    }

    /// Get the average RSS in kilobytes.
    #[must_use]
    pub const fn avg_rss_kb(&self) -> u64 {
        self.avg_rss_kb
    }

    /// Get the average RSS in megabytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable precision loss for display purposes
    pub const fn avg_rss_mb(&self) -> f64 {
        self.avg_rss_kb as f64 / 1024.0
    }

    /// Get the raw samples in capture order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Persist the report as the profile artifact, replacing any previous
    /// file at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if JSON serialization fails or the file cannot be
    /// written.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .map_err(|e| HarnessError::ArtifactWrite(format!("{}: {e}", path.display())))
    }

    /// Load a previously written artifact.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or does not parse as a
    /// report.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .map_err(|e| HarnessError::ArtifactRead(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&data).map_err(Into::into)
    }
}
