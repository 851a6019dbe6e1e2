#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! The profile session: a scoped sampling instrument.

use crate::error::{HarnessError, Result};
use crate::metrics::Sample;
use crate::report::ProfileReport;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::warn;

/// A live profiling session.
///
/// Created by [`ProfileSession::start`], which launches a dedicated sampler
/// thread; consumed by [`ProfileSession::stop`], which joins the sampler and
/// folds the collected samples into a [`ProfileReport`]. Dropping an
/// unstopped session releases the sampler the same way, so instrumentation
/// never stays attached past the session's scope.
#[derive(Debug)]
pub struct ProfileSession {
    /// Wall-clock start, carried into the report.
    started_wall: DateTime<Utc>,

    /// Monotonic start, the zero point for sample timestamps.
    started_at: Instant,

    /// Signals the sampler to finish its current iteration and exit.
    stop_flag: Arc<AtomicBool>,

    /// Sampler handle; `None` once the sampler has been joined.
    sampler: Option<JoinHandle<Vec<Sample>>>,
}

impl ProfileSession {
    /// Start a fresh session sampling at `interval`.
    ///
    /// The sampler takes its first sample before its first wait, so even a
    /// session shorter than one interval yields data.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Session`] if the sampler thread cannot be
    /// spawned.
    pub fn start(interval: Duration) -> Result<Self> {
        let started_wall = Utc::now();
        let started_at = Instant::now();
        let stop_flag = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop_flag);

        let sampler = thread::Builder::new()
            .name("profile-sampler".to_string())
            .spawn(move || sample_loop(started_at, interval, &flag))
            .map_err(|e| HarnessError::Session(format!("failed to spawn sampler thread: {e}")))?;

        Ok(Self {
            started_wall,
            started_at,
            stop_flag,
            sampler: Some(sampler),
        })
    }

    /// Stop the session and fold its samples into a report.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Session`] if the sampler thread panicked.
    pub fn stop(mut self) -> Result<ProfileReport> {
        let samples = self.shutdown()?;
        Ok(ProfileReport::from_samples(
            self.started_wall,
            self.started_at.elapsed(),
            samples,
        ))
    }

    /// Signal the sampler, wake it from its wait, and join it.
    fn shutdown(&mut self) -> Result<Vec<Sample>> {
        let Some(sampler) = self.sampler.take() else {
            return Ok(Vec::new());
        };

        self.stop_flag.store(true, Ordering::Release);
        sampler.thread().unpark();
        sampler
            .join()
            .map_err(|_| HarnessError::Session("sampler thread panicked".to_string()))
    }
}

impl Drop for ProfileSession {
    fn drop(&mut self) {
        // Release path for unwinds and early exits; samples are discarded.
        if let Err(e) = self.shutdown() {
            warn!("sampler teardown during drop failed: {e}");
        }
    }
}

/// Sampler thread body: capture, check the stop flag, wait out the interval.
///
/// The capture-before-check order guarantees at least one sample even when
/// the stop signal lands before the sampler's first iteration.
fn sample_loop(started_at: Instant, interval: Duration, stop: &AtomicBool) -> Vec<Sample> {
    let mut samples = Vec::new();
    loop {
        samples.push(Sample::capture(started_at));
        if stop.load(Ordering::Acquire) {
            break;
        }
        // A spurious wakeup just costs one extra sample.
        thread::park_timeout(interval);
    }
    samples
}
