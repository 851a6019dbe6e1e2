#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! The workload seam: the operation being measured.

use crate::error::WorkloadError;
use std::thread;
use std::time::Duration;

/// A unit of work the harness can measure.
///
/// The harness invokes `run` exactly once per harness run and inspects the
/// outcome only for success or failure; the error, if any, is surfaced to
/// the caller unmodified.
pub trait Workload {
    /// Execute the workload to completion.
    ///
    /// # Errors
    ///
    /// Returns the workload's own error.
    fn run(&mut self) -> std::result::Result<(), WorkloadError>;
}

impl<F> Workload for F
where
    F: FnMut() -> std::result::Result<(), WorkloadError>,
{
    fn run(&mut self) -> std::result::Result<(), WorkloadError> {
        self()
    }
}

/// Stand-in for the compressed-data reading test: holds the thread for a
/// fixed short pause in place of real read latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    pause: Duration,
}

impl FixedDelay {
    /// Create a stand-in workload pausing for `pause` per run.
    #[must_use]
    pub const fn new(pause: Duration) -> Self {
        Self { pause }
    }
}

impl Workload for FixedDelay {
    fn run(&mut self) -> std::result::Result<(), WorkloadError> {
        thread::sleep(self.pause);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_fixed_delay_holds_for_at_least_the_pause() {
        let mut workload = FixedDelay::new(Duration::from_millis(2));
        let start = Instant::now();
        assert!(workload.run().is_ok());
        assert!(start.elapsed() >= Duration::from_millis(2));
    }

    #[test]
    fn test_closures_are_workloads() {
        let mut calls = 0_u32;
        let mut workload = || -> std::result::Result<(), WorkloadError> {
            calls += 1;
            Ok(())
        };

        assert!(workload.run().is_ok());
        assert!(workload.run().is_ok());
        assert_eq!(calls, 2);
    }
}
