#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Harness orchestration: run a workload plain or under profiling.

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::report::ProfileReport;
use crate::session::ProfileSession;
use crate::workload::Workload;
use tracing::{debug, info, warn};

/// Runs a workload according to its configuration.
///
/// In plain mode the workload executes with no instrumentation and no file
/// output. In profiled mode the workload runs inside a [`ProfileSession`]
/// and the summarized report is persisted to the configured artifact path.
#[derive(Debug, Clone)]
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    /// Create a harness with the given configuration.
    #[must_use]
    pub const fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run the workload once.
    ///
    /// Returns `None` in plain mode and the persisted report in profiled
    /// mode. The workload executes exactly once either way.
    ///
    /// A workload failure is reported as [`HarnessError::Workload`] even
    /// when profiling teardown fails afterwards; the teardown failure is
    /// logged and dropped. The session is released on every path before
    /// this function returns.
    ///
    /// # Errors
    ///
    /// Returns error if the workload fails, the profiling session cannot
    /// start or stop, or the artifact cannot be serialized or written.
    pub fn run<W: Workload>(&self, workload: &mut W) -> Result<Option<ProfileReport>> {
        if !self.config.profiling_enabled() {
            debug!("profiling disabled, running workload bare");
            workload.run().map_err(HarnessError::Workload)?;
            return Ok(None);
        }

        let session = ProfileSession::start(self.config.sampling_interval())?;
        let workload_result = workload.run();
        let stop_result = session.stop();

        let report = match (workload_result, stop_result) {
            (Ok(()), Ok(report)) => report,
            (Ok(()), Err(stop_err)) => return Err(stop_err),
            (Err(workload_err), stop_result) => {
                // The workload error wins; a teardown failure must not mask it.
                if let Err(stop_err) = stop_result {
                    warn!("profiling teardown also failed: {stop_err}");
                }
                return Err(HarnessError::Workload(workload_err));
            }
        };

        report.write(self.config.output_path())?;
        info!(
            "profile artifact written to {} ({} samples)",
            self.config.output_path().display(),
            report.sample_count()
        );

        Ok(Some(report))
    }
}
