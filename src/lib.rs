#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # perf-harness
//!
//! A harness for measuring one workload, either bare or under a sampling
//! profiler.
//!
//! ## Modes
//!
//! - **Plain** (the default): the workload runs with no instrumentation
//!   and nothing is written to disk.
//! - **Profiled**: the workload runs inside a [`ProfileSession`] that
//!   samples elapsed time and resident memory on a background thread; the
//!   summarized [`ProfileReport`] is persisted as a JSON artifact
//!   (`test.prof` by default) and can be loaded back for analysis.
//!
//! A workload failure always takes precedence over instrumentation or
//! persistence failures, and the profiling session is released on every
//! exit path.
//!
//! ```no_run
//! use perf_harness::{FixedDelay, Harness, HarnessConfig};
//! use std::time::Duration;
//!
//! fn main() -> perf_harness::Result<()> {
//!     let config = HarnessConfig::profiled()?;
//!     let harness = Harness::new(config);
//!     let mut workload = FixedDelay::new(Duration::from_millis(1));
//!
//!     if let Some(report) = harness.run(&mut workload)? {
//!         println!("collected {} samples", report.sample_count());
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod metrics;
mod report;
mod runner;
mod session;
mod workload;

pub use config::{DEFAULT_ARTIFACT_PATH, DEFAULT_SAMPLING_INTERVAL, HarnessConfig};
pub use error::{HarnessError, Result, WorkloadError};
pub use metrics::Sample;
pub use report::ProfileReport;
pub use runner::Harness;
pub use session::ProfileSession;
pub use workload::{FixedDelay, Workload};
