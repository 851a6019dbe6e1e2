//! End-to-end tests for the harness run modes
//!
//! Tests cover the plain and profiled paths, artifact persistence, and
//! error propagation from a failing workload.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use perf_harness::{
    FixedDelay, Harness, HarnessConfig, HarnessError, ProfileReport, WorkloadError,
};
use std::fmt;
use std::time::Duration;
use tempfile::TempDir;

/// Stands in for the failure domain of a real workload.
#[derive(Debug)]
struct ReadFailure;

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simulated read failure")
    }
}

impl std::error::Error for ReadFailure {}

fn config_in(dir: &TempDir, enable_profiling: bool) -> HarnessConfig {
    HarnessConfig::new(
        enable_profiling,
        dir.path().join("test.prof"),
        Duration::from_micros(100),
    )
    .unwrap()
}

#[test]
fn test_plain_run_executes_workload_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let harness = Harness::new(config_in(&dir, false));
    let mut calls = 0_u32;
    let mut workload = || -> Result<(), WorkloadError> {
        calls += 1;
        Ok(())
    };

    let outcome = harness.run(&mut workload).unwrap();

    assert!(outcome.is_none());
    assert_eq!(calls, 1);
    assert!(!harness.config().output_path().exists());
}

#[test]
fn test_profiled_run_persists_a_loadable_artifact() {
    let dir = TempDir::new().unwrap();
    let harness = Harness::new(config_in(&dir, true));
    let mut workload = FixedDelay::new(Duration::from_millis(2));

    let report = harness
        .run(&mut workload)
        .unwrap()
        .expect("profiled mode returns a report");

    let path = harness.config().output_path();
    assert!(path.exists());
    assert!(std::fs::metadata(path).unwrap().len() > 0);

    let loaded = ProfileReport::load(path).unwrap();
    assert_eq!(loaded, report);
    assert!(loaded.sample_count() >= 1);
    assert!(loaded.duration() >= Duration::from_millis(2));
}

#[test]
fn test_rerun_replaces_the_previous_artifact() {
    let dir = TempDir::new().unwrap();
    let harness = Harness::new(config_in(&dir, true));
    let mut workload = FixedDelay::new(Duration::from_millis(1));

    harness.run(&mut workload).unwrap();
    let second = harness
        .run(&mut workload)
        .unwrap()
        .expect("profiled mode returns a report");

    let loaded = ProfileReport::load(harness.config().output_path()).unwrap();
    assert_eq!(loaded, second);
}

#[test]
fn test_failing_workload_error_is_returned_unwrapped() {
    let dir = TempDir::new().unwrap();
    let harness = Harness::new(config_in(&dir, true));
    let mut workload = || -> Result<(), WorkloadError> { Err(Box::new(ReadFailure)) };

    let err = harness.run(&mut workload).unwrap_err();

    match err {
        HarnessError::Workload(source) => {
            assert!(source.downcast_ref::<ReadFailure>().is_some());
        }
        other => panic!("expected workload error, got {other}"),
    }
    assert!(!harness.config().output_path().exists());
}

#[test]
fn test_failed_run_leaves_no_session_behind() {
    let dir = TempDir::new().unwrap();
    let harness = Harness::new(config_in(&dir, true));
    let mut failing = || -> Result<(), WorkloadError> { Err(Box::new(ReadFailure)) };

    assert!(harness.run(&mut failing).is_err());

    // A fresh profiled run right after the failure must work end to end.
    let mut workload = FixedDelay::new(Duration::from_millis(1));
    let report = harness
        .run(&mut workload)
        .unwrap()
        .expect("profiled mode returns a report");

    assert!(report.sample_count() >= 1);
    assert!(harness.config().output_path().exists());
}

#[test]
fn test_unwritable_output_path_is_a_persistence_error() {
    let dir = TempDir::new().unwrap();
    let config = HarnessConfig::new(
        true,
        dir.path().join("no-such-dir").join("test.prof"),
        Duration::from_micros(100),
    )
    .unwrap();
    let harness = Harness::new(config);
    let mut calls = 0_u32;
    let mut workload = || -> Result<(), WorkloadError> {
        calls += 1;
        Ok(())
    };

    let err = harness.run(&mut workload).unwrap_err();

    assert!(matches!(err, HarnessError::ArtifactWrite(_)));
    assert_eq!(calls, 1);
}
