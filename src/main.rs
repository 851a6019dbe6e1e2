#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]

//! CLI for the performance-measurement harness

use perf_harness::{
    DEFAULT_ARTIFACT_PATH, DEFAULT_SAMPLING_INTERVAL, FixedDelay, Harness, HarnessConfig,
    HarnessError, ProfileReport,
};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Pause length of the stand-in read workload.
const READ_PAUSE: Duration = Duration::from_millis(1);

fn main() {
    init_tracing();

    let result = run();

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run() -> perf_harness::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(config) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };

    if config.profiling_enabled() {
        println!("=== Performance Harness ===");
        println!("Mode: profiled");
        println!(
            "Sampling interval: {}us",
            config.sampling_interval().as_micros()
        );
        println!("Output: {}", config.output_path().display());
        println!();
        println!("Starting workload...");
    }

    let harness = Harness::new(config);
    let mut workload = FixedDelay::new(READ_PAUSE);

    if let Some(report) = harness.run(&mut workload)? {
        print_summary(&report, harness.config());
    } else {
        println!("Workload completed (profiling disabled)");
    }

    Ok(())
}

/// Parse command line arguments into a configuration.
///
/// Returns `None` when help was requested.
fn parse_args(args: &[String]) -> perf_harness::Result<Option<HarnessConfig>> {
    let mut enable_profiling = false;
    let mut output_path = PathBuf::from(DEFAULT_ARTIFACT_PATH);

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--profile" => enable_profiling = true,
            "--output" => {
                let Some(path) = iter.next() else {
                    return Err(HarnessError::InvalidConfig(
                        "--output requires a path".to_string(),
                    ));
                };
                output_path = PathBuf::from(path);
            }
            "-h" | "--help" => return Ok(None),
            other => {
                return Err(HarnessError::InvalidConfig(format!(
                    "unrecognized argument: {other}"
                )));
            }
        }
    }

    HarnessConfig::new(enable_profiling, output_path, DEFAULT_SAMPLING_INTERVAL).map(Some)
}

fn print_summary(report: &ProfileReport, config: &HarnessConfig) {
    println!();
    println!("=== Profiling Complete ===");
    println!("Samples collected: {}", report.sample_count());
    println!(
        "Max RSS: {:.2} MB ({} KB)",
        report.max_rss_mb(),
        report.max_rss_kb()
    );
    println!(
        "Avg RSS: {:.2} MB ({} KB)",
        report.avg_rss_mb(),
        report.avg_rss_kb()
    );
    println!("Duration: {:.2}ms", report.duration().as_secs_f64() * 1000.0);
    println!();
    println!("Profile saved to: {}", config.output_path().display());
}

fn print_usage() {
    eprintln!("Usage: perf-harness [--profile] [--output <path>]");
    eprintln!();
    eprintln!("Runs the stand-in read workload once, bare by default.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --profile        Run under the sampling profiler and write an artifact");
    eprintln!("  --output <path>  Artifact path (default: test.prof)");
    eprintln!("  -h, --help       Show this help");
    eprintln!();
    eprintln!("Output:");
    eprintln!("  With --profile, summarized statistics and the raw samples are");
    eprintln!("  written as JSON to the artifact path");
}

/// Initialize tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
