#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! Profile samples and the memory probe behind them.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

/// One profile sample: time elapsed since session start plus a best-effort
/// resident-set reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Microseconds elapsed since the session started.
    elapsed_us: u64,

    /// Resident set size in kilobytes, when the platform exposes it.
    rss_kb: Option<u64>,
}

impl Sample {
    /// Build a sample from raw parts.
    #[must_use]
    pub const fn new(elapsed_us: u64, rss_kb: Option<u64>) -> Self {
        Self { elapsed_us, rss_kb }
    }

    /// Capture a sample relative to the session start.
    #[must_use]
    pub fn capture(started_at: Instant) -> Self {
        Self {
            elapsed_us: u64::try_from(started_at.elapsed().as_micros()).unwrap_or(u64::MAX),
            rss_kb: read_self_rss_kb(),
        }
    }

    /// Microseconds elapsed since session start.
    #[must_use]
    pub const fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    /// Resident set size in kilobytes, if captured.
    #[must_use]
    pub const fn rss_kb(&self) -> Option<u64> {
        self.rss_kb
    }
}

/// Read the current process's resident set size from procfs.
///
/// `None` on platforms without `/proc` and on any read or parse failure; a
/// sampling miss must never fail the run.
fn read_self_rss_kb() -> Option<u64> {
    read_rss_from(Path::new("/proc/self/status"))
}

/// Read a `VmRSS` value from a status-format file (split out for tests).
fn read_rss_from(path: &Path) -> Option<u64> {
    let file = File::open(path).ok()?;
    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .find_map(|line| parse_vm_rss(&line))
}

/// Parse a `/proc` status line of the form `VmRSS:\t    1234 kB`.
fn parse_vm_rss(line: &str) -> Option<u64> {
    line.strip_prefix("VmRSS:")?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}
