//! Timing records for single operations and whole cycles.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::format::FileFormat;

const MIB: f64 = 1024.0 * 1024.0;

/// Outcome of one timed write or read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    elapsed_ms: f64,
    file_size: Option<u64>,
    throughput_mbps: Option<f64>,
    error: Option<String>,
}

impl BenchmarkResult {
    /// Build a record from the measured duration and probed file size.
    ///
    /// Throughput is `None` when the size is unknown or the elapsed time is
    /// zero.
    pub fn new(elapsed: Duration, file_size: Option<u64>) -> Self {
        let elapsed_ms = elapsed.as_nanos() as f64 / 1e6;
        Self {
            elapsed_ms,
            file_size,
            throughput_mbps: throughput_mbps(file_size, elapsed_ms),
            error: None,
        }
    }

    /// Same as [`new`](Self::new), flagged with the failure that occurred.
    pub fn failed(elapsed: Duration, file_size: Option<u64>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(elapsed, file_size)
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn file_size(&self) -> Option<u64> {
        self.file_size
    }

    /// MiB per second.
    pub fn throughput_mbps(&self) -> Option<f64> {
        self.throughput_mbps
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

fn throughput_mbps(file_size: Option<u64>, elapsed_ms: f64) -> Option<f64> {
    let size = file_size?;
    if elapsed_ms > 0.0 {
        Some(size as f64 / MIB / elapsed_ms * 1e3)
    } else {
        None
    }
}

impl Default for BenchmarkResult {
    fn default() -> Self {
        Self::new(Duration::ZERO, Some(0))
    }
}

/// Three indented lines: elapsed time, file size, speed.
impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Elapsed time: {} ms", self.elapsed_ms)?;
        match self.file_size {
            Some(size) => writeln!(f, "  File size:    {} B", size)?,
            None => writeln!(f, "  File size:    unknown")?,
        }
        match self.throughput_mbps {
            Some(speed) => writeln!(f, "  Speed:        {} MB/s", speed)?,
            None => writeln!(f, "  Speed:        n/a")?,
        }
        if let Some(err) = &self.error {
            writeln!(f, "  Error:        {}", err)?;
        }
        Ok(())
    }
}

/// Write and read results for one format.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormatResults {
    pub write: BenchmarkResult,
    pub read: BenchmarkResult,
}

/// Results of one repetition: both formats, written then read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CycleResults {
    pub ascii: FormatResults,
    pub binary: FormatResults,
}

impl CycleResults {
    pub fn get(&self, format: FileFormat) -> &FormatResults {
        match format {
            FileFormat::Ascii => &self.ascii,
            FileFormat::Binary => &self.binary,
        }
    }

    pub(crate) fn get_mut(&mut self, format: FileFormat) -> &mut FormatResults {
        match format {
            FileFormat::Ascii => &mut self.ascii,
            FileFormat::Binary => &mut self.binary,
        }
    }

    pub fn all_ok(&self) -> bool {
        FileFormat::ALL.iter().all(|&format| {
            let r = self.get(format);
            r.write.is_ok() && r.read.is_ok()
        })
    }
}

const RULE: &str = "===================================";
const THIN_RULE: &str = "-----------------------------------";

impl fmt::Display for CycleResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "            Results")?;
        writeln!(f, "{}", RULE)?;
        for (i, format) in FileFormat::ALL.iter().enumerate() {
            if i > 0 {
                writeln!(f, "{}", THIN_RULE)?;
            }
            let r = self.get(*format);
            writeln!(f, "{} mode:", format.label())?;
            writeln!(f, " Writing:")?;
            write!(f, "{}", r.write)?;
            writeln!(f)?;
            writeln!(f, " Reading:")?;
            write!(f, "{}", r.read)?;
        }
        writeln!(f, "{}", RULE)
    }
}
