//! Timed write/read of a [`NumericBuffer`] in each [`FileFormat`].
//!
//! The clock brackets only the codec call. Stale-file removal before a write
//! and the size probe afterwards are outside the measured interval. Failures
//! never abort the run: they are logged through `tracing` and carried in the
//! returned [`BenchmarkResult`].

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::buffer::NumericBuffer;
use crate::codec::{AsciiCodec, BinaryCodec, Codec, ReadMode};
use crate::config::BenchConfig;
use crate::error::Result;
use crate::format::FileFormat;
use crate::result::{BenchmarkResult, CycleResults};

/// Direction of a timed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Write,
    Read,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Write => "Writing",
            Operation::Read => "Reading",
        })
    }
}

/// Runs the benchmark against `<base_name>.dat` and `<base_name>.bin`.
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    base_name: PathBuf,
    ascii: AsciiCodec,
    binary: BinaryCodec,
    read_mode: ReadMode,
}

impl BenchmarkRunner {
    pub fn new(base_name: impl Into<PathBuf>) -> Self {
        Self {
            base_name: base_name.into(),
            ascii: AsciiCodec::default(),
            binary: BinaryCodec,
            read_mode: ReadMode::default(),
        }
    }

    pub fn with_config(config: &BenchConfig) -> Self {
        Self {
            base_name: config.base_name.clone(),
            ascii: AsciiCodec::new(config.ascii_precision),
            binary: BinaryCodec,
            read_mode: config.read_mode,
        }
    }

    pub fn base_name(&self) -> &Path {
        &self.base_name
    }

    pub fn read_mode(&self) -> ReadMode {
        self.read_mode
    }

    pub fn file_path(&self, format: FileFormat) -> PathBuf {
        format.file_name(&self.base_name)
    }

    fn codec(&self, format: FileFormat) -> &dyn Codec {
        match format {
            FileFormat::Ascii => &self.ascii,
            FileFormat::Binary => &self.binary,
        }
    }

    /// Delete any existing file, then time writing `buffer` in `format`.
    pub fn write(&self, format: FileFormat, buffer: &NumericBuffer) -> BenchmarkResult {
        let path = self.file_path(format);
        remove_stale(&path);

        let codec = self.codec(format);
        let start = Instant::now();
        let outcome = codec.write(&path, buffer.as_slice()).map(|()| buffer.len());
        let elapsed = start.elapsed();

        finish(Operation::Write, format, &path, elapsed, outcome)
    }

    /// Time reading the `format` file into `buffer`.
    ///
    /// The file is expected to exist already, normally from a preceding
    /// [`write`](Self::write).
    pub fn read(&self, format: FileFormat, buffer: &mut NumericBuffer) -> BenchmarkResult {
        let path = self.file_path(format);

        let codec = self.codec(format);
        let start = Instant::now();
        let outcome = codec.read(&path, buffer.as_mut_slice(), self.read_mode);
        let elapsed = start.elapsed();

        finish(Operation::Read, format, &path, elapsed, outcome)
    }

    /// One repetition: every format is written from `source`, then read into
    /// `sink`.
    pub fn run_cycle(&self, source: &NumericBuffer, sink: &mut NumericBuffer) -> CycleResults {
        self.run_cycle_with(source, sink, |_, _| {})
    }

    /// [`run_cycle`](Self::run_cycle), calling `progress` before each
    /// operation starts.
    pub fn run_cycle_with<F>(
        &self,
        source: &NumericBuffer,
        sink: &mut NumericBuffer,
        mut progress: F,
    ) -> CycleResults
    where
        F: FnMut(Operation, FileFormat),
    {
        let mut results = CycleResults::default();
        for format in FileFormat::ALL {
            progress(Operation::Write, format);
            let write = self.write(format, source);

            progress(Operation::Read, format);
            let read = self.read(format, sink);

            let slot = results.get_mut(format);
            slot.write = write;
            slot.read = read;
        }
        results
    }
}

fn finish(
    op: Operation,
    format: FileFormat,
    path: &Path,
    elapsed: Duration,
    outcome: Result<usize>,
) -> BenchmarkResult {
    let size = file_size(path);
    match outcome {
        Ok(values) => {
            debug!(
                path = %path.display(),
                %format,
                values,
                elapsed_ns = elapsed.as_nanos() as u64,
                "{op} finished"
            );
            BenchmarkResult::new(elapsed, size)
        }
        Err(err) => {
            error!(path = %path.display(), %format, "{op} failed: {err}");
            BenchmarkResult::failed(elapsed, size, err.to_string())
        }
    }
}

/// Remove `path` if present. Only logs on failure.
fn remove_stale(path: &Path) {
    debug!(path = %path.display(), "checking if file exists");
    match fs::remove_file(path) {
        Ok(()) => info!(path = %path.display(), "file exists, deleted it"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "file doesn't exist")
        }
        Err(err) => warn!(path = %path.display(), "file system error: {err}"),
    }
}

/// Size in bytes, or `None` if the file cannot be stat'ed.
fn file_size(path: &Path) -> Option<u64> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.len()),
        Err(err) => {
            debug!(path = %path.display(), "can't stat file: {err}");
            None
        }
    }
}
