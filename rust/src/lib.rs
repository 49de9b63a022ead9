//! # iobench
//!
//! Disk I/O micro-benchmark. A vector of random doubles is written to disk
//! and read back as ASCII (`.dat`, scientific notation) and as raw binary
//! (`.bin`, native-endian IEEE-754), timing each operation.
//!
//! ```rust,no_run
//! use iobench::{BenchmarkRunner, FileFormat, NumericBuffer};
//!
//! let mut out = NumericBuffer::zeroed(100);
//! out.populate_default().unwrap();
//! let mut back = NumericBuffer::zeroed(100);
//!
//! let runner = BenchmarkRunner::new("test");
//! let written = runner.write(FileFormat::Binary, &out);
//! let read = runner.read(FileFormat::Binary, &mut back);
//! assert_eq!(written.file_size(), Some(800));
//! assert_eq!(out, back);
//! println!("{read}");
//! ```

pub mod buffer;
pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod result;
pub mod runner;

pub use buffer::NumericBuffer;
pub use codec::{AsciiCodec, BinaryCodec, Codec, ReadMode};
pub use config::BenchConfig;
pub use error::{Error, Result};
pub use format::FileFormat;
pub use result::{BenchmarkResult, CycleResults, FormatResults};
pub use runner::{BenchmarkRunner, Operation};
