//! Run configuration.

use std::path::PathBuf;

use crate::buffer::{DEFAULT_LOWER, DEFAULT_UPPER};
use crate::codec::{ReadMode, DEFAULT_PRECISION};
use crate::error::{Error, Result};

pub const DEFAULT_VECTOR_LEN: usize = 100;
pub const DEFAULT_REPETITIONS: u16 = 1;
pub const DEFAULT_BASE_NAME: &str = "test";

/// Everything one benchmark run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Number of doubles in the vector.
    pub vector_len: usize,
    pub repetitions: u16,
    /// Path prefix for the `.dat` / `.bin` files.
    pub base_name: PathBuf,
    /// Digits after the decimal point in ASCII output.
    pub ascii_precision: usize,
    pub lower: f64,
    pub upper: f64,
    pub read_mode: ReadMode,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            vector_len: DEFAULT_VECTOR_LEN,
            repetitions: DEFAULT_REPETITIONS,
            base_name: PathBuf::from(DEFAULT_BASE_NAME),
            ascii_precision: DEFAULT_PRECISION,
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            read_mode: ReadMode::default(),
        }
    }
}

impl BenchConfig {
    pub fn with_vector_len(mut self, vector_len: usize) -> Self {
        self.vector_len = vector_len;
        self
    }

    pub fn with_repetitions(mut self, repetitions: u16) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_base_name(mut self, base_name: impl Into<PathBuf>) -> Self {
        self.base_name = base_name.into();
        self
    }

    pub fn with_read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    /// Size of the vector in bytes.
    pub fn vector_bytes(&self) -> usize {
        self.vector_len.saturating_mul(std::mem::size_of::<f64>())
    }

    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(Error::InvalidConfig("repetitions must be positive".into()));
        }
        if self.base_name.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("base name is empty".into()));
        }
        // 17 fractional digits already round-trip every f64.
        if self.ascii_precision > 17 {
            return Err(Error::InvalidConfig(format!(
                "ascii precision {} exceeds 17 digits",
                self.ascii_precision
            )));
        }
        if !(self.lower <= self.upper) || !(self.upper - self.lower).is_finite() {
            return Err(Error::InvalidConfig(format!(
                "invalid value range [{}, {}]",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}
