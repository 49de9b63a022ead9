//! On-disk formats and the file names derived from them.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// The two encodings the benchmark exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Raw native-endian IEEE-754 doubles.
    Binary,
    /// One value per line in scientific notation.
    Ascii,
}

impl FileFormat {
    /// Benchmark order: ASCII first, then binary.
    pub const ALL: [FileFormat; 2] = [FileFormat::Ascii, FileFormat::Binary];

    pub const fn extension(self) -> &'static str {
        match self {
            FileFormat::Ascii => "dat",
            FileFormat::Binary => "bin",
        }
    }

    /// Name used in the results block.
    pub const fn label(self) -> &'static str {
        match self {
            FileFormat::Ascii => "ASCII",
            FileFormat::Binary => "Binary",
        }
    }

    /// Integer code: `0` is binary, `1` is ASCII.
    pub const fn code(self) -> i32 {
        match self {
            FileFormat::Binary => 0,
            FileFormat::Ascii => 1,
        }
    }

    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(FileFormat::Binary),
            1 => Ok(FileFormat::Ascii),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }

    /// `base` with this format's extension appended, e.g. `test` -> `test.dat`.
    ///
    /// The extension is appended rather than substituted, so a base name that
    /// already contains a dot keeps it.
    pub fn file_name(self, base: &Path) -> PathBuf {
        let mut name = base.as_os_str().to_owned();
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" | "dat" => Ok(FileFormat::Ascii),
            "binary" | "bin" => Ok(FileFormat::Binary),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<i32> for FileFormat {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        FileFormat::from_code(code)
    }
}
