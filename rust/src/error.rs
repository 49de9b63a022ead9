//! Error type shared by the codecs, the runner and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by `iobench`.
#[derive(Debug, Error)]
pub enum Error {
    /// A format value outside `{Ascii, Binary}` reached a conversion.
    #[error("unknown file type: {0}")]
    UnknownFormat(String),

    /// The file could not be opened, written or read.
    #[error("can't access file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An ASCII token that is not a floating-point number.
    #[error("{}: token {index} is not a number: {token:?}", path.display())]
    Parse {
        path: PathBuf,
        index: usize,
        token: String,
    },

    /// Strict reads only: the file held fewer values than the buffer.
    #[error("{}: expected {expected} values, found {actual}", path.display())]
    LengthMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
