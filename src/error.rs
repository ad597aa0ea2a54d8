use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while saving, loading, or measuring a structure.
#[derive(Debug, Error)]
pub enum Error {
    /// The byte sink or source could not be opened
    #[error("failed to open `{}`: {source}", path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Attempted to read past the end of the input
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A sequence's encoded size does not fit in the address space
    #[error("sequence of {count} elements of {elem_size} bytes is not addressable")]
    LengthOverflow { count: u64, elem_size: usize },

    /// Growing a sequence to its decoded length failed
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    /// An I/O error other than truncation
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Classify a read failure, keeping truncation distinct from other I/O errors.
    pub(crate) fn from_read(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof
        } else {
            Error::Io(err)
        }
    }

    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Open {
            path: path.into(),
            source,
        }
    }
}
