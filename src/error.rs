//! Error types for pdfscan library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during scanning, extraction and redaction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input buffer is missing, empty or otherwise unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The file does not carry a `.pdf` extension.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// The data does not start with a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// A mandatory token or attribute is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A scan ran off the end of the buffer looking for a terminator.
    #[error("Buffer exhausted at offset {offset} while looking for {expected}")]
    BufferExhausted {
        /// Offset where the scan started.
        offset: usize,
        /// Description of the terminator that was never found.
        expected: String,
    },

    /// The compression primitive rejected a stream payload.
    #[error("Stream decode error: {0}")]
    Decode(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    pub(crate) fn exhausted(offset: usize, expected: impl Into<String>) -> Self {
        Error::BufferExhausted {
            offset,
            expected: expected.into(),
        }
    }
}
