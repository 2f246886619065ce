//! LUT error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors from loading a LUT.
///
/// Content problems and unreadable files are separate kinds: a caller can
/// retry or report an [`Io`](LutError::Io) failure differently from a file
/// that will never parse.
#[derive(Debug, Error)]
pub enum LutError {
    /// Malformed content: bad or missing header, element count not N^3,
    /// unparsable numbers, degenerate domain.
    #[error("Invalid LUT: {0}")]
    Invalid(String),

    /// The file could not be read.
    #[error("cannot read LUT {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl LutError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
