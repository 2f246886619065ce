//! Transfer function error types.

use thiserror::Error;

/// Result type for transfer function lookups.
pub type TransferResult<T> = Result<T, TransferError>;

/// Errors from the Log space registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The name matches none of the supported Log spaces.
    #[error("Unsupported Log Space: {0}")]
    UnsupportedLogSpace(String),
}
