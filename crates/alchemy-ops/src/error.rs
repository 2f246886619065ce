//! Error types for metering and tonal operators.

use thiserror::Error;

/// Error type for metering and tonal operators.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Metering mode name outside the supported set.
    #[error("Unknown Metering Mode: {0}")]
    UnknownMeteringMode(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer unusable for the operation (e.g. empty image to meter).
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type for metering and tonal operators.
pub type OpsResult<T> = Result<T, OpsError>;
