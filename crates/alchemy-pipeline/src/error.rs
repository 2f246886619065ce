//! Pipeline error type.
//!
//! Every failure of one [`Pipeline::process`](crate::Pipeline::process) call
//! surfaces here, synchronously, with the originating crate's error kept
//! intact so messages such as `Unsupported Log Space: ...` or
//! `Invalid LUT: ...` reach the caller unchanged.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors from configuring or running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Bad buffer or camera metadata (including a missing color matrix).
    #[error(transparent)]
    Core(#[from] alchemy_core::Error),

    /// Unknown Log space name.
    #[error(transparent)]
    Transfer(#[from] alchemy_transfer::TransferError),

    /// Malformed or unreadable LUT.
    #[error(transparent)]
    Lut(#[from] alchemy_lut::LutError),

    /// Unknown metering mode or out-of-range operator setting.
    #[error(transparent)]
    Ops(#[from] alchemy_ops::OpsError),

    /// Configuration YAML did not parse.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    ConfigIo {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A Log space has no usable gamut matrix.
    #[error("no gamut transform for {0}")]
    Gamut(String),

    /// The lens correction collaborator failed or is missing.
    #[error("lens correction failed: {0}")]
    Lens(String),
}
