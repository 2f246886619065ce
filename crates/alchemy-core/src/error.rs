//! Error types for buffer and metadata handling.
//!
//! # Usage
//!
//! ```rust
//! use alchemy_core::{Error, ImageBuffer};
//!
//! let err = ImageBuffer::from_data(2, 2, vec![0.0; 5]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building buffers or reading camera metadata.
///
/// All of these are configuration errors: fatal for the current image and
/// detected before any per-pixel work starts.
#[derive(Debug, Error)]
pub enum Error {
    /// Width, height, stride or data length are inconsistent.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// What was wrong
        reason: String,
    },

    /// The decoder supplied no usable camera-to-XYZ matrix.
    ///
    /// Without it there is no native-to-reference mapping, so the image
    /// cannot be processed.
    #[error("Missing Color Matrix: {0}")]
    MissingColorMatrix(String),

    /// Metadata is present but unusable (black >= white, non-finite multipliers).
    #[error("invalid camera metadata: {0}")]
    InvalidMetadata(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidDimensions`].
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
