//! # alchemy-core
//!
//! Core data types shared by every stage of the RAW-to-Log pipeline.
//!
//! - [`ImageBuffer`] - owned, interleaved three-channel `f32` image
//! - [`CameraMetadata`], [`SensorLevels`] - per-image facts supplied by the RAW decoder
//! - [`OutputImage`], [`OutputFormat`], [`BitDepth`], [`ColorTag`] - the
//!   hand-off to the codec collaborator
//! - [`Error`] - buffer and metadata failures
//!
//! ## Ownership
//!
//! A buffer belongs to exactly one pipeline invocation. Stages take it by
//! value or by `&mut` and hand it on; nothing here is shared between images.
//!
//! ## Crate Structure
//!
//! ```text
//! alchemy-math
//!    ^
//!    |
//! alchemy-core (this crate)
//!    ^
//!    +-- alchemy-ops (metering, tonal operators)
//!    +-- alchemy-pipeline (orchestration)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod metadata;
pub mod output;

pub use error::*;
pub use image::ImageBuffer;
pub use metadata::{CameraMetadata, SensorLevels};
pub use output::{BitDepth, ColorTag, OutputFormat, OutputImage};
