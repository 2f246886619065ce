//! # alchemy-pipeline
//!
//! Turns a demosaiced, linear camera-native RGB buffer into Log-encoded
//! footage ready for grading.
//!
//! # Stages
//!
//! ```text
//! sensor normalize -> [white balance] -> exposure -> [lens] -> native to ProPhoto
//!   -> [lens] -> ProPhoto to Log gamut -> Log encode
//!   -> [saturation] -> [contrast] -> [highlight/shadow] -> [LUT]
//! ```
//!
//! Bracketed stages only run when configured; the exact list for a
//! configuration is its [`Plan`]. Everything up to the Log encode is linear
//! light, everything after works on code values.
//!
//! # Usage
//!
//! ```rust
//! use alchemy_core::{CameraMetadata, ImageBuffer};
//! use alchemy_pipeline::{Pipeline, PipelineConfig};
//! use alchemy_primaries::{REC2020, rgb_to_xyz_matrix};
//!
//! let config = PipelineConfig::from_yaml_str("log_space: LogC4\nmetering: average\n").unwrap();
//! let pipeline = Pipeline::new(config).unwrap();
//!
//! let meta = CameraMetadata::new(rgb_to_xyz_matrix(&REC2020).unwrap());
//! let out = pipeline.process(ImageBuffer::filled(16, 16, [0.05, 0.05, 0.05]), &meta).unwrap();
//! assert_eq!(out.image().dimensions(), (16, 16));
//! ```
//!
//! # Concurrency
//!
//! A [`Pipeline`] is immutable once built. Share it across threads, or clone
//! it; LUTs and lens correctors sit behind [`Arc`](std::sync::Arc).
//!
//! # Dependencies
//!
//! - `alchemy-transfer`, `alchemy-primaries` - Log curves and gamut matrices
//! - `alchemy-ops` - metering and per-pixel operators
//! - `alchemy-lut` - `.cube` loading and sampling
//! - [`serde_yaml`] - configuration files
//! - [`tracing`] - per-image and per-stage events
//!
//! # Used By
//!
//! Host applications: batch converters, tethering tools, plugins.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod error;
pub mod lens;
mod pipeline;
pub mod plan;

pub use config::{LensOrder, PipelineConfig, Resolved};
pub use error::{PipelineError, PipelineResult};
pub use lens::{LensCorrector, LensRequest};
pub use pipeline::Pipeline;
pub use plan::{Plan, Stage};
