//! # alchemy-ops
//!
//! Per-image operators that sit around the gamut and curve stages.
//!
//! # Modules
//!
//! - [`meter`] - exposure metering ([`ExposureMeter`], five [`MeteringMode`]s)
//! - [`normalize`] - sensor black/white levels and as-shot white balance
//! - [`white_balance`] - temperature/tint correction in linear light
//! - [`tonal`] - saturation, contrast and highlight/shadow rolloff on Log code values
//! - [`adjust`] - [`AdjustmentSettings`], the flat record building the above
//! - [`parallel`] - per-pixel maps and deterministic chunked reductions
//!
//! Every operator is a pure per-pixel function of its parameters, and every
//! signed magnitude is an exact identity at zero (`is_identity()` lets the
//! pipeline skip the stage altogether).
//!
//! # Example
//!
//! ```rust
//! use alchemy_core::ImageBuffer;
//! use alchemy_math::Vec3;
//! use alchemy_ops::{ExposureMeter, MeterSettings, MeteringMode};
//!
//! let img = ImageBuffer::filled(4, 4, [0.09, 0.09, 0.09]);
//! let meter = ExposureMeter::new(MeterSettings::default(), Vec3::new(0.2126, 0.7152, 0.0722)).unwrap();
//! let stops = meter.measure(MeteringMode::Average, &img).unwrap();
//! assert!((stops - 1.0).abs() < 1e-3);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - run maps and reductions on the rayon pool
//!
//! # Dependencies
//!
//! - [`alchemy-core`] - `ImageBuffer`, `CameraMetadata`
//! - [`alchemy-math`] - `Vec3`, interpolation
//! - [`serde`] - settings records for configuration files
//! - [`rayon`] - optional data parallelism
//!
//! # Used By
//!
//! - `alchemy-pipeline`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adjust;
mod error;
mod histogram;
pub mod meter;
pub mod normalize;
pub mod parallel;
pub mod tonal;
pub mod white_balance;

pub use adjust::AdjustmentSettings;
pub use error::{OpsError, OpsResult};
pub use meter::{ExposureDecision, ExposureMeter, MeterSettings, MeteringMode};
pub use normalize::SensorNormalize;
pub use tonal::{Contrast, HighlightShadow, Saturation};
pub use white_balance::WhiteBalance;
