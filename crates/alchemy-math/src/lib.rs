//! # alchemy-math
//!
//! Linear algebra for the colorimetric pipeline.
//!
//! - [`Mat3`] - 3x3 matrices for gamut transforms
//! - [`Vec3`] - RGB / XYZ triplets
//! - [`adapt_matrix`] - Bradford chromatic adaptation between white points
//! - [`lerp`], [`inverse_lerp`], [`saturate`] - scalar helpers for the LUT engine
//!   and output quantization
//!
//! # Convention
//!
//! All matrices are **row-major** and act on **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Derivations that chain several inversions (primaries to XYZ, camera to
//! reference) run in `f64` through [`glam::DMat3`] and are narrowed to `f32`
//! once at the end. Per-pixel work stays in `f32`.
//!
//! # Usage
//!
//! ```rust
//! use alchemy_math::{Mat3, Vec3};
//!
//! let m = Mat3::diagonal(2.0, 1.0, 0.5);
//! let v = m * Vec3::new(1.0, 1.0, 1.0);
//! assert_eq!(v, Vec3::new(2.0, 1.0, 0.5));
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - double precision matrix derivations
//!
//! # Used By
//!
//! - `alchemy-primaries` - gamut matrices
//! - `alchemy-lut` - trilinear blends
//! - `alchemy-ops` - luminance and tonal math
//! - `alchemy-pipeline` - per-pixel matrix stages

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adapt;
mod interp;
mod mat3;
mod vec3;

pub use adapt::*;
pub use interp::*;
pub use mat3::*;
pub use vec3::*;
