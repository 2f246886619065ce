//! # alchemy-lut
//!
//! 3D lookup tables for creative looks applied to Log footage.
//!
//! - [`Lut3D`] - an N x N x N cube of RGB triples with per-axis domain
//! - [`cube`] - `.cube` parsing ([`read_cube`], [`parse_cube`])
//! - [`LutError`] - `Invalid LUT` content errors and I/O errors
//!
//! Sampling clamps each channel to the domain, then blends the eight
//! surrounding nodes trilinearly (one linear blend per axis), matching the
//! default interpolation of common grading tools.
//!
//! A loaded table is immutable; wrap it in an `Arc` to share it across
//! concurrent pipeline runs.
//!
//! # Usage
//!
//! ```rust
//! use alchemy_lut::parse_cube;
//!
//! let text = "LUT_3D_SIZE 2\n\
//!     0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
//! let lut = parse_cube(text.as_bytes()).unwrap();
//! assert_eq!(lut.apply([0.25, 0.5, 0.75]), [0.25, 0.5, 0.75]);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - error handling
//! - [`tracing`] - load diagnostics
//! - [`alchemy-math`] - interpolation helpers
//!
//! # Used By
//!
//! - `alchemy-pipeline` - the optional LUT stage

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cube;
mod error;
mod lut3d;

pub use cube::{parse_cube, read_cube};
pub use error::{LutError, LutResult};
pub use lut3d::Lut3D;
