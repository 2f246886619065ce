//! # alchemy-primaries
//!
//! Chromaticity primaries and the 3x3 matrices that move pixels between
//! the camera's native RGB, the ProPhoto RGB linear reference and each
//! camera Log gamut.
//!
//! ```text
//! camera native --(per image)--> ProPhoto linear (D50) --(per Log space)--> Log gamut linear (D65)
//! ```
//!
//! All matrices act on linear light only. White point changes use Bradford
//! adaptation; every derivation runs in `f64` and is narrowed once.
//!
//! # Usage
//!
//! ```rust
//! use alchemy_primaries::gamut_for;
//! use alchemy_transfer::LogSpace;
//! use alchemy_math::Vec3;
//!
//! let g = gamut_for(LogSpace::SLog3Cine).unwrap();
//! assert_eq!(g.name, "S-Gamut3.Cine");
//!
//! // reference white stays white
//! let w = g.from_reference * Vec3::ONE;
//! assert!((w.x - 1.0).abs() < 1e-4 && (w.z - 1.0).abs() < 1e-4);
//! ```
//!
//! # Dependencies
//!
//! - [`alchemy-math`] - matrices and Bradford adaptation
//! - [`alchemy-transfer`] - the [`LogSpace`](alchemy_transfer::LogSpace) key
//! - [`alchemy-core`] - camera metadata
//! - [`glam`] - double precision derivation
//!
//! # Used By
//!
//! - `alchemy-pipeline` - both gamut stages and metering weights

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod gamut;
mod native;
mod primaries;

pub use gamut::{GamutDescriptor, GamutRegistry, gamut_for, primaries_for};
pub use native::{NativeTransform, luminance_weights, native_to_reference};
pub use primaries::*;
