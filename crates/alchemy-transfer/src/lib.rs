//! # alchemy-transfer
//!
//! Camera Log transfer functions and the registry of named Log spaces.
//!
//! A transfer function here is a pure per-channel scalar mapping:
//! **encode** takes scene-linear light to a Log code value, **decode** goes
//! back. Decode is the exact inverse of encode for every curve, including
//! highlights far above 1.0 and small negative values left by gamut
//! transforms.
//!
//! # Supported Log Spaces
//!
//! | Space | Curve family | Log base |
//! |-------|--------------|----------|
//! | F-Log, F-Log2, F-Log2C | line + log | 10 |
//! | V-Log | line + log | 10 |
//! | N-Log | cube root + ln | e |
//! | Canon Log 2, Canon Log 3 | odd-symmetric log | 10 |
//! | S-Log3, S-Log3.Cine | line + log | 10 |
//! | LogC3 (EI 800) | line + log | 10 |
//! | LogC4 | line + log | 2 |
//! | Log3G10 | line + log | 10 |
//! | D-Log | line + log | 10 |
//! | L-Log | line + log | 10 |
//!
//! # Usage
//!
//! ```rust
//! use alchemy_transfer::LogSpace;
//!
//! let space: LogSpace = "S-Log3".parse().unwrap();
//! let curve = space.curve();
//! let code = curve.encode(0.18);
//! assert!((code - 420.0 / 1023.0).abs() < 1e-6);
//! assert!((curve.decode(code) - 0.18).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - error types
//! - [`tracing`] - registry initialization events
//!
//! # Used By
//!
//! - `alchemy-primaries` - pairs each space with its gamut
//! - `alchemy-pipeline` - encode stage and contrast pivot

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera_log;
pub mod canon_log;
mod curve;
mod error;
pub mod n_log;
mod registry;

pub use curve::LogCurve;
pub use error::{TransferError, TransferResult};
pub use registry::{LogRegistry, LogSpace};
