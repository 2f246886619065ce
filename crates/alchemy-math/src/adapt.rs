//! Chromatic adaptation between white points.
//!
//! The Log gamuts are all defined against D65 while ProPhoto RGB uses D50,
//! and a camera's native matrix may be referenced to yet another white. A
//! von Kries style transform in Bradford cone space bridges them:
//!
//! ```text
//! M = B^-1 * diag(dst_cone / src_cone) * B
//! ```
//!
//! ```rust
//! use alchemy_math::{adapt_matrix, BRADFORD, D50, D65};
//!
//! let m = adapt_matrix(&BRADFORD, D65, D50);
//! let w = m * D65;
//! assert!((w.x - D50.x).abs() < 1e-4);
//! assert!((w.z - D50.z).abs() < 1e-4);
//! ```

use crate::{Mat3, Vec3};

/// D65 white point, XYZ with Y = 1.
pub const D65: Vec3 = Vec3::new(0.95047, 1.0, 1.08883);

/// D50 white point, XYZ with Y = 1.
pub const D50: Vec3 = Vec3::new(0.96422, 1.0, 0.82521);

/// A cone response transform and its inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeResponse {
    /// XYZ to cone space.
    pub forward: Mat3,
    /// Cone space to XYZ.
    pub inverse: Mat3,
}

/// Bradford cone response (Lam 1985).
pub const BRADFORD: ConeResponse = ConeResponse {
    forward: Mat3::from_rows([
        [0.8951, 0.2664, -0.1614],
        [-0.7502, 1.7135, 0.0367],
        [0.0389, -0.0685, 1.0296],
    ]),
    inverse: Mat3::from_rows([
        [0.9869929, -0.1470543, 0.1599627],
        [0.4323053, 0.5183603, 0.0492912],
        [-0.0085287, 0.0400428, 0.9684867],
    ]),
};

/// Converts an xy chromaticity to XYZ with Y = 1.
///
/// A chromaticity with `y == 0` has no finite XYZ and maps to zero.
#[inline]
pub fn xy_to_xyz(x: f32, y: f32) -> Vec3 {
    if y.abs() < 1e-10 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// XYZ matrix adapting colors seen under `src_white` to `dst_white`.
///
/// Identical white points give the identity.
pub fn adapt_matrix(cone: &ConeResponse, src_white: Vec3, dst_white: Vec3) -> Mat3 {
    let src = cone.forward * src_white;
    let dst = cone.forward * dst_white;
    let scale = Mat3::diagonal(dst.x / src.x, dst.y / src.y, dst.z / src.z);
    cone.inverse * scale * cone.forward
}
