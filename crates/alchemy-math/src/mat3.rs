//! 3x3 matrix type for gamut transforms.
//!
//! # Convention
//!
//! Row-major storage, column vectors:
//!
//! ```text
//! | m00 m01 m02 |   | r |   | m00*r + m01*g + m02*b |
//! | m10 m11 m12 | * | g | = | m10*r + m11*g + m12*b |
//! | m20 m21 m22 |   | b |   | m20*r + m21*g + m22*b |
//! ```
//!
//! Composition reads right to left: `(b * a) * v` applies `a` first.

use crate::Vec3;
use std::ops::{Index, Mul};

/// A 3x3 matrix.
///
/// ```rust
/// use alchemy_math::{Mat3, Vec3};
///
/// let v = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(Mat3::IDENTITY * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Elements as `[row0, row1, row2]`
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub const fn from_cols(cols: [[f32; 3]; 3]) -> Self {
        Self {
            m: [
                [cols[0][0], cols[1][0], cols[2][0]],
                [cols[0][1], cols[1][1], cols[2][1]],
                [cols[0][2], cols[1][2], cols[2][2]],
            ],
        }
    }

    /// Diagonal (per-channel scale) matrix.
    #[inline]
    pub const fn diagonal(d0: f32, d1: f32, d2: f32) -> Self {
        Self::from_rows([[d0, 0.0, 0.0], [0.0, d1, 0.0], [0.0, 0.0, d2]])
    }

    /// Row `i` as a vector. The Y row of an RGB->XYZ matrix gives luminance weights.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::from_array(self.m[i])
    }

    /// Transpose.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.m)
    }

    /// Determinant.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse, computed in double precision.
    ///
    /// Returns `None` for singular or non-finite matrices.
    ///
    /// ```rust
    /// use alchemy_math::Mat3;
    ///
    /// let m = Mat3::diagonal(2.0, 4.0, 8.0);
    /// assert_eq!(m.inverse(), Some(Mat3::diagonal(0.5, 0.25, 0.125)));
    /// assert!(Mat3::ZERO.inverse().is_none());
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let d = self.to_dmat3();
        let det = d.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return None;
        }
        let inv = Self::from_dmat3(d.inverse());
        inv.is_finite().then_some(inv)
    }

    /// Applies the matrix to a vector.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }

    /// Applies the matrix to an interleaved `[r, g, b]` pixel.
    #[inline]
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.transform(Vec3::from_array(rgb)).to_array()
    }

    /// Matrix product `self * other`.
    #[inline]
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut out = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        out
    }

    /// True if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// True if every element is within `eps` of the identity.
    pub fn is_identity(&self, eps: f32) -> bool {
        (0..3).all(|i| {
            (0..3).all(|j| {
                let expected = if i == j { 1.0 } else { 0.0 };
                (self.m[i][j] - expected).abs() <= eps
            })
        })
    }

    /// Widens to a column-major [`glam::DMat3`].
    #[inline]
    pub fn to_dmat3(&self) -> glam::DMat3 {
        let c = |j: usize| {
            glam::DVec3::new(self.m[0][j] as f64, self.m[1][j] as f64, self.m[2][j] as f64)
        };
        glam::DMat3::from_cols(c(0), c(1), c(2))
    }

    /// Narrows a column-major [`glam::DMat3`].
    #[inline]
    pub fn from_dmat3(m: glam::DMat3) -> Self {
        let cols = m.to_cols_array_2d();
        let narrow = |c: [f64; 3]| [c[0] as f32, c[1] as f32, c[2] as f32];
        Self::from_cols([narrow(cols[0]), narrow(cols[1]), narrow(cols[2])])
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Index<usize> for Mat3 {
    type Output = [f32; 3];

    #[inline]
    fn index(&self, i: usize) -> &[f32; 3] {
        &self.m[i]
    }
}
