//! 3-dimensional lookup table.

use crate::{LutError, LutResult};
use alchemy_math::{inverse_lerp, lerp};

/// Grid positions within this many ulps of a node snap onto it, so node
/// coordinates that picked up rounding in the domain mapping return the node
/// value unchanged. Anything further off is interpolated.
const NODE_SNAP_ULPS: f32 = 4.0;

/// A 3D LUT.
///
/// # Structure
///
/// - `size^3` RGB entries
/// - red varies fastest, then green, then blue (the `.cube` file order):
///   `index = r + g * size + b * size^2`
/// - each axis covers `[domain_min, domain_max]`
///
/// # Example
///
/// ```rust
/// use alchemy_lut::Lut3D;
///
/// let lut = Lut3D::identity(17);
/// let out = lut.apply([0.5, 0.25, 1.0]);
/// assert!((out[0] - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    data: Vec<[f32; 3]>,
    size: usize,
    domain_min: [f32; 3],
    domain_max: [f32; 3],
}

impl Lut3D {
    /// Identity cube of the given size.
    ///
    /// # Panics
    ///
    /// If `size < 2`.
    pub fn identity(size: usize) -> Self {
        assert!(size >= 2, "LUT size must be at least 2");
        let n = (size - 1) as f32;
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push([r as f32 / n, g as f32 / n, b as f32 / n]);
                }
            }
        }
        Self {
            data,
            size,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
        }
    }

    /// Builds a cube from red-fastest data.
    ///
    /// # Errors
    ///
    /// [`LutError::Invalid`] if `size < 2` or `data.len() != size^3`.
    pub fn from_data(data: Vec<[f32; 3]>, size: usize) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::invalid(format!("size {size} is below the minimum of 2")));
        }
        let expected = size
            .checked_pow(3)
            .ok_or_else(|| LutError::invalid(format!("size {size} overflows")))?;
        if data.len() != expected {
            return Err(LutError::invalid(format!(
                "expected {} entries for size {}, found {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self {
            data,
            size,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
        })
    }

    /// Sets the input domain.
    ///
    /// # Errors
    ///
    /// [`LutError::Invalid`] unless `min < max` on every axis and both are finite.
    pub fn with_domain(mut self, min: [f32; 3], max: [f32; 3]) -> LutResult<Self> {
        for c in 0..3 {
            if !(min[c].is_finite() && max[c].is_finite()) || min[c] >= max[c] {
                return Err(LutError::invalid(format!(
                    "domain axis {c}: min {} must be below max {}",
                    min[c], max[c]
                )));
            }
        }
        self.domain_min = min;
        self.domain_max = max;
        Ok(self)
    }

    /// Grid points per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Domain lower bound per axis.
    #[inline]
    pub fn domain_min(&self) -> [f32; 3] {
        self.domain_min
    }

    /// Domain upper bound per axis.
    #[inline]
    pub fn domain_max(&self) -> [f32; 3] {
        self.domain_max
    }

    /// Node value at grid position `(r, g, b)`.
    #[inline]
    pub fn node(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.data[r + g * self.size + b * self.size * self.size]
    }

    /// Input coordinate of grid index `i` on `axis`.
    pub fn node_coordinate(&self, axis: usize, i: usize) -> f32 {
        let t = i as f32 / (self.size - 1) as f32;
        lerp(self.domain_min[axis], self.domain_max[axis], t)
    }

    /// Samples the cube with trilinear interpolation.
    ///
    /// Each channel is clamped to the domain first; out-of-domain input is
    /// never extrapolated. NaN input is treated as the domain minimum.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let (ri, rf) = self.locate(0, rgb[0]);
        let (gi, gf) = self.locate(1, rgb[1]);
        let (bi, bf) = self.locate(2, rgb[2]);

        let c000 = self.node(ri, gi, bi);
        let c100 = self.node(ri + 1, gi, bi);
        let c010 = self.node(ri, gi + 1, bi);
        let c110 = self.node(ri + 1, gi + 1, bi);
        let c001 = self.node(ri, gi, bi + 1);
        let c101 = self.node(ri + 1, gi, bi + 1);
        let c011 = self.node(ri, gi + 1, bi + 1);
        let c111 = self.node(ri + 1, gi + 1, bi + 1);

        let mut out = [0.0f32; 3];
        for i in 0..3 {
            // red, then green, then blue
            let c00 = blend(c000[i], c100[i], rf);
            let c10 = blend(c010[i], c110[i], rf);
            let c01 = blend(c001[i], c101[i], rf);
            let c11 = blend(c011[i], c111[i], rf);

            let c0 = blend(c00, c10, gf);
            let c1 = blend(c01, c11, gf);

            out[i] = blend(c0, c1, bf);
        }
        out
    }

    /// Lower cell index and fraction along one axis.
    #[inline]
    fn locate(&self, axis: usize, v: f32) -> (usize, f32) {
        let n = (self.size - 1) as f32;
        let t = inverse_lerp(self.domain_min[axis], self.domain_max[axis], v);
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mut pos = t * n;
        let nearest = pos.round();
        if (pos - nearest).abs() <= NODE_SNAP_ULPS * f32::EPSILON * nearest.max(1.0) {
            pos = nearest;
        }
        let i = (pos.floor() as usize).min(self.size - 2);
        (i, pos - i as f32)
    }
}

/// `a * (1 - t) + b * t`; exact at `t = 0` and `t = 1`.
#[inline]
fn blend(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
