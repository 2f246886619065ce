//! Color triplet type.
//!
//! [`Vec3`] carries RGB or XYZ values between matrix stages. For RGB
//! `x`, `y`, `z` are R, G, B; for XYZ they are X, Y, Z.

use std::ops::{Add, Index, Mul, Sub};

/// A three-component color vector.
///
/// ```rust
/// use alchemy_math::Vec3;
///
/// let rgb = Vec3::new(0.5, 0.25, 1.0);
/// assert_eq!(rgb[2], 1.0);
/// assert_eq!(rgb.to_array(), [0.5, 0.25, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Vec3 {
    /// R or X
    pub x: f32,
    /// G or Y
    pub y: f32,
    /// B or Z
    pub z: f32,
}

impl Vec3 {
    /// (0, 0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// (1, 1, 1)
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// From an `[r, g, b]` array.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// To an `[r, g, b]` array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product. With luma coefficients this is the weighted luminance.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Sum of the components.
    #[inline]
    pub fn sum(self) -> f32 {
        self.x + self.y + self.z
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Widens to a [`glam::DVec3`].
    #[inline]
    pub fn to_dvec3(self) -> glam::DVec3 {
        glam::DVec3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Narrows a [`glam::DVec3`].
    #[inline]
    pub fn from_dvec3(v: glam::DVec3) -> Self {
        Self::new(v.x as f32, v.y as f32, v.z as f32)
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of range: {i}"),
        }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(a: [f32; 3]) -> Self {
        Self::from_array(a)
    }
}
