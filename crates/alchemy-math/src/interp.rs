//! Scalar interpolation helpers.

/// Linear interpolation between `a` and `b`.
///
/// `t` outside `[0, 1]` extrapolates, which the saturation operator relies on.
///
/// ```rust
/// use alchemy_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(2.0, 4.0, 1.5), 5.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `value` within `[a, b]` as a fraction.
///
/// Returns `0.0` for a degenerate range.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < 1e-10 {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Clamps to `[0, 1]`; NaN maps to 0.
#[inline]
pub fn saturate(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_are_exact() {
        assert_eq!(lerp(0.25, 0.75, 0.0), 0.25);
        assert_eq!(lerp(0.25, 0.75, 1.0), 0.75);
    }

    #[test]
    fn inverse_lerp_degenerate_range() {
        assert_eq!(inverse_lerp(1.0, 1.0, 3.0), 0.0);
        assert_eq!(inverse_lerp(-1.0, 1.0, 0.0), 0.5);
    }

    #[test]
    fn saturate_handles_nan() {
        assert_eq!(saturate(f32::NAN), 0.0);
        assert_eq!(saturate(1.5), 1.0);
        assert_eq!(saturate(-0.5), 0.0);
    }
}
