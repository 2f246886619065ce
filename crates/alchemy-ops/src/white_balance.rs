//! Temperature/tint white balance correction in linear light.

/// Relative white balance shift on top of the as-shot multipliers.
///
/// Both controls are in hundredths of a stop on the red/blue channels:
///
/// ```text
/// R *= 2^(( temperature + tint) / 100)
/// B *= 2^((-temperature + tint) / 100)
/// ```
///
/// Positive temperature warms (more red, less blue); positive tint moves
/// toward magenta. Green is the reference and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WhiteBalance {
    /// Warm/cool shift.
    pub temperature: f32,
    /// Magenta/green shift.
    pub tint: f32,
}

impl WhiteBalance {
    /// Creates a correction.
    pub fn new(temperature: f32, tint: f32) -> Self {
        Self { temperature, tint }
    }

    /// True when both controls are zero.
    pub fn is_identity(&self) -> bool {
        self.temperature == 0.0 && self.tint == 0.0
    }

    /// Per-channel multipliers.
    pub fn multipliers(&self) -> [f32; 3] {
        let r = ((self.temperature + self.tint) / 100.0).exp2();
        let b = ((-self.temperature + self.tint) / 100.0).exp2();
        [r, 1.0, b]
    }

    /// Applies to one linear RGB pixel.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        if self.is_identity() {
            return rgb;
        }
        let [mr, _, mb] = self.multipliers();
        [rgb[0] * mr, rgb[1], rgb[2] * mb]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_is_identity() {
        let px = [0.123_456, 0.7, 1e-7];
        assert_eq!(WhiteBalance::default().apply(px), px);
        assert_eq!(WhiteBalance::default().multipliers(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn warm_shift_moves_red_and_blue_apart() {
        let m = WhiteBalance::new(100.0, 0.0).multipliers();
        assert_abs_diff_eq!(m[0], 2.0, epsilon = 1e-6);
        assert_eq!(m[1], 1.0);
        assert_abs_diff_eq!(m[2], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn tint_moves_red_and_blue_together() {
        let m = WhiteBalance::new(0.0, 50.0).multipliers();
        assert_abs_diff_eq!(m[0], m[2], epsilon = 1e-7);
        assert!(m[0] > 1.0);
    }
}
