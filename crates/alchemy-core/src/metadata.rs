//! Camera metadata supplied by the RAW decoder.
//!
//! The decoder hands over, once per image, everything the colorimetric
//! stages need to interpret the sensor values: the camera-to-XYZ matrix,
//! the as-shot white balance multipliers and the sensor black/white levels.
//! The pipeline only reads it.

use crate::{Error, Result};
use alchemy_math::Mat3;

/// Sensor black and white levels, per channel, in the decoder's units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorLevels {
    /// Black level per channel.
    pub black: [f32; 3],
    /// Saturation (white) level per channel.
    pub white: [f32; 3],
}

impl SensorLevels {
    /// Levels of a buffer already scaled to `[0, 1]`.
    pub const fn normalized() -> Self {
        Self {
            black: [0.0; 3],
            white: [1.0; 3],
        }
    }

    /// Levels for an integer sensor of `bits` depth with a common black level.
    pub fn from_bit_depth(bits: u8, black: f32) -> Self {
        let white = ((1u64 << bits.min(32)) - 1) as f32;
        Self {
            black: [black; 3],
            white: [white; 3],
        }
    }

    /// True when normalization would leave values unchanged.
    pub fn is_normalized(&self) -> bool {
        self.black == [0.0; 3] && self.white == [1.0; 3]
    }
}

impl Default for SensorLevels {
    fn default() -> Self {
        Self::normalized()
    }
}

/// Per-image camera facts.
///
/// # Example
///
/// ```rust
/// use alchemy_core::CameraMetadata;
/// use alchemy_math::Mat3;
///
/// let meta = CameraMetadata::new(Mat3::IDENTITY).with_wb_multipliers([2.0, 1.0, 1.5]);
/// assert_eq!(meta.normalized_wb(), [2.0, 1.0, 1.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CameraMetadata {
    /// Camera native RGB to CIE XYZ. `None` when the decoder could not supply one.
    pub color_matrix: Option<Mat3>,
    /// Chromaticity of the white the matrix is referenced to. D65 for DNG
    /// style forward matrices.
    pub matrix_white: (f32, f32),
    /// As-shot white balance multipliers, R G B.
    pub wb_multipliers: [f32; 3],
    /// Black/white levels.
    pub levels: SensorLevels,
    /// Sensor bit depth.
    pub bit_depth: u8,
    /// Lens identifier read from EXIF, handed to the lens collaborator.
    pub lens_model: Option<String>,
}

impl CameraMetadata {
    /// Metadata for an already normalized, white balanced buffer.
    pub fn new(color_matrix: Mat3) -> Self {
        Self {
            color_matrix: Some(color_matrix),
            ..Self::without_matrix()
        }
    }

    /// Metadata with no color matrix; processing it fails with
    /// [`Error::MissingColorMatrix`].
    pub fn without_matrix() -> Self {
        Self {
            color_matrix: None,
            matrix_white: (0.3127, 0.3290),
            wb_multipliers: [1.0; 3],
            levels: SensorLevels::normalized(),
            bit_depth: 16,
            lens_model: None,
        }
    }

    /// Builds from a dcraw-style XYZ-to-camera matrix.
    ///
    /// Each row is scaled to sum to one before inversion, so that camera
    /// white maps to the reference white.
    pub fn from_xyz_to_camera(xyz_to_cam: Mat3) -> Result<Self> {
        let mut m = xyz_to_cam;
        for row in m.m.iter_mut() {
            let sum: f32 = row.iter().sum();
            if sum.abs() < 1e-8 || !sum.is_finite() {
                return Err(Error::MissingColorMatrix("XYZ-to-camera row sums to zero".into()));
            }
            row.iter_mut().for_each(|v| *v /= sum);
        }
        let cam_to_xyz = m
            .inverse()
            .ok_or_else(|| Error::MissingColorMatrix("XYZ-to-camera matrix is singular".into()))?;
        Ok(Self::new(cam_to_xyz))
    }

    /// Sets the as-shot white balance multipliers.
    pub fn with_wb_multipliers(mut self, wb: [f32; 3]) -> Self {
        self.wb_multipliers = wb;
        self
    }

    /// Sets the sensor levels.
    pub fn with_levels(mut self, levels: SensorLevels) -> Self {
        self.levels = levels;
        self
    }

    /// Sets the reference white of the color matrix.
    pub fn with_matrix_white(mut self, xy: (f32, f32)) -> Self {
        self.matrix_white = xy;
        self
    }

    /// Sets the lens identifier.
    pub fn with_lens_model(mut self, lens: impl Into<String>) -> Self {
        self.lens_model = Some(lens.into());
        self
    }

    /// The camera matrix, or [`Error::MissingColorMatrix`].
    pub fn require_color_matrix(&self) -> Result<Mat3> {
        match self.color_matrix {
            Some(m) if m.is_finite() && m.inverse().is_some() => Ok(m),
            Some(_) => Err(Error::MissingColorMatrix(
                "camera matrix is singular or non-finite".into(),
            )),
            None => Err(Error::MissingColorMatrix("decoder supplied no matrix".into())),
        }
    }

    /// White balance multipliers scaled so green is 1.
    pub fn normalized_wb(&self) -> [f32; 3] {
        let g = self.wb_multipliers[1];
        if g == 0.0 || !g.is_finite() {
            return self.wb_multipliers;
        }
        self.wb_multipliers.map(|m| m / g)
    }

    /// Checks levels and multipliers are usable.
    pub fn validate(&self) -> Result<()> {
        for c in 0..3 {
            let (b, w) = (self.levels.black[c], self.levels.white[c]);
            if !(b.is_finite() && w.is_finite()) || w <= b {
                return Err(Error::InvalidMetadata(format!(
                    "channel {c}: white level {w} must exceed black level {b}"
                )));
            }
        }
        if self.wb_multipliers.iter().any(|m| !m.is_finite() || *m <= 0.0) {
            return Err(Error::InvalidMetadata(format!(
                "white balance multipliers must be positive: {:?}",
                self.wb_multipliers
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_matrix_is_reported() {
        let err = CameraMetadata::without_matrix().require_color_matrix().unwrap_err();
        assert!(matches!(err, Error::MissingColorMatrix(_)));
    }

    #[test]
    fn singular_matrix_is_reported() {
        let meta = CameraMetadata::new(Mat3::ZERO);
        assert!(meta.require_color_matrix().is_err());
    }

    #[test]
    fn wb_normalized_to_green() {
        let meta = CameraMetadata::new(Mat3::IDENTITY).with_wb_multipliers([2.2, 1.1, 1.65]);
        let wb = meta.normalized_wb();
        assert!((wb[0] - 2.0).abs() < 1e-6);
        assert_eq!(wb[1], 1.0);
        assert!((wb[2] - 1.5).abs() < 1e-6);
    }

    #[test]
    fn levels_validation() {
        let bad = CameraMetadata::new(Mat3::IDENTITY).with_levels(SensorLevels {
            black: [512.0; 3],
            white: [512.0; 3],
        });
        assert!(matches!(bad.validate(), Err(Error::InvalidMetadata(_))));
        let good = CameraMetadata::new(Mat3::IDENTITY)
            .with_levels(SensorLevels::from_bit_depth(14, 512.0));
        assert!(good.validate().is_ok());
        assert_eq!(good.levels.white[0], 16383.0);
    }

    #[test]
    fn xyz_to_camera_rows_are_normalized() {
        let meta = CameraMetadata::from_xyz_to_camera(Mat3::diagonal(2.0, 4.0, 8.0)).unwrap();
        assert!(meta.color_matrix.unwrap().is_identity(1e-6));
    }
}
