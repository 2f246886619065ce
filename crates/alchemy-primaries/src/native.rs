//! Camera native RGB to the ProPhoto reference.
//!
//! The decoder supplies camera RGB -> XYZ relative to some white (D65 for
//! DNG forward matrices). ProPhoto is D50, so the chain is
//!
//! ```text
//! native -> XYZ(camera white) -> Bradford -> XYZ(D50) -> ProPhoto
//! ```

use crate::primaries::{PROPHOTO_RGB, rgb_to_xyz_dmat3};
use alchemy_core::{CameraMetadata, Error, Result};
use alchemy_math::{BRADFORD, Mat3, Vec3, adapt_matrix, xy_to_xyz};

fn camera_to_d50_xyz(meta: &CameraMetadata) -> Result<Mat3> {
    let cam_to_xyz = meta.require_color_matrix()?;
    let (x, y) = meta.matrix_white;
    let white = xy_to_xyz(x, y);
    if white == Vec3::ZERO || !white.is_finite() {
        return Err(Error::InvalidMetadata(format!("matrix white ({x}, {y}) is not a chromaticity")));
    }
    let cat = adapt_matrix(&BRADFORD, white, PROPHOTO_RGB.white_xyz());
    Ok(Mat3::from_dmat3(cat.to_dmat3() * cam_to_xyz.to_dmat3()))
}

/// Native camera RGB to ProPhoto RGB linear, with its inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeTransform {
    /// Camera native to ProPhoto linear.
    pub to_reference: Mat3,
    /// ProPhoto linear back to camera native.
    pub from_reference: Mat3,
}

/// Derives the native to ProPhoto matrix pair for one image.
///
/// # Errors
///
/// [`Error::MissingColorMatrix`] if the metadata has no usable or invertible
/// matrix.
pub fn native_to_reference(meta: &CameraMetadata) -> Result<NativeTransform> {
    let to_xyz = camera_to_d50_xyz(meta)?.to_dmat3();
    let xyz_to_prophoto = rgb_to_xyz_dmat3(&PROPHOTO_RGB)
        .map(|m| m.inverse())
        .ok_or_else(|| Error::InvalidMetadata("ProPhoto primaries are degenerate".into()))?;
    let forward = xyz_to_prophoto * to_xyz;
    if forward.determinant().abs() < 1e-12 {
        return Err(Error::MissingColorMatrix("camera matrix is singular".into()));
    }
    let to_reference = Mat3::from_dmat3(forward);
    let from_reference = Mat3::from_dmat3(forward.inverse());
    if !(to_reference.is_finite() && from_reference.is_finite()) {
        return Err(Error::MissingColorMatrix("native to reference matrix is not finite".into()));
    }
    Ok(NativeTransform {
        to_reference,
        from_reference,
    })
}

/// Weights giving CIE Y from native camera RGB.
///
/// This is the Y row of the decoder's camera to XYZ matrix, before any
/// white point adaptation; the exposure meter uses it to measure luminance
/// ahead of the gamut transform.
pub fn luminance_weights(meta: &CameraMetadata) -> Result<Vec3> {
    Ok(meta.require_color_matrix()?.row(1))
}
