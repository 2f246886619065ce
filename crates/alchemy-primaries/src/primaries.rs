//! Primaries table and RGB to XYZ matrix construction.

use alchemy_math::{Mat3, Vec3, xy_to_xyz};
use glam::{DMat3, DVec3};

/// An RGB space defined by xy chromaticities of its primaries and white.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red (x, y)
    pub r: (f32, f32),
    /// Green (x, y)
    pub g: (f32, f32),
    /// Blue (x, y)
    pub b: (f32, f32),
    /// White (x, y)
    pub w: (f32, f32),
    /// Display name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ with Y = 1.
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

/// D65 chromaticity.
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// D50 chromaticity.
pub const D50_XY: (f32, f32) = (0.34567, 0.35850);

/// ProPhoto RGB, the pipeline's linear reference.
pub const PROPHOTO_RGB: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.1596, 0.8404),
    b: (0.0366, 0.0001),
    w: D50_XY,
    name: "ProPhoto RGB",
};

/// Rec.2020 primaries; F-Gamut, N-Gamut and L-Gamut are defined on them.
pub const REC2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "Rec.2020",
};

/// Fujifilm F-Gamut.
pub const F_GAMUT: Primaries = Primaries {
    name: "F-Gamut",
    ..REC2020
};

/// Fujifilm F-Gamut C.
pub const F_GAMUT_C: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.0263, 0.9737),
    b: (0.1173, -0.0224),
    w: D65_XY,
    name: "F-Gamut C",
};

/// Nikon N-Gamut.
pub const N_GAMUT: Primaries = Primaries {
    name: "N-Gamut",
    ..REC2020
};

/// Leica L-Gamut.
pub const L_GAMUT: Primaries = Primaries {
    name: "L-Gamut",
    ..REC2020
};

/// Panasonic V-Gamut.
pub const V_GAMUT: Primaries = Primaries {
    r: (0.7300, 0.2800),
    g: (0.1650, 0.8400),
    b: (0.1000, -0.0300),
    w: D65_XY,
    name: "V-Gamut",
};

/// Canon Cinema Gamut.
pub const CINEMA_GAMUT: Primaries = Primaries {
    r: (0.7400, 0.2700),
    g: (0.1700, 1.1400),
    b: (0.0800, -0.1000),
    w: D65_XY,
    name: "Cinema Gamut",
};

/// Sony S-Gamut3.
pub const S_GAMUT3: Primaries = Primaries {
    r: (0.7300, 0.2800),
    g: (0.1400, 0.8550),
    b: (0.1000, -0.0500),
    w: D65_XY,
    name: "S-Gamut3",
};

/// Sony S-Gamut3.Cine.
pub const S_GAMUT3_CINE: Primaries = Primaries {
    r: (0.7660, 0.2750),
    g: (0.2250, 0.8000),
    b: (0.0890, -0.0870),
    w: D65_XY,
    name: "S-Gamut3.Cine",
};

/// ARRI ALEXA Wide Gamut 3.
pub const ARRI_WIDE_GAMUT_3: Primaries = Primaries {
    r: (0.6840, 0.3130),
    g: (0.2210, 0.8480),
    b: (0.0861, -0.1020),
    w: D65_XY,
    name: "ARRI Wide Gamut 3",
};

/// ARRI ALEXA Wide Gamut 4.
pub const ARRI_WIDE_GAMUT_4: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.1424, 0.8576),
    b: (0.0991, -0.0308),
    w: D65_XY,
    name: "ARRI Wide Gamut 4",
};

/// REDWideGamutRGB.
pub const RED_WIDE_GAMUT: Primaries = Primaries {
    r: (0.780308, 0.304253),
    g: (0.121595, 1.493994),
    b: (0.095612, -0.084589),
    w: D65_XY,
    name: "REDWideGamutRGB",
};

/// DJI D-Gamut.
pub const D_GAMUT: Primaries = Primaries {
    r: (0.7100, 0.3100),
    g: (0.2100, 0.8800),
    b: (0.0900, -0.0800),
    w: D65_XY,
    name: "D-Gamut",
};

fn xy_to_dxyz(xy: (f32, f32)) -> DVec3 {
    let (x, y) = (xy.0 as f64, xy.1 as f64);
    DVec3::new(x / y, 1.0, (1.0 - x - y) / y)
}

/// RGB to XYZ in double precision; `None` for degenerate primaries.
pub(crate) fn rgb_to_xyz_dmat3(p: &Primaries) -> Option<DMat3> {
    if [p.r.1, p.g.1, p.b.1, p.w.1].iter().any(|y| y.abs() < 1e-10) {
        return None;
    }
    let prims = DMat3::from_cols(xy_to_dxyz(p.r), xy_to_dxyz(p.g), xy_to_dxyz(p.b));
    if prims.determinant().abs() < 1e-12 {
        return None;
    }
    // scale columns so RGB (1,1,1) lands on the white point
    let s = prims.inverse() * xy_to_dxyz(p.w);
    Some(DMat3::from_cols(
        prims.x_axis * s.x,
        prims.y_axis * s.y,
        prims.z_axis * s.z,
    ))
}

/// The standard primaries-to-matrix construction: linear RGB to CIE XYZ
/// relative to the space's own white.
///
/// Returns `None` if the primaries are collinear or a chromaticity has `y = 0`.
///
/// ```rust
/// use alchemy_primaries::{PROPHOTO_RGB, rgb_to_xyz_matrix};
/// use alchemy_math::Vec3;
///
/// let m = rgb_to_xyz_matrix(&PROPHOTO_RGB).unwrap();
/// let white = m * Vec3::ONE;
/// assert!((white.y - 1.0).abs() < 1e-6);
/// ```
pub fn rgb_to_xyz_matrix(p: &Primaries) -> Option<Mat3> {
    rgb_to_xyz_dmat3(p).map(Mat3::from_dmat3)
}

/// CIE XYZ to linear RGB; inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(p: &Primaries) -> Option<Mat3> {
    rgb_to_xyz_dmat3(p).map(|m| Mat3::from_dmat3(m.inverse()))
}
