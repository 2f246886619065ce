//! ProPhoto reference to Log gamut matrices.

use crate::primaries::*;
use alchemy_math::{BRADFORD, Mat3, adapt_matrix};
use alchemy_transfer::LogSpace;
use std::sync::OnceLock;
use tracing::debug;

/// A Log gamut and its matrices against the ProPhoto linear reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamutDescriptor {
    /// Gamut name, e.g. `F-Gamut`.
    pub name: &'static str,
    /// Chromaticities.
    pub primaries: Primaries,
    /// ProPhoto linear to gamut linear (Bradford D50 -> gamut white).
    pub from_reference: Mat3,
    /// Gamut linear to ProPhoto linear.
    pub to_reference: Mat3,
}

impl GamutDescriptor {
    /// Builds the matrix pair, or `None` if either side is singular.
    pub fn new(primaries: Primaries) -> Option<Self> {
        let reference = rgb_to_xyz_dmat3(&PROPHOTO_RGB)?;
        let target = rgb_to_xyz_dmat3(&primaries)?;
        let cat = adapt_matrix(&BRADFORD, PROPHOTO_RGB.white_xyz(), primaries.white_xyz()).to_dmat3();

        let forward = target.inverse() * cat * reference;
        if forward.determinant().abs() < 1e-12 {
            return None;
        }
        let from_reference = Mat3::from_dmat3(forward);
        let to_reference = Mat3::from_dmat3(forward.inverse());
        (from_reference.is_finite() && to_reference.is_finite()).then_some(Self {
            name: primaries.name,
            primaries,
            from_reference,
            to_reference,
        })
    }
}

/// Primaries paired with each Log space.
pub fn primaries_for(space: LogSpace) -> Primaries {
    match space {
        LogSpace::FLog | LogSpace::FLog2 => F_GAMUT,
        LogSpace::FLog2C => F_GAMUT_C,
        LogSpace::VLog => V_GAMUT,
        LogSpace::NLog => N_GAMUT,
        LogSpace::CanonLog2 | LogSpace::CanonLog3 => CINEMA_GAMUT,
        LogSpace::SLog3 => S_GAMUT3,
        LogSpace::SLog3Cine => S_GAMUT3_CINE,
        LogSpace::LogC3 => ARRI_WIDE_GAMUT_3,
        LogSpace::LogC4 => ARRI_WIDE_GAMUT_4,
        LogSpace::Log3G10 => RED_WIDE_GAMUT,
        LogSpace::DLog => D_GAMUT,
        LogSpace::LLog => L_GAMUT,
    }
}

/// Process-wide table of gamut descriptors, one per [`LogSpace`].
#[derive(Debug)]
pub struct GamutRegistry {
    entries: Vec<(LogSpace, Option<GamutDescriptor>)>,
}

impl GamutRegistry {
    /// The shared registry, built on first call.
    pub fn global() -> &'static GamutRegistry {
        static INSTANCE: OnceLock<GamutRegistry> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let entries: Vec<_> = LogSpace::ALL
                .into_iter()
                .map(|space| (space, GamutDescriptor::new(primaries_for(space))))
                .collect();
            debug!(gamuts = entries.len(), "gamut registry initialized");
            GamutRegistry { entries }
        })
    }

    /// Descriptor for a space. `None` only if its primaries were degenerate.
    pub fn get(&self, space: LogSpace) -> Option<&GamutDescriptor> {
        self.entries
            .iter()
            .find(|(s, _)| *s == space)
            .and_then(|(_, d)| d.as_ref())
    }
}

/// Shorthand for `GamutRegistry::global().get(space)`.
pub fn gamut_for(space: LogSpace) -> Option<&'static GamutDescriptor> {
    GamutRegistry::global().get(space)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alchemy_math::Vec3;
    use approx::assert_abs_diff_eq;

    #[test]
    fn every_space_has_an_invertible_gamut() {
        for space in LogSpace::ALL {
            let g = gamut_for(space).unwrap_or_else(|| panic!("{space} has no gamut"));
            assert!((g.to_reference * g.from_reference).is_identity(1e-4), "{space}");
            assert!((g.from_reference * g.to_reference).is_identity(1e-4), "{space}");
        }
    }

    #[test]
    fn neutral_axis_is_preserved() {
        for space in LogSpace::ALL {
            let g = gamut_for(space).unwrap();
            let w = g.from_reference * Vec3::splat(0.18);
            assert_abs_diff_eq!(w.x, 0.18, epsilon = 1e-4);
            assert_abs_diff_eq!(w.y, 0.18, epsilon = 1e-4);
            assert_abs_diff_eq!(w.z, 0.18, epsilon = 1e-4);
        }
    }

    #[test]
    fn shared_primaries_share_names() {
        assert_eq!(gamut_for(LogSpace::FLog).unwrap().name, "F-Gamut");
        assert_eq!(gamut_for(LogSpace::FLog2C).unwrap().name, "F-Gamut C");
        assert_eq!(gamut_for(LogSpace::CanonLog2).unwrap().name, "Cinema Gamut");
        assert_eq!(gamut_for(LogSpace::LogC4).unwrap().name, "ARRI Wide Gamut 4");
    }
}
