//! Named Log spaces and the process-wide curve table.
//!
//! The table is built once on first use from the constants in the curve
//! modules (a few join values need `log10`, so it cannot be `const`) and is
//! never mutated afterwards. Lookups return `&'static` data, safe to share
//! across any number of concurrent pipeline runs.

use crate::camera_log::{self, CameraLog};
use crate::canon_log::{self, CanonLog};
use crate::n_log::NLog;
use crate::{LogCurve, TransferError, TransferResult};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// A supported camera Log space (curve plus its paired gamut).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSpace {
    /// Fujifilm F-Log / F-Gamut.
    FLog,
    /// Fujifilm F-Log2 / F-Gamut.
    FLog2,
    /// Fujifilm F-Log2 / F-Gamut C.
    FLog2C,
    /// Panasonic V-Log / V-Gamut.
    VLog,
    /// Nikon N-Log / N-Gamut.
    NLog,
    /// Canon Log 2 / Cinema Gamut.
    CanonLog2,
    /// Canon Log 3 / Cinema Gamut.
    CanonLog3,
    /// Sony S-Log3 / S-Gamut3.
    SLog3,
    /// Sony S-Log3 / S-Gamut3.Cine.
    SLog3Cine,
    /// ARRI LogC3 / ALEXA Wide Gamut 3.
    LogC3,
    /// ARRI LogC4 / ALEXA Wide Gamut 4.
    LogC4,
    /// RED Log3G10 / REDWideGamutRGB.
    Log3G10,
    /// DJI D-Log / D-Gamut.
    DLog,
    /// Leica L-Log / L-Gamut.
    LLog,
}

impl LogSpace {
    /// Every supported space, in registry order.
    pub const ALL: [LogSpace; 14] = [
        Self::FLog,
        Self::FLog2,
        Self::FLog2C,
        Self::VLog,
        Self::NLog,
        Self::CanonLog2,
        Self::CanonLog3,
        Self::SLog3,
        Self::SLog3Cine,
        Self::LogC3,
        Self::LogC4,
        Self::Log3G10,
        Self::DLog,
        Self::LLog,
    ];

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FLog => "F-Log",
            Self::FLog2 => "F-Log2",
            Self::FLog2C => "F-Log2C",
            Self::VLog => "V-Log",
            Self::NLog => "N-Log",
            Self::CanonLog2 => "Canon Log 2",
            Self::CanonLog3 => "Canon Log 3",
            Self::SLog3 => "S-Log3",
            Self::SLog3Cine => "S-Log3.Cine",
            Self::LogC3 => "LogC3",
            Self::LogC4 => "LogC4",
            Self::Log3G10 => "Log3G10",
            Self::DLog => "D-Log",
            Self::LLog => "L-Log",
        }
    }

    /// Name of the transfer curve alone (gamut variants share a curve).
    pub const fn curve_name(self) -> &'static str {
        match self {
            Self::FLog2C => "F-Log2",
            Self::SLog3Cine => "S-Log3",
            other => other.name(),
        }
    }

    /// The curve, from the global registry.
    pub fn curve(self) -> &'static LogCurve {
        LogRegistry::global().curve(self)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LogSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogSpace {
    type Err = TransferError;

    /// Case-insensitive; spaces, dashes, underscores and dots are ignored.
    ///
    /// ```rust
    /// use alchemy_transfer::LogSpace;
    ///
    /// assert_eq!("s-log3.cine".parse::<LogSpace>().unwrap(), LogSpace::SLog3Cine);
    /// assert_eq!("CLog3".parse::<LogSpace>().unwrap(), LogSpace::CanonLog3);
    /// assert!("Rec709".parse::<LogSpace>().is_err());
    /// ```
    fn from_str(s: &str) -> TransferResult<Self> {
        let key = normalize(s);
        if let Some(space) = Self::ALL.into_iter().find(|sp| normalize(sp.name()) == key) {
            return Ok(space);
        }
        match key.as_str() {
            "clog2" => Ok(Self::CanonLog2),
            "clog3" => Ok(Self::CanonLog3),
            "logc" | "arrilogc3" => Ok(Self::LogC3),
            "arrilogc4" => Ok(Self::LogC4),
            "redlog3g10" => Ok(Self::Log3G10),
            _ => Err(TransferError::UnsupportedLogSpace(s.to_string())),
        }
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Process-wide table of curves, indexed by [`LogSpace`].
#[derive(Debug)]
pub struct LogRegistry {
    curves: Vec<LogCurve>,
}

impl LogRegistry {
    /// The shared registry, built on first call.
    pub fn global() -> &'static LogRegistry {
        static INSTANCE: OnceLock<LogRegistry> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let registry = LogRegistry::builtin();
            debug!(curves = registry.curves.len(), "log curve registry initialized");
            registry
        })
    }

    fn builtin() -> Self {
        let curves = LogSpace::ALL
            .iter()
            .map(|space| match space {
                LogSpace::FLog => LogCurve::Camera(CameraLog::new(camera_log::F_LOG)),
                LogSpace::FLog2 | LogSpace::FLog2C => {
                    LogCurve::Camera(CameraLog::new(camera_log::F_LOG2))
                }
                LogSpace::VLog => LogCurve::Camera(CameraLog::new(camera_log::V_LOG)),
                LogSpace::NLog => LogCurve::Nikon(NLog::new()),
                LogSpace::CanonLog2 => LogCurve::Canon(CanonLog::new(canon_log::CANON_LOG2)),
                LogSpace::CanonLog3 => LogCurve::Canon(CanonLog::new(canon_log::CANON_LOG3)),
                LogSpace::SLog3 | LogSpace::SLog3Cine => {
                    LogCurve::Camera(CameraLog::new(camera_log::S_LOG3))
                }
                LogSpace::LogC3 => LogCurve::Camera(CameraLog::new(camera_log::LOG_C3)),
                LogSpace::LogC4 => LogCurve::Camera(CameraLog::new(camera_log::LOG_C4)),
                LogSpace::Log3G10 => LogCurve::Camera(CameraLog::new(camera_log::LOG3G10)),
                LogSpace::DLog => LogCurve::Camera(CameraLog::new(camera_log::D_LOG)),
                LogSpace::LLog => LogCurve::Camera(CameraLog::new(camera_log::L_LOG)),
            })
            .collect();
        Self { curves }
    }

    /// Curve for a space.
    pub fn curve(&self, space: LogSpace) -> &LogCurve {
        &self.curves[space.index()]
    }

    /// Resolves a name to its space and curve.
    ///
    /// # Errors
    ///
    /// [`TransferError::UnsupportedLogSpace`] for unknown names.
    pub fn lookup(&self, name: &str) -> TransferResult<(LogSpace, &LogCurve)> {
        let space: LogSpace = name.parse()?;
        Ok((space, self.curve(space)))
    }

    /// All spaces with their curves.
    pub fn iter(&self) -> impl Iterator<Item = (LogSpace, &LogCurve)> {
        LogSpace::ALL.into_iter().zip(self.curves.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_canonical_name_parses_back() {
        for space in LogSpace::ALL {
            assert_eq!(space.name().parse::<LogSpace>().unwrap(), space);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = LogRegistry::global().lookup("Cineon").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported Log Space: Cineon");
    }

    #[test]
    fn slog3_and_cine_share_a_curve() {
        let reg = LogRegistry::global();
        assert_eq!(reg.curve(LogSpace::SLog3), reg.curve(LogSpace::SLog3Cine));
        assert_eq!(LogSpace::SLog3Cine.curve_name(), "S-Log3");
    }

    #[test]
    fn registry_covers_all_spaces() {
        assert_eq!(LogRegistry::global().iter().count(), LogSpace::ALL.len());
    }
}
