//! Exposure metering on scene-linear buffers.
//!
//! The meter runs on the white-balanced, camera-native buffer, before any
//! gamut transform, and returns a single compensation in stops. Luminance is
//! `max(w . rgb, 1e-6)` with `w` the Y row of the camera matrix, so black and
//! negative pixels never reach `log2` as zero.
//!
//! | Mode | Statistic |
//! |------|-----------|
//! | `average` | geometric mean of luminance |
//! | `center-weighted` | Gaussian-weighted geometric mean (sigma 0.5 of the half-frame) |
//! | `highlight-safe` | percentile of luminance, pushed to the clip threshold |
//! | `matrix` | grid of cell log-means, centre-weighted, outliers discounted |
//! | `hybrid` | blend of `average` and `highlight-safe` |
//!
//! Every result is clamped to `+/- limit_stops`, except that `highlight-safe`
//! and `hybrid` never exceed the highlight-safe stop: the chosen percentile
//! always lands at or below the clip threshold, however many stops down that
//! takes. A manual value bypasses all of this: [`ExposureMeter::decide`]
//! never reads the buffer when one is set.

use crate::histogram::LogHistogram;
use crate::parallel::{fold_chunks, reduce_chunks};
use crate::{OpsError, OpsResult};
use alchemy_core::ImageBuffer;
use alchemy_core::image::CHANNELS;
use alchemy_math::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Floor applied to luminance before taking logs.
const MIN_LUMINANCE: f64 = 1e-6;

/// Gaussian sigma in normalized `[-1, 1]` frame coordinates.
const CENTER_SIGMA: f64 = 0.5;

/// Cells further than this from the median cell (in stops) are outliers.
const OUTLIER_STOPS: f64 = 2.0;

/// Weight multiplier for outlier cells.
const OUTLIER_WEIGHT: f64 = 0.25;

/// Metering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeteringMode {
    /// Geometric mean over the whole frame.
    Average,
    /// Geometric mean weighted toward the frame centre.
    CenterWeighted,
    /// Expose to the right without clipping the chosen percentile.
    HighlightSafe,
    /// Grid of regions with centre emphasis and outlier rejection.
    Matrix,
    /// Blend of `Average` and `HighlightSafe`.
    #[default]
    Hybrid,
}

impl MeteringMode {
    /// All modes.
    pub const ALL: [Self; 5] = [
        Self::Average,
        Self::CenterWeighted,
        Self::HighlightSafe,
        Self::Matrix,
        Self::Hybrid,
    ];

    /// Canonical name as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::CenterWeighted => "center-weighted",
            Self::HighlightSafe => "highlight-safe",
            Self::Matrix => "matrix",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for MeteringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MeteringMode {
    type Err = OpsError;

    /// Case-insensitive; `_` is accepted for `-`.
    fn from_str(s: &str) -> OpsResult<Self> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|m| m.name() == key)
            .ok_or_else(|| OpsError::UnknownMeteringMode(s.to_string()))
    }
}

/// Meter tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterSettings {
    /// Linear value average luminance is placed at.
    pub target_gray: f32,
    /// Luminance percentile `highlight-safe` protects (0-100].
    pub percentile: f32,
    /// Linear value that percentile is pushed up to.
    pub clip_threshold: f32,
    /// Largest compensation either way, in stops.
    pub limit_stops: f32,
    /// Share of `highlight-safe` in `hybrid`, `[0, 1]`.
    pub hybrid_weight: f32,
    /// Cells per side for `matrix`.
    pub grid: u32,
}

impl Default for MeterSettings {
    fn default() -> Self {
        Self {
            target_gray: 0.18,
            percentile: 99.9,
            clip_threshold: 0.9,
            limit_stops: 6.0,
            hybrid_weight: 0.5,
            grid: 5,
        }
    }
}

impl MeterSettings {
    /// Checks every field is in range.
    pub fn validate(&self) -> OpsResult<()> {
        let bad = |msg: String| Err(OpsError::InvalidParameter(msg));
        if !(self.target_gray.is_finite() && self.target_gray > 0.0) {
            return bad(format!("target_gray must be positive, got {}", self.target_gray));
        }
        if !(self.percentile > 0.0 && self.percentile <= 100.0) {
            return bad(format!("percentile must be in (0, 100], got {}", self.percentile));
        }
        if !(self.clip_threshold > 0.0 && self.clip_threshold <= 1.0) {
            return bad(format!(
                "clip_threshold must be in (0, 1], got {}",
                self.clip_threshold
            ));
        }
        if !(self.limit_stops.is_finite() && self.limit_stops > 0.0) {
            return bad(format!("limit_stops must be positive, got {}", self.limit_stops));
        }
        if !(0.0..=1.0).contains(&self.hybrid_weight) {
            return bad(format!(
                "hybrid_weight must be in [0, 1], got {}",
                self.hybrid_weight
            ));
        }
        if self.grid == 0 {
            return bad("grid must have at least one cell".into());
        }
        Ok(())
    }
}

/// The exposure applied to one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExposureDecision {
    /// Caller-pinned stops; the meter did not run.
    Manual(f32),
    /// Computed by the meter.
    Metered {
        /// Mode used.
        mode: MeteringMode,
        /// Compensation in stops.
        stops: f32,
    },
}

impl ExposureDecision {
    /// Compensation in stops.
    pub fn stops(&self) -> f32 {
        match *self {
            Self::Manual(stops) | Self::Metered { stops, .. } => stops,
        }
    }

    /// Linear multiplier, `2^stops`.
    pub fn gain(&self) -> f32 {
        self.stops().exp2()
    }

    /// True for a caller-pinned value.
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual(_))
    }
}

/// Computes exposure compensation from linear pixel statistics.
#[derive(Debug, Clone)]
pub struct ExposureMeter {
    settings: MeterSettings,
    weights: [f64; 3],
}

impl ExposureMeter {
    /// Creates a meter measuring luminance with `weights` (camera RGB to Y).
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] for out-of-range settings or weights
    /// that are non-finite or sum to zero or less.
    pub fn new(settings: MeterSettings, weights: Vec3) -> OpsResult<Self> {
        settings.validate()?;
        if !weights.is_finite() || weights.sum() <= 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "luminance weights {:?} must be finite with a positive sum",
                weights.to_array()
            )));
        }
        Ok(Self {
            settings,
            weights: weights.to_array().map(f64::from),
        })
    }

    /// Settings in use.
    pub fn settings(&self) -> &MeterSettings {
        &self.settings
    }

    /// Picks the exposure for an image.
    ///
    /// A manual value is returned as-is and the buffer is never read.
    pub fn decide(
        &self,
        manual: Option<f32>,
        mode: MeteringMode,
        image: &ImageBuffer,
    ) -> OpsResult<ExposureDecision> {
        if let Some(stops) = manual {
            if !stops.is_finite() {
                return Err(OpsError::InvalidParameter(format!(
                    "manual exposure must be finite, got {stops}"
                )));
            }
            debug!(stops, "manual exposure, meter skipped");
            return Ok(ExposureDecision::Manual(stops));
        }
        let stops = self.measure(mode, image)?;
        Ok(ExposureDecision::Metered { mode, stops })
    }

    /// Runs one metering strategy.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidDimensions`] for an empty buffer.
    pub fn measure(&self, mode: MeteringMode, image: &ImageBuffer) -> OpsResult<f32> {
        if image.is_empty() {
            return Err(OpsError::InvalidDimensions("cannot meter an empty image".into()));
        }
        // `ceiling` is the highlight-safe stop where the mode promises not to clip
        let (raw, ceiling) = match mode {
            MeteringMode::Average => (self.average(image), None),
            MeteringMode::CenterWeighted => (self.center_weighted(image), None),
            MeteringMode::HighlightSafe => {
                let hs = self.highlight_safe(image);
                (hs, Some(hs))
            }
            MeteringMode::Matrix => (self.matrix(image), None),
            MeteringMode::Hybrid => {
                let w = self.settings.hybrid_weight as f64;
                let hs = self.highlight_safe(image);
                ((1.0 - w) * self.average(image) + w * hs, Some(hs))
            }
        };
        let limit = self.settings.limit_stops as f64;
        let mut stops = raw.clamp(-limit, limit);
        if let Some(ceiling) = ceiling {
            stops = stops.min(ceiling);
        }
        let stops = stops as f32;
        debug!(%mode, raw, stops, "metered exposure");
        Ok(stops)
    }

    #[inline]
    fn luminance(&self, px: &[f32]) -> f64 {
        let [wr, wg, wb] = self.weights;
        let y = wr * px[0] as f64 + wg * px[1] as f64 + wb * px[2] as f64;
        y.max(MIN_LUMINANCE)
    }

    fn target_log(&self) -> f64 {
        (self.settings.target_gray as f64).log2()
    }

    fn average(&self, image: &ImageBuffer) -> f64 {
        let sum: f64 = reduce_chunks(image.data(), |_, chunk| {
            chunk
                .chunks_exact(CHANNELS)
                .map(|px| self.luminance(px).log2())
                .sum::<f64>()
        })
        .into_iter()
        .sum();
        let log_mean = sum / image.pixel_count() as f64;
        trace!(log_mean, "average luminance");
        self.target_log() - log_mean
    }

    fn center_weighted(&self, image: &ImageBuffer) -> f64 {
        let (w, h) = (image.width() as usize, image.height() as usize);
        let wx: Vec<f64> = (0..w).map(|x| gaussian(normalized(x, w))).collect();
        let wy: Vec<f64> = (0..h).map(|y| gaussian(normalized(y, h))).collect();

        let (sum, weight) = reduce_chunks(image.data(), |start, chunk| {
            let mut acc = (0.0f64, 0.0f64);
            for (k, px) in chunk.chunks_exact(CHANNELS).enumerate() {
                let i = start + k;
                let weight = wx[i % w] * wy[i / w];
                acc.0 += weight * self.luminance(px).log2();
                acc.1 += weight;
            }
            acc
        })
        .into_iter()
        .fold((0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1));

        let log_mean = sum / weight;
        trace!(log_mean, "center-weighted luminance");
        self.target_log() - log_mean
    }

    fn highlight_safe(&self, image: &ImageBuffer) -> f64 {
        let data = image.data();
        let (lo, hi) = fold_chunks(
            data,
            || (f64::INFINITY, f64::NEG_INFINITY),
            |acc, chunk| {
                chunk.chunks_exact(CHANNELS).fold(acc, |(lo, hi), px| {
                    let l = self.luminance(px).log2();
                    (lo.min(l), hi.max(l))
                })
            },
            |a, b| (a.0.min(b.0), a.1.max(b.1)),
        );

        let hist = fold_chunks(
            data,
            || LogHistogram::new(lo, hi),
            |mut h, chunk| {
                chunk
                    .chunks_exact(CHANNELS)
                    .for_each(|px| h.add(self.luminance(px)));
                h
            },
            LogHistogram::merge,
        );

        let p = hist
            .percentile_upper(self.settings.percentile as f64)
            .unwrap_or(MIN_LUMINANCE);
        trace!(percentile = self.settings.percentile, luminance = p, "highlight-safe");
        (self.settings.clip_threshold as f64 / p).log2()
    }

    fn matrix(&self, image: &ImageBuffer) -> f64 {
        let (w, h) = (image.width() as usize, image.height() as usize);
        let g = self.settings.grid as usize;
        let cells = g * g;

        let mut totals = vec![(0.0f64, 0u64); cells];
        let partials = reduce_chunks(image.data(), |start, chunk| {
            let mut acc = vec![(0.0f64, 0u64); cells];
            for (k, px) in chunk.chunks_exact(CHANNELS).enumerate() {
                let i = start + k;
                let cell = (i / w) * g / h * g + (i % w) * g / w;
                acc[cell].0 += self.luminance(px).log2();
                acc[cell].1 += 1;
            }
            acc
        });
        for part in partials {
            for (t, p) in totals.iter_mut().zip(part) {
                t.0 += p.0;
                t.1 += p.1;
            }
        }

        // (cell index, log mean) of populated cells
        let means: Vec<(usize, f64)> = totals
            .iter()
            .enumerate()
            .filter(|(_, (_, n))| *n > 0)
            .map(|(i, (s, n))| (i, s / *n as f64))
            .collect();
        let median = median(means.iter().map(|(_, m)| *m).collect());

        let (sum, weight) = means.iter().fold((0.0, 0.0), |acc, &(i, m)| {
            let mut wgt = gaussian(normalized(i % g, g)) * gaussian(normalized(i / g, g));
            if (m - median).abs() > OUTLIER_STOPS {
                wgt *= OUTLIER_WEIGHT;
            }
            (acc.0 + wgt * m, acc.1 + wgt)
        });

        let log_mean = sum / weight;
        trace!(cells = means.len(), median, log_mean, "matrix luminance");
        self.target_log() - log_mean
    }
}

/// Centre of cell `i` of `n` in `[-1, 1]`.
#[inline]
fn normalized(i: usize, n: usize) -> f64 {
    2.0 * (i as f64 + 0.5) / n as f64 - 1.0
}

#[inline]
fn gaussian(t: f64) -> f64 {
    (-(t * t) / (2.0 * CENTER_SIGMA * CENTER_SIGMA)).exp()
}

fn median(mut v: Vec<f64>) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        (v[mid - 1] + v[mid]) / 2.0
    } else {
        v[mid]
    }
}
