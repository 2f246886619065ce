//! Flat record of per-image tonal adjustments.

use crate::tonal::{Contrast, HighlightShadow, Saturation};
use crate::white_balance::WhiteBalance;
use crate::{OpsError, OpsResult};
use serde::{Deserialize, Serialize};

/// Adjustment settings, all signed with 0 meaning "no change".
///
/// Built once from caller options and consumed by one pipeline run.
///
/// ```rust
/// use alchemy_ops::AdjustmentSettings;
///
/// assert!(AdjustmentSettings::default().is_identity());
/// assert!(!AdjustmentSettings::camera_boost().is_identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentSettings {
    /// White balance temperature shift (linear light).
    pub temperature: f32,
    /// White balance tint shift (linear light).
    pub tint: f32,
    /// Saturation on Log values, `>= -1`.
    pub saturation: f32,
    /// Contrast on Log values, `> -1`.
    pub contrast: f32,
    /// Highlight rolloff on Log values.
    pub highlight: f32,
    /// Shadow rolloff on Log values.
    pub shadow: f32,
    /// Code value where highlight rolloff starts.
    pub highlight_threshold: f32,
    /// Code value where shadow rolloff starts.
    pub shadow_threshold: f32,
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        let hs = HighlightShadow::default();
        Self {
            temperature: 0.0,
            tint: 0.0,
            saturation: 0.0,
            contrast: 0.0,
            highlight: 0.0,
            shadow: 0.0,
            highlight_threshold: hs.highlight_threshold,
            shadow_threshold: hs.shadow_threshold,
        }
    }
}

impl AdjustmentSettings {
    /// The mild saturation and contrast lift applied to camera-matched looks.
    pub fn camera_boost() -> Self {
        Self {
            saturation: 0.25,
            contrast: 0.1,
            ..Self::default()
        }
    }

    /// True when every stage built from these settings is a no-op.
    pub fn is_identity(&self) -> bool {
        self.white_balance().is_identity()
            && self.saturation().is_identity()
            && self.contrast(0.5).is_identity()
            && self.highlight_shadow().is_identity()
    }

    /// Range checks.
    pub fn validate(&self) -> OpsResult<()> {
        let fields = [
            ("temperature", self.temperature),
            ("tint", self.tint),
            ("saturation", self.saturation),
            ("contrast", self.contrast),
            ("highlight", self.highlight),
            ("shadow", self.shadow),
        ];
        if let Some((name, v)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(OpsError::InvalidParameter(format!("{name} must be finite, got {v}")));
        }
        if self.saturation < -1.0 {
            return Err(OpsError::InvalidParameter(format!(
                "saturation must be >= -1, got {}",
                self.saturation
            )));
        }
        if self.contrast <= -1.0 {
            return Err(OpsError::InvalidParameter(format!(
                "contrast must be > -1, got {}",
                self.contrast
            )));
        }
        let (ts, th) = (self.shadow_threshold, self.highlight_threshold);
        if !(0.0 < ts && ts <= th && th < 1.0) {
            return Err(OpsError::InvalidParameter(format!(
                "thresholds must satisfy 0 < shadow ({ts}) <= highlight ({th}) < 1"
            )));
        }
        Ok(())
    }

    /// Linear-light white balance stage.
    pub fn white_balance(&self) -> WhiteBalance {
        WhiteBalance::new(self.temperature, self.tint)
    }

    /// Log-space saturation stage.
    pub fn saturation(&self) -> Saturation {
        Saturation::new(self.saturation)
    }

    /// Log-space contrast stage pivoting at `pivot`.
    pub fn contrast(&self, pivot: f32) -> Contrast {
        Contrast::new(self.contrast, pivot)
    }

    /// Log-space highlight/shadow stage.
    pub fn highlight_shadow(&self) -> HighlightShadow {
        HighlightShadow {
            highlight: self.highlight,
            shadow: self.shadow,
            highlight_threshold: self.highlight_threshold,
            shadow_threshold: self.shadow_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        AdjustmentSettings::default().validate().unwrap();
        AdjustmentSettings::camera_boost().validate().unwrap();
    }

    #[test]
    fn out_of_range_rejected() {
        let bad = [
            AdjustmentSettings { contrast: -1.0, ..Default::default() },
            AdjustmentSettings { saturation: -1.5, ..Default::default() },
            AdjustmentSettings { tint: f32::NAN, ..Default::default() },
            AdjustmentSettings { shadow_threshold: 0.8, ..Default::default() },
            AdjustmentSettings { highlight_threshold: 1.0, ..Default::default() },
        ];
        for s in bad {
            assert!(s.validate().is_err(), "{s:?}");
        }
    }

    #[test]
    fn stages_follow_fields() {
        let s = AdjustmentSettings { temperature: 10.0, highlight: 0.2, ..Default::default() };
        assert!(!s.white_balance().is_identity());
        assert!(s.saturation().is_identity());
        assert!(s.contrast(0.4).is_identity());
        assert!(!s.highlight_shadow().is_identity());
        assert!(!s.is_identity());
    }
}
