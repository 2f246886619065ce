//! Pipeline configuration.
//!
//! # YAML
//!
//! ```yaml
//! log_space: S-Log3.Cine
//! lut: looks/film.cube
//! exposure: 0.5            # omit to meter
//! metering: highlight-safe
//! lens_correction: true
//! lens_order: after-gamut
//! adjustments:
//!   temperature: 10
//!   saturation: 0.25
//!   contrast: 0.1
//! meter:
//!   percentile: 99.5
//! output: heif
//! ```
//!
//! Only `log_space` is required. Names are resolved by [`PipelineConfig::validate`],
//! which [`Pipeline::new`](crate::Pipeline::new) calls before any image work.

use crate::{PipelineError, PipelineResult};
use alchemy_core::OutputFormat;
use alchemy_ops::{AdjustmentSettings, MeterSettings, MeteringMode};
use alchemy_transfer::LogSpace;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where lens correction runs relative to the native to ProPhoto transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LensOrder {
    /// On the camera-native buffer, before the gamut transform.
    BeforeGamut,
    /// On ProPhoto linear, after the gamut transform.
    #[default]
    AfterGamut,
}

fn default_metering() -> String {
    MeteringMode::default().name().to_string()
}

/// Options for one pipeline, shared by every image it processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Target Log space name, e.g. `F-Log2` or `LogC4`.
    pub log_space: String,
    /// Optional `.cube` look applied after the Log encode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lut: Option<PathBuf>,
    /// Manual exposure in stops; disables metering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure: Option<f32>,
    /// Metering mode name.
    #[serde(default = "default_metering")]
    pub metering: String,
    /// Run the lens correction collaborator.
    #[serde(default)]
    pub lens_correction: bool,
    /// Position of lens correction.
    #[serde(default)]
    pub lens_order: LensOrder,
    /// Lens profile identifier; falls back to the metadata's lens model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens_profile: Option<String>,
    /// Custom lens profile database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens_database: Option<PathBuf>,
    /// Tonal adjustments.
    #[serde(default)]
    pub adjustments: AdjustmentSettings,
    /// Meter tuning.
    #[serde(default)]
    pub meter: MeterSettings,
    /// Output container; decides the bit depth.
    #[serde(default)]
    pub output: OutputFormat,
}

/// Names from a [`PipelineConfig`] resolved to typed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// Target Log space.
    pub log_space: LogSpace,
    /// Metering mode.
    pub metering: MeteringMode,
}

impl PipelineConfig {
    /// Defaults for everything but the Log space.
    pub fn new(log_space: impl Into<String>) -> Self {
        Self {
            log_space: log_space.into(),
            lut: None,
            exposure: None,
            metering: default_metering(),
            lens_correction: false,
            lens_order: LensOrder::default(),
            lens_profile: None,
            lens_database: None,
            adjustments: AdjustmentSettings::default(),
            meter: MeterSettings::default(),
            output: OutputFormat::default(),
        }
    }

    /// Sets the LUT path.
    pub fn with_lut(mut self, path: impl Into<PathBuf>) -> Self {
        self.lut = Some(path.into());
        self
    }

    /// Pins exposure.
    pub fn with_exposure(mut self, stops: f32) -> Self {
        self.exposure = Some(stops);
        self
    }

    /// Sets the metering mode name.
    pub fn with_metering(mut self, mode: impl Into<String>) -> Self {
        self.metering = mode.into();
        self
    }

    /// Sets the tonal adjustments.
    pub fn with_adjustments(mut self, adjustments: AdjustmentSettings) -> Self {
        self.adjustments = adjustments;
        self
    }

    /// Enables lens correction at `order`.
    pub fn with_lens_correction(mut self, order: LensOrder) -> Self {
        self.lens_correction = true;
        self.lens_order = order;
        self
    }

    /// Sets the output container.
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Parses and validates YAML.
    pub fn from_yaml_str(yaml: &str) -> PipelineResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> PipelineResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Resolves names and range-checks every setting.
    ///
    /// # Errors
    ///
    /// - `Unsupported Log Space` / `Unknown Metering Mode` for bad names
    /// - [`PipelineError::Ops`] for out-of-range adjustments or meter settings
    /// - [`PipelineError::Config`] for a non-finite manual exposure
    pub fn validate(&self) -> PipelineResult<Resolved> {
        let log_space: LogSpace = self.log_space.parse()?;
        let metering: MeteringMode = self.metering.parse()?;
        if let Some(stops) = self.exposure {
            if !stops.is_finite() {
                return Err(PipelineError::Config(format!(
                    "exposure must be finite, got {stops}"
                )));
            }
        }
        self.adjustments.validate()?;
        self.meter.validate()?;
        Ok(Resolved {
            log_space,
            metering,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_takes_defaults() {
        let cfg = PipelineConfig::from_yaml_str("log_space: F-Log2\n").unwrap();
        assert_eq!(cfg, PipelineConfig::new("F-Log2"));
        assert_eq!(cfg.metering, "hybrid");
        assert_eq!(cfg.lens_order, LensOrder::AfterGamut);
        assert_eq!(cfg.output, OutputFormat::Tiff);
    }

    #[test]
    fn full_yaml() {
        let yaml = r#"
log_space: S-Log3.Cine
lut: looks/film.cube
exposure: 0.5
metering: center_weighted
lens_correction: true
lens_order: before-gamut
lens_profile: "XF16-55mmF2.8 R LM WR"
adjustments:
  temperature: 10
  saturation: 0.25
meter:
  percentile: 99.5
output: heif
"#;
        let cfg = PipelineConfig::from_yaml_str(yaml).unwrap();
        let resolved = cfg.validate().unwrap();
        assert_eq!(resolved.log_space, LogSpace::SLog3Cine);
        assert_eq!(resolved.metering, MeteringMode::CenterWeighted);
        assert_eq!(cfg.lut, Some(PathBuf::from("looks/film.cube")));
        assert_eq!(cfg.lens_order, LensOrder::BeforeGamut);
        assert_eq!(cfg.adjustments.temperature, 10.0);
        assert_eq!(cfg.adjustments.contrast, 0.0);
        assert_eq!(cfg.meter.percentile, 99.5);
        assert_eq!(cfg.meter.target_gray, 0.18);
        assert_eq!(cfg.output, OutputFormat::Heif);
    }

    #[test]
    fn missing_log_space_is_a_yaml_error() {
        let err = PipelineConfig::from_yaml_str("metering: average\n").unwrap_err();
        assert!(matches!(err, PipelineError::Yaml(_)));
    }

    #[test]
    fn bad_names_fail_validation() {
        let err = PipelineConfig::new("Rec709").validate().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported Log Space: Rec709");

        let err = PipelineConfig::new("V-Log").with_metering("spot").validate().unwrap_err();
        assert_eq!(err.to_string(), "Unknown Metering Mode: spot");
    }

    #[test]
    fn out_of_range_settings_fail_validation() {
        let mut cfg = PipelineConfig::new("LogC4");
        cfg.adjustments.contrast = -2.0;
        assert!(matches!(cfg.validate(), Err(PipelineError::Ops(_))));

        let cfg = PipelineConfig::new("LogC4").with_exposure(f32::INFINITY);
        assert!(matches!(cfg.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn yaml_round_trip() {
        let cfg = PipelineConfig::new("D-Log")
            .with_exposure(-1.0)
            .with_adjustments(AdjustmentSettings::camera_boost())
            .with_output(OutputFormat::Jpeg);
        let back = PipelineConfig::from_yaml_str(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn from_file_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = PipelineConfig::from_file(dir.path().join("none.yaml")).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigIo { .. }));
    }
}
