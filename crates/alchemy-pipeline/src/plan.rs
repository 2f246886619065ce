//! The ordered stage list for a configuration.

use crate::config::{LensOrder, PipelineConfig};
use std::fmt;

/// One step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Black/white levels and as-shot multipliers (camera native, linear).
    SensorNormalize,
    /// Temperature/tint correction (camera native, linear).
    WhiteBalance,
    /// Manual or metered gain (camera native, linear).
    Exposure,
    /// Camera native to ProPhoto linear.
    NativeToReference,
    /// Lens correction collaborator.
    LensCorrection,
    /// ProPhoto linear to the Log gamut, still linear.
    ReferenceToLog,
    /// Log transfer function encode.
    LogEncode,
    /// Saturation on Log code values.
    Saturation,
    /// Contrast on Log code values.
    Contrast,
    /// Highlight/shadow rolloff on Log code values.
    HighlightShadow,
    /// Creative 3D LUT.
    Lut,
}

impl Stage {
    /// Short name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SensorNormalize => "sensor-normalize",
            Self::WhiteBalance => "white-balance",
            Self::Exposure => "exposure",
            Self::NativeToReference => "native-to-reference",
            Self::LensCorrection => "lens-correction",
            Self::ReferenceToLog => "reference-to-log",
            Self::LogEncode => "log-encode",
            Self::Saturation => "saturation",
            Self::Contrast => "contrast",
            Self::HighlightShadow => "highlight-shadow",
            Self::Lut => "lut",
        }
    }

    /// True for stages that must see scene-linear values.
    pub const fn is_linear(self) -> bool {
        matches!(
            self,
            Self::SensorNormalize
                | Self::WhiteBalance
                | Self::Exposure
                | Self::NativeToReference
                | Self::LensCorrection
                | Self::ReferenceToLog
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stages a pipeline runs, in order.
///
/// Zero-magnitude adjustments are left out rather than run as no-ops, and
/// `Lut` is present only when a table is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    stages: Vec<Stage>,
}

impl Plan {
    /// Builds the plan for `config`.
    pub fn new(config: &PipelineConfig, has_lut: bool) -> Self {
        let adj = &config.adjustments;
        let lens = config.lens_correction;
        let mut stages = vec![Stage::SensorNormalize];

        if !adj.white_balance().is_identity() {
            stages.push(Stage::WhiteBalance);
        }
        stages.push(Stage::Exposure);
        if lens && config.lens_order == LensOrder::BeforeGamut {
            stages.push(Stage::LensCorrection);
        }
        stages.push(Stage::NativeToReference);
        if lens && config.lens_order == LensOrder::AfterGamut {
            stages.push(Stage::LensCorrection);
        }
        stages.push(Stage::ReferenceToLog);
        stages.push(Stage::LogEncode);
        if !adj.saturation().is_identity() {
            stages.push(Stage::Saturation);
        }
        // contrast identity depends on the amount alone, not the pivot
        if !adj.contrast(0.5).is_identity() {
            stages.push(Stage::Contrast);
        }
        if !adj.highlight_shadow().is_identity() {
            stages.push(Stage::HighlightShadow);
        }
        if has_lut {
            stages.push(Stage::Lut);
        }
        Self { stages }
    }

    /// Stages in order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// True if `stage` runs.
    pub fn contains(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    /// Index of `stage`, if it runs.
    pub fn position(&self, stage: Stage) -> Option<usize> {
        self.stages.iter().position(|s| *s == stage)
    }

    /// Iterates stages in order.
    pub fn iter(&self) -> impl Iterator<Item = Stage> + '_ {
        self.stages.iter().copied()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.stages.iter().map(|s| s.name()).collect();
        f.write_str(&names.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alchemy_ops::AdjustmentSettings;

    #[test]
    fn minimal_plan() {
        let plan = Plan::new(&PipelineConfig::new("S-Log3"), false);
        assert_eq!(
            plan.stages(),
            &[
                Stage::SensorNormalize,
                Stage::Exposure,
                Stage::NativeToReference,
                Stage::ReferenceToLog,
                Stage::LogEncode,
            ]
        );
    }

    #[test]
    fn full_plan_order() {
        let cfg = PipelineConfig::new("S-Log3")
            .with_adjustments(AdjustmentSettings {
                temperature: 5.0,
                saturation: 0.2,
                contrast: 0.1,
                shadow: 0.3,
                ..Default::default()
            })
            .with_lens_correction(LensOrder::AfterGamut);
        let plan = Plan::new(&cfg, true);
        assert_eq!(
            plan.to_string(),
            "sensor-normalize -> white-balance -> exposure -> native-to-reference -> \
             lens-correction -> reference-to-log -> log-encode -> saturation -> contrast -> \
             highlight-shadow -> lut"
        );
    }

    #[test]
    fn each_adjustment_gates_its_own_stage() {
        let cases = [
            (AdjustmentSettings { tint: -3.0, ..Default::default() }, Stage::WhiteBalance),
            (AdjustmentSettings { saturation: -0.5, ..Default::default() }, Stage::Saturation),
            (AdjustmentSettings { contrast: -0.2, ..Default::default() }, Stage::Contrast),
            (AdjustmentSettings { highlight: 0.4, ..Default::default() }, Stage::HighlightShadow),
        ];
        for (adj, stage) in cases {
            let plan = Plan::new(&PipelineConfig::new("LogC3").with_adjustments(adj), false);
            assert!(plan.contains(stage), "{stage}");
            assert_eq!(plan.stages().len(), 6, "{plan}");
        }
    }

    #[test]
    fn lens_before_gamut() {
        let cfg = PipelineConfig::new("F-Log").with_lens_correction(LensOrder::BeforeGamut);
        let plan = Plan::new(&cfg, false);
        assert!(plan.position(Stage::LensCorrection) < plan.position(Stage::NativeToReference));
    }

    #[test]
    fn linear_stages_precede_encode() {
        let cfg = PipelineConfig::new("V-Log")
            .with_adjustments(AdjustmentSettings::camera_boost())
            .with_lens_correction(LensOrder::AfterGamut);
        let plan = Plan::new(&cfg, true);
        let encode = plan.position(Stage::LogEncode).unwrap();
        for (i, stage) in plan.iter().enumerate() {
            assert_eq!(stage.is_linear(), i < encode, "{stage}");
        }
        assert_eq!(plan.stages().last(), Some(&Stage::Lut));
    }
}
