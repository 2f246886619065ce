//! Pipeline orchestrator.

use crate::config::PipelineConfig;
use crate::lens::{LensCorrector, LensRequest};
use crate::plan::{Plan, Stage};
use crate::{PipelineError, PipelineResult};
use alchemy_core::{CameraMetadata, ColorTag, ImageBuffer, OutputImage};
use alchemy_lut::{Lut3D, read_cube};
use alchemy_ops::parallel::map_pixels;
use alchemy_ops::{ExposureDecision, ExposureMeter, MeteringMode, SensorNormalize};
use alchemy_primaries::{GamutDescriptor, gamut_for, luminance_weights, native_to_reference};
use alchemy_transfer::{LogCurve, LogSpace};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A configured RAW-to-Log pipeline.
///
/// Construction resolves every name, loads the LUT and fixes the [`Plan`];
/// after that the pipeline is immutable and [`process`](Self::process) may be
/// called from any number of threads at once.
///
/// # Example
///
/// ```rust
/// use alchemy_core::{CameraMetadata, ImageBuffer};
/// use alchemy_pipeline::{Pipeline, PipelineConfig};
/// use alchemy_primaries::{D50_XY, PROPHOTO_RGB, rgb_to_xyz_matrix};
///
/// let pipeline = Pipeline::new(PipelineConfig::new("F-Log2").with_exposure(0.0)).unwrap();
///
/// let meta = CameraMetadata::new(rgb_to_xyz_matrix(&PROPHOTO_RGB).unwrap())
///     .with_matrix_white(D50_XY);
/// let image = ImageBuffer::filled(4, 4, [0.18, 0.18, 0.18]);
///
/// let out = pipeline.process(image, &meta).unwrap();
/// assert_eq!(out.color_tag().to_string(), "F-Gamut / F-Log2");
/// ```
#[derive(Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    log_space: LogSpace,
    metering: MeteringMode,
    curve: &'static LogCurve,
    gamut: &'static GamutDescriptor,
    lut: Option<Arc<Lut3D>>,
    lens: Option<Arc<dyn LensCorrector>>,
    plan: Plan,
}

impl Pipeline {
    /// Validates `config` and loads its LUT, if any.
    ///
    /// # Errors
    ///
    /// Every configuration error: unknown Log space or metering mode,
    /// out-of-range settings, an unreadable or malformed LUT.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        let resolved = config.validate()?;
        let log_space = resolved.log_space;
        let gamut =
            gamut_for(log_space).ok_or_else(|| PipelineError::Gamut(log_space.to_string()))?;
        let lut = config
            .lut
            .as_deref()
            .map(|path| read_cube(path).map(Arc::new))
            .transpose()?;
        let plan = Plan::new(&config, lut.is_some());

        debug!(%log_space, gamut = gamut.name, metering = %resolved.metering, %plan, "pipeline configured");

        Ok(Self {
            log_space,
            metering: resolved.metering,
            curve: log_space.curve(),
            gamut,
            lut,
            lens: None,
            plan,
            config,
        })
    }

    /// Attaches an already loaded LUT, shared with other pipelines.
    pub fn with_lut(mut self, lut: Arc<Lut3D>) -> Self {
        self.lut = Some(lut);
        self.plan = Plan::new(&self.config, true);
        self
    }

    /// Attaches the lens correction collaborator.
    pub fn with_lens_corrector(mut self, corrector: Arc<dyn LensCorrector>) -> Self {
        self.lens = Some(corrector);
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Target Log space.
    pub fn log_space(&self) -> LogSpace {
        self.log_space
    }

    /// Metering mode used when no manual exposure is set.
    pub fn metering(&self) -> MeteringMode {
        self.metering
    }

    /// Attached LUT.
    pub fn lut(&self) -> Option<&Arc<Lut3D>> {
        self.lut.as_ref()
    }

    /// Stages [`process`](Self::process) runs, in order.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Runs every stage on one image.
    ///
    /// Metadata and collaborator checks happen before the first pixel is
    /// touched; a failure leaves no partial output.
    ///
    /// # Errors
    ///
    /// - `Missing Color Matrix` or invalid levels in `meta`
    /// - [`PipelineError::Lens`] if lens correction is planned but no
    ///   corrector is attached, or the corrector fails
    pub fn process(&self, image: ImageBuffer, meta: &CameraMetadata) -> PipelineResult<OutputImage> {
        meta.validate()?;
        let to_reference = native_to_reference(meta)?.to_reference;
        let meter = ExposureMeter::new(self.config.meter, luminance_weights(meta)?)?;
        let lens = match (self.plan.contains(Stage::LensCorrection), self.lens.as_deref()) {
            (true, None) => {
                return Err(PipelineError::Lens(
                    "lens correction enabled but no corrector attached".into(),
                ));
            }
            (true, lens) => lens,
            (false, _) => None,
        };

        info!(
            log_space = %self.log_space,
            width = image.width(),
            height = image.height(),
            lut = self.lut.is_some(),
            "processing image"
        );

        let mut image = image;
        let adj = &self.config.adjustments;
        for stage in self.plan.iter() {
            match stage {
                Stage::SensorNormalize => {
                    let norm = SensorNormalize::from_metadata(meta);
                    if norm.is_identity() {
                        debug!(%stage, "already normalized");
                        continue;
                    }
                    map_pixels(&mut image, |px| norm.apply(px));
                }
                Stage::WhiteBalance => {
                    let wb = adj.white_balance();
                    map_pixels(&mut image, |px| wb.apply(px));
                }
                Stage::Exposure => {
                    let decision = meter.decide(self.config.exposure, self.metering, &image)?;
                    self.apply_exposure(&mut image, decision);
                }
                Stage::NativeToReference => {
                    map_pixels(&mut image, |px| to_reference.apply_rgb(px));
                }
                Stage::LensCorrection => {
                    if let Some(lens) = lens {
                        image = self.correct_lens(lens, image, meta)?;
                    }
                }
                Stage::ReferenceToLog => {
                    let m = self.gamut.from_reference;
                    map_pixels(&mut image, |px| m.apply_rgb(px));
                }
                Stage::LogEncode => {
                    let curve = self.curve;
                    map_pixels(&mut image, |px| curve.encode_rgb(px));
                }
                Stage::Saturation => {
                    let op = adj.saturation();
                    map_pixels(&mut image, |px| op.apply(px));
                }
                Stage::Contrast => {
                    let op = adj.contrast(self.curve.middle_gray());
                    map_pixels(&mut image, |px| op.apply(px));
                }
                Stage::HighlightShadow => {
                    let op = adj.highlight_shadow();
                    map_pixels(&mut image, |px| op.apply(px));
                }
                Stage::Lut => {
                    if let Some(lut) = self.lut.as_deref() {
                        map_pixels(&mut image, |px| lut.apply(px));
                    }
                }
            }
            debug!(%stage, "stage done");
        }

        Ok(OutputImage::new(image, self.config.output.bit_depth(), self.color_tag()))
    }

    fn apply_exposure(&self, image: &mut ImageBuffer, decision: ExposureDecision) {
        let gain = decision.gain();
        match decision {
            ExposureDecision::Manual(stops) => debug!(stops, "manual exposure"),
            ExposureDecision::Metered { mode, stops } => debug!(%mode, stops, "metered exposure"),
        }
        if gain != 1.0 {
            map_pixels(image, |[r, g, b]| [r * gain, g * gain, b * gain]);
        }
    }

    fn correct_lens(
        &self,
        lens: &dyn LensCorrector,
        image: ImageBuffer,
        meta: &CameraMetadata,
    ) -> PipelineResult<ImageBuffer> {
        let request = LensRequest {
            profile: self.config.lens_profile.as_deref(),
            database: self.config.lens_database.as_deref(),
            lens_model: meta.lens_model.as_deref(),
        };
        let before = image.dimensions();
        let out = lens.correct(image, &request).map_err(PipelineError::Lens)?;
        if out.is_empty() {
            return Err(PipelineError::Lens("corrector returned an empty buffer".into()));
        }
        debug!(lens = request.lens(), ?before, after = ?out.dimensions(), "lens corrected");
        Ok(out)
    }

    fn color_tag(&self) -> ColorTag {
        if self.lut.is_some() {
            ColorTag::LutApplied
        } else {
            ColorTag::LogEncoded {
                curve: self.log_space.curve_name().to_string(),
                gamut: self.gamut.name.to_string(),
            }
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("log_space", &self.log_space)
            .field("metering", &self.metering)
            .field("lut", &self.lut.as_ref().map(|l| l.size()))
            .field("lens", &self.lens.is_some())
            .field("plan", &self.plan)
            .finish()
    }
}
