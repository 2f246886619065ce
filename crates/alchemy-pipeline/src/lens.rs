//! Lens correction collaborator.

use alchemy_core::ImageBuffer;
use std::path::Path;

/// What the lens collaborator is asked to correct for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LensRequest<'a> {
    /// Explicit profile identifier from the configuration.
    pub profile: Option<&'a str>,
    /// Custom profile database.
    pub database: Option<&'a Path>,
    /// Lens model reported by the decoder.
    pub lens_model: Option<&'a str>,
}

impl LensRequest<'_> {
    /// The profile to look up: the configured one, else the decoder's lens model.
    pub fn lens(&self) -> Option<&str> {
        self.profile.or(self.lens_model)
    }
}

/// Geometric lens correction on a linear RGB buffer.
///
/// Implementations receive the buffer by value and return a corrected one,
/// which may have different dimensions. Errors are reported as text; the
/// pipeline wraps them in [`PipelineError::Lens`](crate::PipelineError::Lens).
pub trait LensCorrector: Send + Sync {
    /// Corrects `image` for the lens described by `request`.
    fn correct(&self, image: ImageBuffer, request: &LensRequest<'_>) -> Result<ImageBuffer, String>;
}

impl<F> LensCorrector for F
where
    F: Fn(ImageBuffer, &LensRequest<'_>) -> Result<ImageBuffer, String> + Send + Sync,
{
    fn correct(&self, image: ImageBuffer, request: &LensRequest<'_>) -> Result<ImageBuffer, String> {
        self(image, request)
    }
}
