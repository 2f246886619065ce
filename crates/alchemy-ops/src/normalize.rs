//! Sensor level normalization and as-shot white balance.

use alchemy_core::CameraMetadata;

/// `(v - black) / (white - black) * wb`, per channel.
///
/// The white balance multipliers are normalized to green first. For a buffer
/// the decoder already scaled and balanced, this is the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorNormalize {
    black: [f32; 3],
    scale: [f32; 3],
    identity: bool,
}

impl SensorNormalize {
    /// Builds the stage from validated metadata.
    pub fn from_metadata(meta: &CameraMetadata) -> Self {
        let wb = meta.normalized_wb();
        let black = meta.levels.black;
        let mut scale = [1.0f32; 3];
        for c in 0..3 {
            scale[c] = wb[c] / (meta.levels.white[c] - black[c]);
        }
        Self {
            black,
            scale,
            identity: meta.levels.is_normalized() && wb == [1.0; 3],
        }
    }

    /// True when levels are `[0, 1]` and multipliers are unity.
    pub fn is_identity(&self) -> bool {
        self.identity
    }

    /// Applies to one pixel.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        if self.identity {
            return rgb;
        }
        [
            (rgb[0] - self.black[0]) * self.scale[0],
            (rgb[1] - self.black[1]) * self.scale[1],
            (rgb[2] - self.black[2]) * self.scale[2],
        ]
    }
}
