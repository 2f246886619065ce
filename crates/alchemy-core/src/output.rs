//! The hand-off to the codec collaborator.
//!
//! The pipeline never writes files. It finishes with an [`OutputImage`]:
//! the final code values, the bit depth the chosen container stores, and a
//! tag describing what color space those values are in.

use crate::ImageBuffer;
use alchemy_math::saturate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Container the codec collaborator will write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 16-bit TIFF.
    #[default]
    Tiff,
    /// 10-bit HEIF.
    Heif,
    /// 8-bit JPEG.
    Jpeg,
}

impl OutputFormat {
    /// Bit depth the container stores.
    pub const fn bit_depth(self) -> BitDepth {
        match self {
            Self::Tiff => BitDepth::Sixteen,
            Self::Heif => BitDepth::Ten,
            Self::Jpeg => BitDepth::Eight,
        }
    }
}

/// Integer depth of the final code values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 8 bits per channel.
    Eight,
    /// 10 bits per channel.
    Ten,
    /// 16 bits per channel.
    Sixteen,
}

impl BitDepth {
    /// Bits per channel.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Eight => 8,
            Self::Ten => 10,
            Self::Sixteen => 16,
        }
    }

    /// Largest code value.
    pub const fn max_code(self) -> u16 {
        ((1u32 << self.bits()) - 1) as u16
    }
}

/// Color space metadata for the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorTag {
    /// Values are the named Log curve over the named gamut.
    LogEncoded {
        /// Log curve name, e.g. `S-Log3`.
        curve: String,
        /// Gamut name, e.g. `S-Gamut3.Cine`.
        gamut: String,
    },
    /// A creative LUT was applied; there is no canonical color space.
    LutApplied,
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogEncoded { curve, gamut } => write!(f, "{gamut} / {curve}"),
            Self::LutApplied => f.write_str("LUT applied"),
        }
    }
}

/// Final buffer plus the tags the codec needs.
///
/// Construction consumes the buffer; the result is read-only.
#[derive(Debug, Clone)]
pub struct OutputImage {
    image: ImageBuffer,
    bit_depth: BitDepth,
    color_tag: ColorTag,
}

impl OutputImage {
    /// Packages a finished buffer.
    pub fn new(image: ImageBuffer, bit_depth: BitDepth, color_tag: ColorTag) -> Self {
        Self {
            image,
            bit_depth,
            color_tag,
        }
    }

    /// Floating point code values.
    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    /// Target bit depth.
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Color space tag.
    pub fn color_tag(&self) -> &ColorTag {
        &self.color_tag
    }

    /// Integer code values at [`Self::bit_depth`], clamped to `[0, 1]` first.
    ///
    /// ```rust
    /// use alchemy_core::{BitDepth, ColorTag, ImageBuffer, OutputImage};
    ///
    /// let img = ImageBuffer::filled(1, 1, [0.0, 0.5, 1.5]);
    /// let out = OutputImage::new(img, BitDepth::Eight, ColorTag::LutApplied);
    /// assert_eq!(out.quantize(), vec![0, 128, 255]);
    /// ```
    pub fn quantize(&self) -> Vec<u16> {
        let max = self.bit_depth.max_code() as f32;
        self.image
            .data()
            .iter()
            .map(|&v| (saturate(v) * max).round() as u16)
            .collect()
    }

    /// Unwraps into the buffer and tags.
    pub fn into_parts(self) -> (ImageBuffer, BitDepth, ColorTag) {
        (self.image, self.bit_depth, self.color_tag)
    }
}
