//! Owned RGB image buffer.
//!
//! [`ImageBuffer`] stores `width * height` pixels as interleaved `[r, g, b]`
//! `f32` triples, row by row with no padding. Before the log encode the
//! values are scene-linear and may exceed 1.0 or dip slightly below 0.0;
//! afterwards they are code values.

use crate::{Error, Result};

/// Channels per pixel.
pub const CHANNELS: usize = 3;

/// A three-channel floating point image.
///
/// # Example
///
/// ```rust
/// use alchemy_core::ImageBuffer;
///
/// let mut img = ImageBuffer::filled(4, 2, [0.18, 0.18, 0.18]);
/// img.map_pixels(|[r, g, b]| [r * 2.0, g * 2.0, b * 2.0]);
/// assert_eq!(img.pixel(3, 1), [0.36, 0.36, 0.36]);
/// ```
#[derive(Clone, PartialEq)]
pub struct ImageBuffer {
    data: Vec<f32>,
    width: u32,
    height: u32,
}

impl ImageBuffer {
    /// Wraps packed interleaved RGB data.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if either side is zero or the data length
    /// is not `width * height * 3`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = packed_len(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self { data, width, height })
    }

    /// Copies a decoder buffer whose rows are `row_stride` samples apart.
    ///
    /// Decoders often pad rows; the padding is dropped here.
    pub fn from_strided(width: u32, height: u32, row_stride: usize, src: &[f32]) -> Result<Self> {
        let row_len = width as usize * CHANNELS;
        if row_stride < row_len {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("row stride {row_stride} is less than {row_len}"),
            ));
        }
        packed_len(width, height)?;
        let needed = (height as usize - 1) * row_stride + row_len;
        if src.len() < needed {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected at least {} samples, got {}", needed, src.len()),
            ));
        }
        let mut data = Vec::with_capacity(row_len * height as usize);
        for row in src.chunks(row_stride).take(height as usize) {
            data.extend_from_slice(&row[..row_len]);
        }
        Ok(Self { data, width, height })
    }

    /// A buffer with every pixel set to `pixel`.
    ///
    /// Zero-sized requests produce an empty buffer, which later stages reject.
    pub fn filled(width: u32, height: u32, pixel: [f32; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self { data, width, height }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Interleaved samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable interleaved samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the buffer, returning its samples.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If the coordinate is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 3] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Iterates pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.data.chunks_exact(CHANNELS).map(|c| [c[0], c[1], c[2]])
    }

    /// Applies `f` to every pixel in place, sequentially.
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn([f32; 3]) -> [f32; 3],
    {
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            let out = f([chunk[0], chunk[1], chunk[2]]);
            chunk.copy_from_slice(&out);
        }
    }
}

impl std::fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("samples", &self.data.len())
            .finish()
    }
}

fn packed_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "size overflows"))
}
