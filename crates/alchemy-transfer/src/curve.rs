//! Unified encode/decode interface over the curve families.

use crate::camera_log::CameraLog;
use crate::canon_log::CanonLog;
use crate::n_log::NLog;

/// One camera Log transfer function.
///
/// Each variant carries its own constants; callers only see
/// [`encode`](Self::encode) / [`decode`](Self::decode). Math runs in `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogCurve {
    /// Line-plus-log curves (S-Log3, V-Log, LogC3/4, F-Log, D-Log, L-Log, Log3G10).
    Camera(CameraLog),
    /// Odd-symmetric Canon curves.
    Canon(CanonLog),
    /// Nikon N-Log.
    Nikon(NLog),
}

impl LogCurve {
    /// Scene-linear to code value, `f64`.
    #[inline]
    pub fn encode_f64(&self, x: f64) -> f64 {
        match self {
            Self::Camera(c) => c.encode(x),
            Self::Canon(c) => c.encode(x),
            Self::Nikon(c) => c.encode(x),
        }
    }

    /// Code value to scene-linear, `f64`.
    #[inline]
    pub fn decode_f64(&self, y: f64) -> f64 {
        match self {
            Self::Camera(c) => c.decode(y),
            Self::Canon(c) => c.decode(y),
            Self::Nikon(c) => c.decode(y),
        }
    }

    /// Scene-linear to code value.
    #[inline]
    pub fn encode(&self, x: f32) -> f32 {
        self.encode_f64(x as f64) as f32
    }

    /// Code value to scene-linear.
    #[inline]
    pub fn decode(&self, y: f32) -> f32 {
        self.decode_f64(y as f64) as f32
    }

    /// Encodes each channel of a pixel.
    #[inline]
    pub fn encode_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        rgb.map(|v| self.encode(v))
    }

    /// Decodes each channel of a pixel.
    #[inline]
    pub fn decode_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        rgb.map(|v| self.decode(v))
    }

    /// Code value of 18% gray, the contrast pivot.
    pub fn middle_gray(&self) -> f32 {
        self.encode(0.18)
    }
}
