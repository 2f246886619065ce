//! Tonal operators on Log-encoded code values.
//!
//! These run after the transfer function, on values nominally in `[0, 1]`,
//! because that is the domain colorists tune saturation and contrast in on
//! Log footage. Each is parameterized by a signed magnitude and returns its
//! input untouched at zero.

/// Rec.709 luma weights for the gray reference.
const LUMA_REC709: [f32; 3] = [0.2126, 0.7152, 0.0722];

#[inline]
fn luma(rgb: [f32; 3]) -> f32 {
    rgb[0] * LUMA_REC709[0] + rgb[1] * LUMA_REC709[1] + rgb[2] * LUMA_REC709[2]
}

/// Chroma scale around luma.
///
/// ```text
/// out = gray + (in - gray) * (1 + amount)
/// ```
///
/// `-1` is fully desaturated; positive values extrapolate away from gray.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Saturation {
    /// Signed amount; 0 is identity.
    pub amount: f32,
}

impl Saturation {
    /// Creates the operator.
    pub fn new(amount: f32) -> Self {
        Self { amount }
    }

    /// True when `amount == 0`.
    pub fn is_identity(&self) -> bool {
        self.amount == 0.0
    }

    /// Applies to one pixel.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        if self.is_identity() {
            return rgb;
        }
        let gray = luma(rgb);
        let k = 1.0 + self.amount;
        rgb.map(|c| gray + (c - gray) * k)
    }
}

/// S-curve around a pivot code value.
///
/// With `k = 1 + amount`:
///
/// ```text
/// v <= p:      p * (v / p)^k
/// p < v <= 1:  1 - (1 - p) * ((1 - v) / (1 - p))^k
/// ```
///
/// The pivot, 0 and 1 are fixed points and the curve is monotonic for any
/// `amount > -1`. Values outside `[0, 1]` pass through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contrast {
    /// Signed amount, `> -1`; 0 is identity.
    pub amount: f32,
    /// Code value of middle gray in the active Log curve.
    pub pivot: f32,
}

impl Contrast {
    /// Creates the operator pivoting at `pivot`.
    pub fn new(amount: f32, pivot: f32) -> Self {
        Self { amount, pivot }
    }

    /// True when `amount == 0`.
    pub fn is_identity(&self) -> bool {
        self.amount == 0.0
    }

    #[inline]
    fn curve(&self, v: f32) -> f32 {
        let p = self.pivot;
        let k = 1.0 + self.amount;
        if !(0.0..=1.0).contains(&v) {
            v
        } else if v <= p {
            p * (v / p).powf(k)
        } else {
            1.0 - (1.0 - p) * ((1.0 - v) / (1.0 - p)).powf(k)
        }
    }

    /// Applies to one pixel.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        if self.is_identity() {
            return rgb;
        }
        rgb.map(|v| self.curve(v))
    }
}

/// Soft rolloff above a highlight threshold and below a shadow threshold.
///
/// Above `Th`, with `u = v - Th` and `a = highlight / (1 - Th)`:
///
/// ```text
/// a >= 0:  Th + u / (1 + a * u)        (compress toward Th)
/// a <  0:  Th + u * (1 + |a| * u)      (expand away from Th)
/// ```
///
/// Shadows mirror this below `Ts` with `u = Ts - v` and `a = shadow / Ts`.
/// Both branches have unit slope at the threshold, so the knee is smooth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightShadow {
    /// Highlight rolloff; positive compresses.
    pub highlight: f32,
    /// Shadow rolloff; positive compresses (lifts toward the threshold).
    pub shadow: f32,
    /// Code value where highlight rolloff starts.
    pub highlight_threshold: f32,
    /// Code value where shadow rolloff starts.
    pub shadow_threshold: f32,
}

impl Default for HighlightShadow {
    fn default() -> Self {
        Self {
            highlight: 0.0,
            shadow: 0.0,
            highlight_threshold: 0.65,
            shadow_threshold: 0.25,
        }
    }
}

impl HighlightShadow {
    /// True when both magnitudes are zero.
    pub fn is_identity(&self) -> bool {
        self.highlight == 0.0 && self.shadow == 0.0
    }

    #[inline]
    fn rolloff(u: f32, a: f32) -> f32 {
        if a >= 0.0 {
            u / (1.0 + a * u)
        } else {
            u * (1.0 - a * u)
        }
    }

    #[inline]
    fn channel(&self, v: f32) -> f32 {
        let th = self.highlight_threshold;
        let ts = self.shadow_threshold;
        if self.highlight != 0.0 && v > th {
            let a = self.highlight / (1.0 - th);
            th + Self::rolloff(v - th, a)
        } else if self.shadow != 0.0 && v < ts {
            let a = self.shadow / ts;
            ts - Self::rolloff(ts - v, a)
        } else {
            v
        }
    }

    /// Applies to one pixel.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        if self.is_identity() {
            return rgb;
        }
        rgb.map(|v| self.channel(v))
    }
}
