//! Nikon N-Log.
//!
//! A cube-root toe for shadows and a natural log shoulder, on a 10-bit scale:
//!
//! ```text
//! x <  0.328:  y = (650 / 1023) * cbrt(x + 0.0075)
//! x >= 0.328:  y = (150 / 1023) * ln(x) + shoulder_offset
//! ```
//!
//! The shoulder offset is derived so the pieces meet at 0.328 (published
//! value 619/1023). The cube root is odd, so negative inputs stay finite.

const CUT: f64 = 0.328;
const TOE_SCALE: f64 = 650.0 / 1023.0;
const TOE_OFFSET: f64 = 0.0075;
const LOG_SLOPE: f64 = 150.0 / 1023.0;

/// N-Log with its derived shoulder offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NLog {
    log_offset: f64,
    code_cut: f64,
}

impl NLog {
    /// Derives the shoulder offset and decode cut.
    pub fn new() -> Self {
        let code_cut = toe(CUT);
        Self {
            log_offset: code_cut - LOG_SLOPE * CUT.ln(),
            code_cut,
        }
    }

    /// Scene-linear to code value.
    #[inline]
    pub fn encode(&self, x: f64) -> f64 {
        if x < CUT {
            toe(x)
        } else {
            LOG_SLOPE * x.ln() + self.log_offset
        }
    }

    /// Code value to scene-linear.
    #[inline]
    pub fn decode(&self, y: f64) -> f64 {
        if y < self.code_cut {
            (y / TOE_SCALE).powi(3) - TOE_OFFSET
        } else {
            ((y - self.log_offset) / LOG_SLOPE).exp()
        }
    }
}

impl Default for NLog {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn toe(x: f64) -> f64 {
    TOE_SCALE * (x + TOE_OFFSET).cbrt()
}
