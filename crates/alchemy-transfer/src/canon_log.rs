//! Canon Log 2 and Canon Log 3.
//!
//! Both curves are odd-symmetric logarithms around a black code value, with
//! input scaled by `1 / 0.9` first. Canon Log 3 adds a straight segment for
//! `|x| <= 0.014` (after scaling):
//!
//! ```text
//! x >  lin_break:  y = pos_offset + log_slope * log10( x * lin_scale + 1)
//! |x| <= lin_break: y = lin_offset + lin_slope * x
//! x < -lin_break:  y = neg_offset - log_slope * log10(-x * lin_scale + 1)
//! ```
//!
//! Canon Log 2 is the same family with `lin_break = 0`. The log offsets are
//! derived from the straight segment so the three pieces join without a step.

/// Published constants of a Canon log curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonLogParams {
    /// Half-width of the straight segment, in scaled linear units.
    pub lin_break: f64,
    /// Slope of the straight segment.
    pub lin_slope: f64,
    /// Code value of black.
    pub lin_offset: f64,
    /// Scale applied to the logarithm.
    pub log_slope: f64,
    /// Scale applied to linear input inside the logarithm.
    pub lin_scale: f64,
    /// Input normalization; linear values are divided by it.
    pub norm: f64,
}

/// Canon Log 2.
pub const CANON_LOG2: CanonLogParams = CanonLogParams {
    lin_break: 0.0,
    // tangent at black: 0.24136077 * 87.099375 / ln(10)
    lin_slope: 9.129_7,
    lin_offset: 0.092864125,
    log_slope: 0.24136077,
    lin_scale: 87.099375,
    norm: 0.9,
};

/// Canon Log 3.
pub const CANON_LOG3: CanonLogParams = CanonLogParams {
    lin_break: 0.014,
    lin_slope: 1.9754798,
    lin_offset: 0.12512219,
    log_slope: 0.36726845,
    lin_scale: 14.98325,
    norm: 0.9,
};

/// A Canon log curve with derived join offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonLog {
    params: CanonLogParams,
    pos_offset: f64,
    neg_offset: f64,
    cut_low: f64,
    cut_high: f64,
}

impl CanonLog {
    /// Derives the log offsets and decode cuts.
    pub fn new(params: CanonLogParams) -> Self {
        let p = &params;
        let knee = p.log_slope * (p.lin_break * p.lin_scale + 1.0).log10();
        let cut_high = p.lin_offset + p.lin_slope * p.lin_break;
        let cut_low = p.lin_offset - p.lin_slope * p.lin_break;
        Self {
            params,
            pos_offset: cut_high - knee,
            neg_offset: cut_low + knee,
            cut_low,
            cut_high,
        }
    }

    /// Scene-linear to code value.
    #[inline]
    pub fn encode(&self, linear: f64) -> f64 {
        let p = &self.params;
        let x = linear / p.norm;
        if x > p.lin_break {
            self.pos_offset + p.log_slope * (x * p.lin_scale + 1.0).log10()
        } else if x >= -p.lin_break {
            p.lin_offset + p.lin_slope * x
        } else {
            self.neg_offset - p.log_slope * (-x * p.lin_scale + 1.0).log10()
        }
    }

    /// Code value to scene-linear.
    #[inline]
    pub fn decode(&self, y: f64) -> f64 {
        let p = &self.params;
        let x = if y > self.cut_high {
            (10.0_f64.powf((y - self.pos_offset) / p.log_slope) - 1.0) / p.lin_scale
        } else if y >= self.cut_low {
            (y - p.lin_offset) / p.lin_slope
        } else {
            -(10.0_f64.powf((self.neg_offset - y) / p.log_slope) - 1.0) / p.lin_scale
        };
        x * p.norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn clog2_offsets_equal_black() {
        let c = CanonLog::new(CANON_LOG2);
        assert_eq!(c.pos_offset, CANON_LOG2.lin_offset);
        assert_eq!(c.neg_offset, CANON_LOG2.lin_offset);
        assert_abs_diff_eq!(c.encode(0.0), 0.092864125, epsilon = 1e-12);
    }

    #[test]
    fn clog3_offsets_close_to_published() {
        let c = CanonLog::new(CANON_LOG3);
        assert_abs_diff_eq!(c.pos_offset, 0.12240537, epsilon = 5e-5);
        assert_abs_diff_eq!(c.neg_offset, 0.12783901, epsilon = 5e-5);
    }

    #[test]
    fn clog3_mid_gray() {
        // Canon Log 3 places 18% near 0.343
        let c = CanonLog::new(CANON_LOG3);
        assert_abs_diff_eq!(c.encode(0.18), 0.343, epsilon = 2e-3);
    }

    #[test]
    fn odd_symmetry_around_black() {
        let c = CanonLog::new(CANON_LOG2);
        let up = c.encode(0.05) - c.encode(0.0);
        let down = c.encode(0.0) - c.encode(-0.05);
        assert_abs_diff_eq!(up, down, epsilon = 1e-12);
    }
}
