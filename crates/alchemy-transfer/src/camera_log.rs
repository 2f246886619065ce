//! Two-segment camera log curve.
//!
//! Most camera Log standards share one shape: a straight line through black
//! joined at a break point to a logarithm.
//!
//! ```text
//! x >= lin_side_break:  y = log_side_slope * log_base(lin_side_slope * x + lin_side_offset) + log_side_offset
//! x <  lin_side_break:  y = linear_slope * x + linear_offset
//! ```
//!
//! Only the log segment and the break are taken from the published curves.
//! The linear offset is always derived so both segments meet exactly at the
//! break; the linear slope is either the published one or, when absent, the
//! tangent of the log segment (C1 join). The decode break is the encoded
//! break, so decode is the exact inverse of encode on both sides.
//!
//! Inputs below the break continue along the line (negative values from
//! gamut overshoot stay finite); inputs above continue along the log.

/// Published constants of one camera log curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraLogParams {
    /// Logarithm base (10 for most, 2 for LogC4).
    pub base: f64,
    /// Scale applied to the logarithm.
    pub log_side_slope: f64,
    /// Offset added after the logarithm.
    pub log_side_offset: f64,
    /// Scale applied to linear input inside the logarithm.
    pub lin_side_slope: f64,
    /// Offset added to scaled linear input inside the logarithm.
    pub lin_side_offset: f64,
    /// Scene-linear value where the line hands over to the log.
    pub lin_side_break: f64,
    /// Published slope of the line, or `None` to use the log's tangent.
    pub linear_slope: Option<f64>,
}

/// A camera log curve with its derived linear segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraLog {
    params: CameraLogParams,
    linear_slope: f64,
    linear_offset: f64,
    log_side_break: f64,
}

impl CameraLog {
    /// Derives the linear segment from published constants.
    pub fn new(params: CameraLogParams) -> Self {
        let p = &params;
        let log_side_break = log_segment(p, p.lin_side_break);
        let linear_slope = p.linear_slope.unwrap_or_else(|| {
            let lin_at_break = p.lin_side_slope * p.lin_side_break + p.lin_side_offset;
            p.log_side_slope * p.lin_side_slope / (lin_at_break * p.base.ln())
        });
        let linear_offset = log_side_break - linear_slope * p.lin_side_break;
        Self {
            params,
            linear_slope,
            linear_offset,
            log_side_break,
        }
    }

    /// Published constants.
    pub fn params(&self) -> &CameraLogParams {
        &self.params
    }

    /// Code value at the break point.
    pub fn log_side_break(&self) -> f64 {
        self.log_side_break
    }

    /// Slope and offset of the linear segment.
    pub fn linear_segment(&self) -> (f64, f64) {
        (self.linear_slope, self.linear_offset)
    }

    /// Scene-linear to code value.
    #[inline]
    pub fn encode(&self, x: f64) -> f64 {
        if x >= self.params.lin_side_break {
            log_segment(&self.params, x)
        } else {
            self.linear_slope * x + self.linear_offset
        }
    }

    /// Code value to scene-linear.
    #[inline]
    pub fn decode(&self, y: f64) -> f64 {
        let p = &self.params;
        if y >= self.log_side_break {
            (p.base.powf((y - p.log_side_offset) / p.log_side_slope) - p.lin_side_offset)
                / p.lin_side_slope
        } else {
            (y - self.linear_offset) / self.linear_slope
        }
    }
}

#[inline]
fn log_segment(p: &CameraLogParams, x: f64) -> f64 {
    p.log_side_slope * (p.lin_side_slope * x + p.lin_side_offset).log(p.base) + p.log_side_offset
}

/// Sony S-Log3.
pub const S_LOG3: CameraLogParams = CameraLogParams {
    base: 10.0,
    log_side_slope: 261.5 / 1023.0,
    log_side_offset: 420.0 / 1023.0,
    lin_side_slope: 1.0 / 0.19,
    lin_side_offset: 0.01 / 0.19,
    lin_side_break: 0.01125,
    linear_slope: Some((171.2102946929 - 95.0) / 0.01125 / 1023.0),
};

/// Panasonic V-Log.
pub const V_LOG: CameraLogParams = CameraLogParams {
    base: 10.0,
    log_side_slope: 0.241514,
    log_side_offset: 0.598206,
    lin_side_slope: 1.0,
    lin_side_offset: 0.00873,
    lin_side_break: 0.01,
    linear_slope: Some(5.6),
};

/// ARRI LogC3 at EI 800.
pub const LOG_C3: CameraLogParams = CameraLogParams {
    base: 10.0,
    log_side_slope: 0.247190,
    log_side_offset: 0.385537,
    lin_side_slope: 5.555556,
    lin_side_offset: 0.052272,
    lin_side_break: 0.010591,
    linear_slope: Some(5.367655),
};

/// ARRI LogC4. Base 2, linear slope is the log tangent.
pub const LOG_C4: CameraLogParams = CameraLogParams {
    base: 2.0,
    log_side_slope: 0.0647954196341293,
    log_side_offset: -0.295908392682586,
    lin_side_slope: 2231.82630906769,
    lin_side_offset: 64.0,
    lin_side_break: -0.0180569961199113,
    linear_slope: None,
};

/// Fujifilm F-Log.
pub const F_LOG: CameraLogParams = CameraLogParams {
    base: 10.0,
    log_side_slope: 0.344676,
    log_side_offset: 0.790453,
    lin_side_slope: 0.555556,
    lin_side_offset: 0.009468,
    lin_side_break: 0.00089,
    linear_slope: Some(8.735631),
};

/// Fujifilm F-Log2 (also used with F-Gamut C).
pub const F_LOG2: CameraLogParams = CameraLogParams {
    base: 10.0,
    log_side_slope: 0.245281,
    log_side_offset: 0.384316,
    lin_side_slope: 5.555556,
    lin_side_offset: 0.064829,
    lin_side_break: 0.000889,
    linear_slope: Some(8.799461),
};

/// DJI D-Log.
pub const D_LOG: CameraLogParams = CameraLogParams {
    base: 10.0,
    log_side_slope: 0.256663,
    log_side_offset: 0.584555,
    lin_side_slope: 0.9892,
    lin_side_offset: 0.0108,
    lin_side_break: 0.0078,
    linear_slope: Some(6.025),
};

/// Leica L-Log.
pub const L_LOG: CameraLogParams = CameraLogParams {
    base: 10.0,
    log_side_slope: 0.27,
    log_side_offset: 0.6,
    lin_side_slope: 1.3,
    lin_side_offset: 0.0115,
    lin_side_break: 0.006,
    linear_slope: Some(8.0),
};

/// RED Log3G10. The break sits at -0.01 where the log argument is 1.
pub const LOG3G10: CameraLogParams = CameraLogParams {
    base: 10.0,
    log_side_slope: 0.224282,
    log_side_offset: 0.0,
    lin_side_slope: 155.975327,
    lin_side_offset: 0.01 * 155.975327 + 1.0,
    lin_side_break: -0.01,
    linear_slope: Some(15.1927),
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn s_log3_published_points() {
        let c = CameraLog::new(S_LOG3);
        assert_abs_diff_eq!(c.encode(0.18), 420.0 / 1023.0, epsilon = 1e-12);
        // black lands on code 95 up to the continuity adjustment
        assert_abs_diff_eq!(c.encode(0.0) * 1023.0, 95.0, epsilon = 0.01);
    }

    #[test]
    fn log_c4_matches_known_values() {
        let c = CameraLog::new(LOG_C4);
        assert_abs_diff_eq!(c.encode(0.18), 0.278, epsilon = 1e-3);
        assert_abs_diff_eq!(c.encode(0.0), 0.092, epsilon = 1e-3);
    }

    #[test]
    fn log_c3_linear_offset_is_published() {
        let (slope, offset) = CameraLog::new(LOG_C3).linear_segment();
        assert_eq!(slope, 5.367655);
        assert_abs_diff_eq!(offset, 0.092809, epsilon = 1e-5);
    }

    #[test]
    fn log3g10_toe_passes_through_scaled_offset() {
        let c = CameraLog::new(LOG3G10);
        assert_abs_diff_eq!(c.log_side_break(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.encode(-0.02), 15.1927 * (-0.01), epsilon = 1e-9);
    }

    #[test]
    fn segments_meet_at_break() {
        for p in [S_LOG3, V_LOG, LOG_C3, LOG_C4, F_LOG, F_LOG2, D_LOG, L_LOG, LOG3G10] {
            let c = CameraLog::new(p);
            let b = p.lin_side_break;
            let (slope, offset) = c.linear_segment();
            assert_abs_diff_eq!(slope * b + offset, c.encode(b), epsilon = 1e-12);
        }
    }
}
