//! Encode/decode inverse checks for every registered Log space.

use alchemy_transfer::{LogRegistry, LogSpace};
use approx::assert_relative_eq;

const SAMPLES: usize = 4001;

fn linear_samples() -> impl Iterator<Item = f64> {
    (0..SAMPLES).map(|i| -0.01 + 16.01 * i as f64 / (SAMPLES - 1) as f64)
}

fn code_samples() -> impl Iterator<Item = f64> {
    (0..SAMPLES).map(|i| i as f64 / (SAMPLES - 1) as f64)
}

#[test]
fn decode_inverts_encode_over_scene_range() {
    for (space, curve) in LogRegistry::global().iter() {
        for x in linear_samples() {
            let y = curve.encode_f64(x);
            assert!(y.is_finite(), "{space}: encode({x}) = {y}");
            let back = curve.decode_f64(y);
            assert_relative_eq!(back, x, max_relative = 1e-5, epsilon = 1e-9);
        }
    }
}

#[test]
fn encode_inverts_decode_over_code_range() {
    for (space, curve) in LogRegistry::global().iter() {
        for y in code_samples() {
            let x = curve.decode_f64(y);
            assert!(x.is_finite(), "{space}: decode({y}) = {x}");
            let back = curve.encode_f64(x);
            assert_relative_eq!(back, y, max_relative = 1e-5, epsilon = 1e-9);
        }
    }
}

#[test]
fn encode_is_monotonic() {
    for (space, curve) in LogRegistry::global().iter() {
        let mut prev = f64::NEG_INFINITY;
        for x in linear_samples() {
            let y = curve.encode_f64(x);
            assert!(y > prev, "{space}: not increasing at {x}");
            prev = y;
        }
    }
}

#[test]
fn single_precision_round_trip() {
    for space in LogSpace::ALL {
        let curve = space.curve();
        for x in [-0.01f32, 0.0, 0.001, 0.18, 1.0, 4.0, 16.0] {
            let back = curve.decode(curve.encode(x));
            assert_relative_eq!(back, x, max_relative = 1e-4, epsilon = 1e-6);
        }
    }
}

#[test]
fn published_middle_gray() {
    let cases = [
        (LogSpace::SLog3, 0.4106),
        (LogSpace::LogC3, 0.3910),
        (LogSpace::LogC4, 0.2784),
        (LogSpace::VLog, 0.4233),
        (LogSpace::FLog2, 0.3910),
    ];
    for (space, expected) in cases {
        let gray = space.curve().middle_gray();
        assert!((gray - expected).abs() < 1e-3, "{space}: {gray}");
    }
}
