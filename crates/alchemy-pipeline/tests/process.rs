//! End-to-end processing through the public API.

use alchemy_core::{BitDepth, CameraMetadata, ColorTag, ImageBuffer, OutputFormat, SensorLevels};
use alchemy_lut::Lut3D;
use alchemy_ops::AdjustmentSettings;
use alchemy_pipeline::{Pipeline, PipelineConfig, PipelineError, Stage};
use alchemy_primaries::{D50_XY, PROPHOTO_RGB, rgb_to_xyz_matrix};
use alchemy_transfer::LogSpace;
use approx::assert_abs_diff_eq;
use std::io::Write;
use std::sync::Arc;

/// A camera whose native space is ProPhoto, so native to reference is the
/// identity and neutrals stay neutral through every gamut matrix.
fn prophoto_camera() -> CameraMetadata {
    CameraMetadata::new(rgb_to_xyz_matrix(&PROPHOTO_RGB).unwrap()).with_matrix_white(D50_XY)
}

fn encoded(space: LogSpace, linear: f32) -> f32 {
    space.curve().encode(linear)
}

fn assert_gray(out: &ImageBuffer, expected: f32, eps: f32) {
    for px in out.pixels() {
        for c in px {
            assert_abs_diff_eq!(c, expected, epsilon = eps);
        }
    }
}

#[test]
fn middle_gray_lands_on_curve_middle_gray() {
    let pipeline = Pipeline::new(PipelineConfig::new("S-Log3").with_exposure(0.0)).unwrap();
    let out = pipeline
        .process(ImageBuffer::filled(2, 2, [0.18; 3]), &prophoto_camera())
        .unwrap();

    assert_gray(out.image(), encoded(LogSpace::SLog3, 0.18), 1e-4);
    assert_eq!(
        out.color_tag(),
        &ColorTag::LogEncoded { curve: "S-Log3".into(), gamut: "S-Gamut3".into() }
    );
    assert_eq!(out.bit_depth(), BitDepth::Sixteen);
}

#[test]
fn every_log_space_encodes_neutral_gray() {
    for space in LogSpace::ALL {
        let pipeline = Pipeline::new(PipelineConfig::new(space.name()).with_exposure(0.0)).unwrap();
        let out = pipeline
            .process(ImageBuffer::filled(3, 2, [0.18; 3]), &prophoto_camera())
            .unwrap();
        assert_gray(out.image(), encoded(space, 0.18), 5e-4);
    }
}

#[test]
fn manual_exposure_overrides_every_metering_mode() {
    let image = ImageBuffer::filled(8, 8, [0.02; 3]);
    let reference = Pipeline::new(PipelineConfig::new("F-Log2").with_exposure(1.0))
        .unwrap()
        .process(image.clone(), &prophoto_camera())
        .unwrap();
    assert_gray(reference.image(), encoded(LogSpace::FLog2, 0.04), 1e-4);

    for mode in ["average", "center-weighted", "highlight-safe", "matrix", "hybrid"] {
        let cfg = PipelineConfig::new("F-Log2").with_exposure(1.0).with_metering(mode);
        let out = Pipeline::new(cfg)
            .unwrap()
            .process(image.clone(), &prophoto_camera())
            .unwrap();
        assert_eq!(out.image(), reference.image(), "{mode}");
    }
}

#[test]
fn average_metering_brings_two_tone_frame_to_target() {
    // half 0.02, half 0.08: log-average 0.04, so +log2(0.18 / 0.04) stops
    let mut data = Vec::new();
    for i in 0..64 {
        let v = if i % 2 == 0 { 0.02 } else { 0.08 };
        data.extend_from_slice(&[v, v, v]);
    }
    let image = ImageBuffer::from_data(8, 8, data).unwrap();
    let pipeline = Pipeline::new(PipelineConfig::new("V-Log").with_metering("average")).unwrap();
    let out = pipeline.process(image, &prophoto_camera()).unwrap();

    let gain = 0.18 / 0.04;
    assert_abs_diff_eq!(out.image().pixel(0, 0)[1], encoded(LogSpace::VLog, 0.02 * gain), epsilon = 1e-4);
    assert_abs_diff_eq!(out.image().pixel(1, 0)[1], encoded(LogSpace::VLog, 0.08 * gain), epsilon = 1e-4);
}

#[test]
fn highlight_safe_pulls_very_bright_frames_below_clip() {
    // 100.0 linear needs about -6.8 stops to reach the 0.9 clip threshold
    let clip = encoded(LogSpace::SLog3, 0.9);
    for mode in ["highlight-safe", "hybrid"] {
        let pipeline = Pipeline::new(PipelineConfig::new("S-Log3").with_metering(mode)).unwrap();
        let out = pipeline
            .process(ImageBuffer::filled(10, 10, [100.0; 3]), &prophoto_camera())
            .unwrap();
        for px in out.image().pixels() {
            assert!(px[1] <= clip + 1e-4, "{mode}: {} above {clip}", px[1]);
            assert_abs_diff_eq!(px[1], clip, epsilon = 1e-3);
        }
    }
}

#[test]
fn sensor_levels_are_normalized_before_encoding() {
    let levels = SensorLevels::from_bit_depth(14, 512.0);
    let meta = prophoto_camera().with_levels(levels);
    let raw = 512.0 + 0.18 * (levels.white[0] - 512.0);

    let pipeline = Pipeline::new(PipelineConfig::new("LogC4").with_exposure(0.0)).unwrap();
    let out = pipeline.process(ImageBuffer::filled(2, 2, [raw; 3]), &meta).unwrap();
    assert_gray(out.image(), encoded(LogSpace::LogC4, 0.18), 1e-4);
}

#[test]
fn zero_adjustments_match_no_adjustments() {
    let image = ImageBuffer::from_data(2, 1, vec![0.05, 0.2, 0.6, 1.5, 0.4, 0.01]).unwrap();
    let plain = Pipeline::new(PipelineConfig::new("D-Log").with_exposure(0.5)).unwrap();

    let zeroed = AdjustmentSettings {
        temperature: 0.0,
        tint: 0.0,
        saturation: 0.0,
        contrast: 0.0,
        highlight: 0.0,
        shadow: 0.0,
        ..Default::default()
    };
    let explicit = Pipeline::new(
        PipelineConfig::new("D-Log").with_exposure(0.5).with_adjustments(zeroed),
    )
    .unwrap();

    assert_eq!(plain.plan(), explicit.plan());
    let a = plain.process(image.clone(), &prophoto_camera()).unwrap();
    let b = explicit.process(image, &prophoto_camera()).unwrap();
    assert_eq!(a.image(), b.image());
}

#[test]
fn adjustments_change_output_but_keep_shape() {
    let image = ImageBuffer::from_data(2, 1, vec![0.05, 0.2, 0.6, 1.5, 0.4, 0.01]).unwrap();
    let base = Pipeline::new(PipelineConfig::new("N-Log").with_exposure(0.0)).unwrap();
    let boosted = Pipeline::new(
        PipelineConfig::new("N-Log")
            .with_exposure(0.0)
            .with_adjustments(AdjustmentSettings::camera_boost()),
    )
    .unwrap();
    assert!(boosted.plan().contains(Stage::Saturation));
    assert!(boosted.plan().contains(Stage::Contrast));

    let a = base.process(image.clone(), &prophoto_camera()).unwrap();
    let b = boosted.process(image, &prophoto_camera()).unwrap();
    assert_eq!(a.image().dimensions(), b.image().dimensions());
    assert_ne!(a.image(), b.image());
}

#[test]
fn identity_lut_file_leaves_encoded_values() {
    let mut file = tempfile::Builder::new().suffix(".cube").tempfile().unwrap();
    writeln!(file, "TITLE \"identity\"").unwrap();
    writeln!(file, "LUT_3D_SIZE 2").unwrap();
    for b in 0..2 {
        for g in 0..2 {
            for r in 0..2 {
                writeln!(file, "{r}.0 {g}.0 {b}.0").unwrap();
            }
        }
    }
    file.flush().unwrap();

    let pipeline = Pipeline::new(
        PipelineConfig::new("S-Log3.Cine")
            .with_exposure(0.0)
            .with_lut(file.path()),
    )
    .unwrap();
    assert_eq!(pipeline.plan().stages().last(), Some(&Stage::Lut));
    assert_eq!(pipeline.lut().map(|l| l.size()), Some(2));

    let out = pipeline
        .process(ImageBuffer::filled(2, 2, [0.18; 3]), &prophoto_camera())
        .unwrap();
    assert_gray(out.image(), encoded(LogSpace::SLog3Cine, 0.18), 1e-4);
    assert_eq!(out.color_tag(), &ColorTag::LutApplied);
}

#[test]
fn shared_lut_is_applied_last() {
    // constant LUT: every input maps to the same color
    let lut = Lut3D::from_data(vec![[0.25, 0.5, 0.75]; 8], 2).unwrap();
    let pipeline = Pipeline::new(PipelineConfig::new("Log3G10").with_exposure(0.0))
        .unwrap()
        .with_lut(Arc::new(lut));

    let out = pipeline
        .process(ImageBuffer::filled(3, 3, [0.3, 0.1, 0.7]), &prophoto_camera())
        .unwrap();
    for px in out.image().pixels() {
        assert_abs_diff_eq!(px[0], 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(px[1], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(px[2], 0.75, epsilon = 1e-6);
    }
}

#[test]
fn malformed_lut_fails_at_construction() {
    let mut file = tempfile::Builder::new().suffix(".cube").tempfile().unwrap();
    writeln!(file, "LUT_3D_SIZE 2\n0 0 0\n1 0 0").unwrap();
    file.flush().unwrap();

    let err = Pipeline::new(PipelineConfig::new("F-Log").with_lut(file.path())).unwrap_err();
    assert!(matches!(err, PipelineError::Lut(_)));
    assert!(err.to_string().starts_with("Invalid LUT"), "{err}");
}

#[test]
fn missing_lut_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Pipeline::new(PipelineConfig::new("F-Log").with_lut(dir.path().join("gone.cube")))
        .unwrap_err();
    assert!(err.to_string().starts_with("cannot read LUT"), "{err}");
}

#[test]
fn unknown_names_fail_at_construction() {
    let err = Pipeline::new(PipelineConfig::new("Cineon")).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported Log Space: Cineon");

    let err = Pipeline::new(PipelineConfig::new("F-Log2").with_metering("spot")).unwrap_err();
    assert_eq!(err.to_string(), "Unknown Metering Mode: spot");
}

#[test]
fn missing_color_matrix_fails_before_processing() {
    let pipeline = Pipeline::new(PipelineConfig::new("F-Log2")).unwrap();
    let err = pipeline
        .process(ImageBuffer::filled(2, 2, [0.18; 3]), &CameraMetadata::without_matrix())
        .unwrap_err();
    assert!(err.to_string().starts_with("Missing Color Matrix"), "{err}");
}

#[test]
fn output_format_sets_bit_depth() {
    let pipeline = Pipeline::new(
        PipelineConfig::new("Canon Log 3")
            .with_exposure(0.0)
            .with_output(OutputFormat::Jpeg),
    )
    .unwrap();
    let out = pipeline
        .process(ImageBuffer::filled(1, 1, [0.18; 3]), &prophoto_camera())
        .unwrap();
    assert_eq!(out.bit_depth(), BitDepth::Eight);
    let code = out.quantize()[0] as f32;
    assert!((code - encoded(LogSpace::CanonLog3, 0.18) * 255.0).abs() <= 0.51, "{code}");
}

#[test]
fn processing_is_deterministic_and_thread_safe() {
    let (w, h) = (181u32, 97u32);
    let data: Vec<f32> = (0..w * h * 3)
        .map(|i| 0.001 + (i as f32 * 0.618_034).fract() * 2.0)
        .collect();
    let image = ImageBuffer::from_data(w, h, data).unwrap();
    let meta = prophoto_camera().with_wb_multipliers([2.1, 1.0, 1.6]);
    let pipeline = Pipeline::new(
        PipelineConfig::new("L-Log")
            .with_metering("hybrid")
            .with_adjustments(AdjustmentSettings { highlight: 0.3, ..AdjustmentSettings::camera_boost() }),
    )
    .unwrap();

    let first = pipeline.process(image.clone(), &meta).unwrap();
    let second = pipeline.process(image.clone(), &meta).unwrap();
    assert_eq!(first.image().data(), second.image().data());

    let threaded: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| pipeline.process(image.clone(), &meta).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for out in threaded {
        assert_eq!(out.image().data(), first.image().data());
    }
}
