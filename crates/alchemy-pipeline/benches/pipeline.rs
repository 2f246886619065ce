//! Benchmarks for the per-pixel stages and a full pass.
//!
//! Run with: `cargo bench -p alchemy-pipeline`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

use alchemy_core::{CameraMetadata, ImageBuffer};
use alchemy_lut::Lut3D;
use alchemy_ops::AdjustmentSettings;
use alchemy_pipeline::{Pipeline, PipelineConfig};
use alchemy_primaries::{REC2020, rgb_to_xyz_matrix};
use alchemy_transfer::LogSpace;

fn gradient(width: u32, height: u32) -> ImageBuffer {
    let n = (width * height) as usize;
    let data = (0..n)
        .flat_map(|i| {
            let t = i as f32 / n as f32;
            [t * 2.0, t * 1.6, t * 1.2]
        })
        .collect();
    ImageBuffer::from_data(width, height, data).unwrap()
}

/// Log curve encode for a few curve families.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let values: Vec<f32> = (0..10000).map(|i| i as f32 / 1000.0).collect();
    group.throughput(Throughput::Elements(values.len() as u64));

    for space in [LogSpace::SLog3, LogSpace::LogC4, LogSpace::NLog, LogSpace::CanonLog3] {
        let curve = space.curve();
        group.bench_with_input(BenchmarkId::from_parameter(space), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| curve.encode(black_box(x))).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Trilinear LUT sampling at common cube sizes.
fn bench_lut(c: &mut Criterion) {
    let mut group = c.benchmark_group("lut3d");
    let pixels: Vec<[f32; 3]> = (0..10000)
        .map(|i| {
            let t = i as f32 / 10000.0;
            [t, t * 0.8, t * 0.6]
        })
        .collect();
    group.throughput(Throughput::Elements(pixels.len() as u64));

    for size in [17usize, 33, 65] {
        let lut = Lut3D::identity(size);
        group.bench_with_input(BenchmarkId::new("trilinear", size), &pixels, |b, p| {
            b.iter(|| p.iter().map(|&px| lut.apply(black_box(px))).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Whole pipeline, metered and manual.
fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");
    group.sample_size(20);

    let meta = CameraMetadata::new(rgb_to_xyz_matrix(&REC2020).unwrap());
    let image = gradient(1024, 683);
    group.throughput(Throughput::Elements(image.pixel_count() as u64));

    let configs = [
        ("manual", PipelineConfig::new("F-Log2").with_exposure(0.5)),
        ("hybrid", PipelineConfig::new("F-Log2")),
        ("matrix", PipelineConfig::new("F-Log2").with_metering("matrix")),
        (
            "adjusted",
            PipelineConfig::new("F-Log2")
                .with_exposure(0.5)
                .with_adjustments(AdjustmentSettings::camera_boost()),
        ),
    ];
    for (name, cfg) in configs {
        let pipeline = Pipeline::new(cfg).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| pipeline.process(black_box(image.clone()), &meta).unwrap())
        });
    }

    let with_lut = Pipeline::new(PipelineConfig::new("F-Log2").with_exposure(0.5))
        .unwrap()
        .with_lut(Arc::new(Lut3D::identity(33)));
    group.bench_function("lut_33", |b| {
        b.iter(|| with_lut.process(black_box(image.clone()), &meta).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_lut, bench_process);
criterion_main!(benches);
