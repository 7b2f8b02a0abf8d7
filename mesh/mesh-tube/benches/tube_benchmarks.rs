//! Benchmarks for frame propagation and tube generation.
//!
//! Run with: cargo bench -p mesh-tube
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-tube -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-tube -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use curve_frames::{BSpline, CurveSampler, Frame, RmfConfig, rotation_minimizing_frames};
use mesh_tube::{TubeConfig, tube_from_curve, tube_from_frames};
use nalgebra::Point3;

// =============================================================================
// Test Curve Generation
// =============================================================================

/// Clamped cubic through a fixed set of control points.
fn create_spline() -> BSpline {
    let control_points = vec![
        Point3::new(100.0, 200.0, 0.0),
        Point3::new(150.0, 220.0, 10.0),
        Point3::new(190.0, 120.0, 50.0),
        Point3::new(260.0, 70.0, 30.0),
        Point3::new(300.0, 200.0, 20.0),
    ];
    // Control points are distinct and degree fits the point count
    match BSpline::clamped(control_points, 3) {
        Ok(spline) => spline,
        Err(err) => panic!("benchmark spline is invalid: {err}"),
    }
}

fn create_frames(spline: &BSpline, samples: usize) -> Vec<Frame> {
    let params = spline.uniform_parameters(samples);
    match rotation_minimizing_frames(spline, &params, &RmfConfig::default()) {
        Ok(frames) => frames,
        Err(err) => panic!("benchmark frames failed: {err}"),
    }
}

// =============================================================================
// Frame Benchmarks
// =============================================================================

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("RotationMinimizingFrames");
    let spline = create_spline();

    for samples in [64, 512, 4096] {
        let params = spline.uniform_parameters(samples);
        group.throughput(Throughput::Elements(samples as u64));

        group.bench_with_input(BenchmarkId::new("cubic", samples), &params, |b, params| {
            let config = RmfConfig::default();
            b.iter(|| rotation_minimizing_frames(black_box(&spline), black_box(params), &config));
        });
    }

    group.finish();
}

// =============================================================================
// Tube Benchmarks
// =============================================================================

fn bench_tube(c: &mut Criterion) {
    let mut group = c.benchmark_group("TubeFromFrames");
    let spline = create_spline();

    let test_cases = [
        ("64x8", 64, 8),
        ("512x16", 512, 16),
        ("4096x32", 4096, 32),
    ];

    for (name, samples, radial) in test_cases {
        let frames = create_frames(&spline, samples);
        let config = TubeConfig::default().with_radius(4.0).with_radial_segments(radial);

        group.throughput(Throughput::Elements(((samples - 1) * radial) as u64));

        group.bench_with_input(BenchmarkId::new("sweep", name), &frames, |b, frames| {
            b.iter(|| tube_from_frames(black_box(frames), black_box(&config)));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("TubeFromCurve");
    let spline = create_spline();
    let params = spline.uniform_parameters(512);
    let rmf = RmfConfig::default();
    let config = TubeConfig::default().with_radial_segments(16);

    group.bench_function("cubic_512x16", |b| {
        b.iter(|| tube_from_curve(black_box(&spline), black_box(&params), &rmf, &config));
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_frames, bench_tube, bench_pipeline);
criterion_main!(benches);
