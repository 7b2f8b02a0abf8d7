//! Property-based tests for rotation-minimizing frames.
//!
//! These tests use proptest to generate random splines and verify that every
//! produced frame is a right-handed orthonormal basis anchored on the curve.
//!
//! Run with: cargo test -p curve-frames -- proptest

use curve_frames::{BSpline, CurveSampler, RmfConfig, rotation_minimizing_frames};
use nalgebra::{Point3, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// A clamped spline of degree 1..=3 with enough control points.
fn arb_spline() -> impl Strategy<Value = BSpline> {
    (1usize..=3).prop_flat_map(|degree| {
        prop::collection::vec(arb_point(), degree + 1..=degree + 6).prop_filter_map(
            "spline construction",
            move |points| BSpline::clamped(points, degree).ok(),
        )
    })
}

fn arb_direction() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-1.0..1.0f64)
        .prop_map(|[x, y, z]| Vector3::new(x, y, z))
        .prop_filter("non-zero", |v| v.norm() > 1e-3)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_frames_are_orthonormal(spline in arb_spline(), samples in 1usize..80) {
        let params = spline.uniform_parameters(samples);

        match rotation_minimizing_frames(&spline, &params, &RmfConfig::default()) {
            Ok(frames) => {
                prop_assert_eq!(frames.len(), samples);
                for frame in &frames {
                    prop_assert!(frame.is_orthonormal(1e-6), "frame {:?}", frame);
                }
            }
            // Random control polygons may stall (repeated control points)
            Err(err) => prop_assert!(err.is_degenerate(), "unexpected error {err}"),
        }
    }

    #[test]
    fn proptest_frames_follow_curve(spline in arb_spline(), samples in 2usize..40) {
        let params = spline.uniform_parameters(samples);

        if let Ok(frames) = rotation_minimizing_frames(&spline, &params, &RmfConfig::default()) {
            for (frame, &u) in frames.iter().zip(&params) {
                let sample = spline.evaluate(u).unwrap();
                prop_assert!((frame.position() - sample.position).norm() < 1e-9);

                let expected = sample.derivative.normalize();
                prop_assert!((frame.tangent() - expected).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn proptest_initial_normal_in_plane(spline in arb_spline(), hint in arb_direction()) {
        let params = spline.uniform_parameters(16);
        let config = RmfConfig::default().with_initial_normal(hint);

        if let Ok(frames) = rotation_minimizing_frames(&spline, &params, &config) {
            let first = frames[0];
            // The hint lies in the tangent/normal plane of the first frame
            prop_assert!(first.binormal().dot(&hint).abs() < 1e-9);
            prop_assert!(first.normal().dot(&hint) >= 0.0);
        }
    }

    #[test]
    fn proptest_repeated_parameters(spline in arb_spline(), index in 0usize..10) {
        let mut params = spline.uniform_parameters(10);
        params.insert(index, params[index]);

        if let Ok(frames) = rotation_minimizing_frames(&spline, &params, &RmfConfig::default()) {
            prop_assert_eq!(frames[index], frames[index + 1]);
        }
    }
}
