//! Rotation-minimizing frames by double reflection.
//!
//! Frames are propagated from one curve sample to the next with the double
//! reflection method of Wang et al. (2008): the previous frame is reflected
//! across the plane bisecting the two sample positions, then across the
//! plane bisecting the reflected and the sampled tangent. The result twists
//! as little as possible about the tangent, unlike Frenet frames which flip
//! at inflection points.

use nalgebra::{Point3, Vector3};
use tracing::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::frame::Frame;
use crate::sampler::CurveSampler;

/// Squared distance below which two sample positions are coincident.
const COINCIDENT_SQUARED: f64 = 1e-20;

/// Options for rotation-minimizing frame propagation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RmfConfig {
    /// Normal of the first frame. If `None`, a perpendicular is chosen from
    /// the coordinate axis least aligned with the first tangent.
    pub initial_normal: Option<Vector3<f64>>,

    /// Derivative magnitudes below this are treated as a singular curve.
    /// Default: 1e-12
    pub tangent_epsilon: f64,

    /// Orthogonality drift tolerated before a frame is re-orthonormalized.
    /// Default: 1e-10
    pub drift_tolerance: f64,
}

impl Default for RmfConfig {
    fn default() -> Self {
        Self {
            initial_normal: None,
            tangent_epsilon: 1e-12,
            drift_tolerance: 1e-10,
        }
    }
}

impl RmfConfig {
    /// Seed the first frame with the given normal.
    ///
    /// The vector is projected onto the plane perpendicular to the first
    /// tangent, so it only needs to be non-parallel to it.
    #[must_use]
    pub fn with_initial_normal(mut self, normal: Vector3<f64>) -> Self {
        self.initial_normal = Some(normal);
        self
    }

    /// Set the derivative magnitude below which the curve is singular.
    #[must_use]
    pub fn with_tangent_epsilon(mut self, epsilon: f64) -> Self {
        self.tangent_epsilon = epsilon;
        self
    }

    /// Set the drift tolerance for re-orthonormalization.
    #[must_use]
    pub fn with_drift_tolerance(mut self, tolerance: f64) -> Self {
        self.drift_tolerance = tolerance;
        self
    }
}

/// Compute rotation-minimizing frames at the given parameters.
///
/// Returns exactly one frame per parameter, in order. The sampler is
/// evaluated once per parameter, in the given order.
///
/// # Errors
///
/// - [`CurveError::InvalidArgument`] if `parameters` is empty, contains a
///   non-finite value, or the configured initial normal is unusable
/// - [`CurveError::DegenerateCurve`] if the derivative vanishes at a parameter
/// - [`CurveError::Domain`] if the sampler rejects a parameter
///
/// # Example
///
/// ```
/// use curve_frames::{BSpline, CurveSampler, RmfConfig, rotation_minimizing_frames};
/// use nalgebra::Point3;
///
/// let spline = BSpline::clamped(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(2.0, 1.0, 0.0),
///         Point3::new(2.0, 2.0, 1.0),
///     ],
///     3,
/// )
/// .unwrap();
///
/// let params = spline.uniform_parameters(10);
/// let frames = rotation_minimizing_frames(&spline, &params, &RmfConfig::default()).unwrap();
///
/// assert_eq!(frames.len(), 10);
/// for frame in &frames {
///     assert!(frame.is_orthonormal(1e-10));
/// }
/// ```
pub fn rotation_minimizing_frames<S: CurveSampler + ?Sized>(
    sampler: &S,
    parameters: &[f64],
    config: &RmfConfig,
) -> CurveResult<Vec<Frame>> {
    let placeholder = Frame::new(
        Point3::origin(),
        Vector3::zeros(),
        Vector3::zeros(),
        Vector3::zeros(),
    );
    let mut frames = vec![placeholder; parameters.len()];
    rotation_minimizing_frames_into(sampler, parameters, config, &mut frames)?;
    Ok(frames)
}

/// Compute rotation-minimizing frames into a caller-sized buffer.
///
/// `out` must have exactly one slot per parameter. If an error is returned,
/// the contents of `out` are unspecified and must not be used.
///
/// # Errors
///
/// As [`rotation_minimizing_frames`], plus [`CurveError::InvalidArgument`]
/// when `out.len() != parameters.len()`.
pub fn rotation_minimizing_frames_into<S: CurveSampler + ?Sized>(
    sampler: &S,
    parameters: &[f64],
    config: &RmfConfig,
    out: &mut [Frame],
) -> CurveResult<()> {
    if parameters.is_empty() {
        return Err(CurveError::invalid_argument(
            "at least one parameter is required",
        ));
    }

    if out.len() != parameters.len() {
        return Err(CurveError::invalid_argument(format!(
            "output holds {} frames, expected {}",
            out.len(),
            parameters.len()
        )));
    }

    if let Some(index) = parameters.iter().position(|u| !u.is_finite()) {
        return Err(CurveError::invalid_argument(format!(
            "parameter at index {index} is not finite"
        )));
    }

    let (position, tangent) = sample_unit_tangent(sampler, parameters[0], config)?;
    out[0] = initial_frame(position, tangent, config)?;

    let mut coincident_steps = 0usize;
    let mut corrected_steps = 0usize;

    for i in 1..parameters.len() {
        let (position, tangent) = sample_unit_tangent(sampler, parameters[i], config)?;
        let step = transport_frame(&out[i - 1], position, tangent, config.drift_tolerance);

        if step.coincident {
            coincident_steps += 1;
            trace!(index = i, parameter = parameters[i], "Coincident curve sample");
        }
        if step.corrected {
            corrected_steps += 1;
        }

        out[i] = step.frame;
    }

    if corrected_steps > 0 {
        warn!(
            corrected = corrected_steps,
            "Re-orthonormalized frames after numerical drift"
        );
    }

    debug!(
        frames = parameters.len(),
        coincident = coincident_steps,
        "Computed rotation-minimizing frames"
    );

    Ok(())
}

/// Sample position and unit tangent at `parameter`.
fn sample_unit_tangent<S: CurveSampler + ?Sized>(
    sampler: &S,
    parameter: f64,
    config: &RmfConfig,
) -> CurveResult<(Point3<f64>, Vector3<f64>)> {
    let sample = sampler.evaluate(parameter)?;

    let magnitude = sample.derivative.norm();
    if !(magnitude.is_finite() && magnitude > config.tangent_epsilon) {
        return Err(CurveError::DegenerateCurve { parameter });
    }

    Ok((sample.position, sample.derivative / magnitude))
}

/// Build the first frame, honouring a configured initial normal.
fn initial_frame(
    position: Point3<f64>,
    tangent: Vector3<f64>,
    config: &RmfConfig,
) -> CurveResult<Frame> {
    match config.initial_normal {
        Some(normal) => {
            if !normal.iter().all(|c| c.is_finite()) {
                return Err(CurveError::invalid_argument(
                    "initial normal must be finite",
                ));
            }
            Frame::from_tangent_and_normal(position, tangent, normal).ok_or_else(|| {
                CurveError::invalid_argument("initial normal is parallel to the first tangent")
            })
        }
        None => Frame::from_tangent(position, tangent)
            .ok_or_else(|| CurveError::invalid_argument("first tangent cannot be normalized")),
    }
}

/// Outcome of one propagation step.
struct TransportStep {
    frame: Frame,
    coincident: bool,
    corrected: bool,
}

/// Transport a frame to a new position and unit tangent using double reflection.
fn transport_frame(
    prev: &Frame,
    position: Point3<f64>,
    tangent: Vector3<f64>,
    drift_tolerance: f64,
) -> TransportStep {
    // First reflection: across the plane bisecting the two positions
    let v1 = position - prev.position();
    let c1 = v1.dot(&v1);
    let coincident = c1 < COINCIDENT_SQUARED;

    let (r_l, t_l) = if coincident {
        (prev.normal(), prev.tangent())
    } else {
        (
            prev.normal() - v1 * (2.0 / c1) * v1.dot(&prev.normal()),
            prev.tangent() - v1 * (2.0 / c1) * v1.dot(&prev.tangent()),
        )
    };

    // Second reflection: across the plane bisecting the reflected and sampled tangent
    let v2 = tangent - t_l;
    let c2 = v2.dot(&v2);

    if coincident && c2 < COINCIDENT_SQUARED {
        // Repeated sample: same basis at the new position
        return TransportStep {
            frame: prev.with_position(position),
            coincident,
            corrected: false,
        };
    }

    let normal = if c2 < COINCIDENT_SQUARED {
        r_l
    } else {
        r_l - v2 * (2.0 / c2) * v2.dot(&r_l)
    };

    let mut binormal = tangent.cross(&normal);
    let mut normal = normal;

    let drift = tangent.dot(&normal).abs().max((normal.norm() - 1.0).abs());
    let corrected = drift > drift_tolerance;
    if corrected {
        binormal = binormal.try_normalize(f64::EPSILON).unwrap_or(prev.binormal());
        normal = binormal.cross(&tangent);
    }

    TransportStep {
        frame: Frame::new(position, tangent, normal, binormal),
        coincident,
        corrected,
    }
}
