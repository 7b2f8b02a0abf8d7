//! B-spline curves.
//!
//! B-splines are the reference [`CurveSampler`] for this crate. They are
//! evaluated directly in knot space: the sampler domain is
//! `[knots[p], knots[len - p - 1]]`.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult, DomainError};
use crate::sampler::{CurveSample, CurveSampler};

/// Parameters this close to a domain end are snapped onto it.
const DOMAIN_SNAP: f64 = 1e-12;

/// A B-spline curve of arbitrary degree.
///
/// The knot vector must be non-decreasing and have length `n + p + 1`, where
/// `n` is the number of control points and `p` is the degree.
///
/// # Example
///
/// ```
/// use curve_frames::{BSpline, CurveSampler};
/// use nalgebra::Point3;
///
/// let spline = BSpline::clamped(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 2.0, 0.0),
///         Point3::new(3.0, 2.0, 0.0),
///         Point3::new(4.0, 0.0, 0.0),
///     ],
///     3,
/// )
/// .unwrap();
///
/// let sample = spline.evaluate(0.5).unwrap();
/// assert!(sample.derivative.norm() > 0.0);
/// assert!(spline.evaluate(1.5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BSpline {
    control_points: Vec<Point3<f64>>,
    knots: Vec<f64>,
    degree: usize,
    /// Control points of the first derivative (degree `p - 1`, knots
    /// `knots[1..len - 1]`). Empty for degree 0.
    hodograph: Vec<Point3<f64>>,
}

impl BSpline {
    /// Create a B-spline with an explicit knot vector.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Fewer than `degree + 1` control points
    /// - Knot vector has incorrect length
    /// - Knot vector is not non-decreasing or has an empty domain
    pub fn new(control_points: Vec<Point3<f64>>, knots: Vec<f64>, degree: usize) -> CurveResult<Self> {
        let n = control_points.len();

        if n < degree + 1 {
            return Err(CurveError::insufficient_points(degree + 1, n));
        }

        let expected_knots = n + degree + 1;
        if knots.len() != expected_knots {
            return Err(CurveError::invalid_knot_vector(format!(
                "expected {} knots for {} control points and degree {}, got {}",
                expected_knots,
                n,
                degree,
                knots.len()
            )));
        }

        if knots.iter().any(|k| !k.is_finite()) {
            return Err(CurveError::invalid_knot_vector("knots must be finite"));
        }

        for i in 1..knots.len() {
            if knots[i] < knots[i - 1] {
                return Err(CurveError::invalid_knot_vector(format!(
                    "knot vector is not non-decreasing at index {} ({} < {})",
                    i,
                    knots[i],
                    knots[i - 1]
                )));
            }
        }

        if knots[degree] >= knots[n] {
            return Err(CurveError::invalid_knot_vector(format!(
                "empty domain [{}, {}]",
                knots[degree], knots[n]
            )));
        }

        let hodograph = hodograph_points(&control_points, &knots, degree);

        Ok(Self {
            control_points,
            knots,
            degree,
            hodograph,
        })
    }

    /// Create a clamped (open) B-spline with uniform interior knots on `[0, 1]`.
    ///
    /// Clamped B-splines pass through their first and last control points.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than `degree + 1` control points.
    pub fn clamped(control_points: Vec<Point3<f64>>, degree: usize) -> CurveResult<Self> {
        let n = control_points.len();

        if n < degree + 1 {
            return Err(CurveError::insufficient_points(degree + 1, n));
        }

        let mut knots = Vec::with_capacity(n + degree + 1);
        knots.extend(std::iter::repeat_n(0.0, degree + 1));

        let num_interior = n - degree - 1;
        for i in 1..=num_interior {
            knots.push(i as f64 / (num_interior + 1) as f64);
        }

        knots.extend(std::iter::repeat_n(1.0, degree + 1));

        Self::new(control_points, knots, degree)
    }

    /// Get the control points.
    #[must_use]
    pub fn control_points(&self) -> &[Point3<f64>] {
        &self.control_points
    }

    /// Get the knot vector.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Get the degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Evaluate the curve position at knot-space parameter `u`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] if `u` lies outside the domain.
    pub fn point_at(&self, u: f64) -> Result<Point3<f64>, DomainError> {
        let u = self.check_parameter(u)?;
        Ok(de_boor_sum(&self.control_points, &self.knots, self.degree, u))
    }

    /// The derivative curve (hodograph), a B-spline of degree `p - 1`.
    ///
    /// # Errors
    ///
    /// Returns an error for degree-0 splines, which have no derivative curve.
    pub fn derivative(&self) -> CurveResult<Self> {
        if self.degree == 0 {
            return Err(CurveError::invalid_argument(
                "cannot derive a spline of degree 0",
            ));
        }
        let knots = self.knots[1..self.knots.len() - 1].to_vec();
        Self::new(self.hodograph.clone(), knots, self.degree - 1)
    }

    fn check_parameter(&self, u: f64) -> Result<f64, DomainError> {
        let (min, max) = self.domain();
        if u.is_nan() || u < min - DOMAIN_SNAP || u > max + DOMAIN_SNAP {
            return Err(DomainError::OutOfRange {
                parameter: u,
                min,
                max,
            });
        }
        Ok(u.clamp(min, max))
    }
}

impl CurveSampler for BSpline {
    fn domain(&self) -> (f64, f64) {
        let p = self.degree;
        (self.knots[p], self.knots[self.knots.len() - p - 1])
    }

    fn evaluate(&self, parameter: f64) -> Result<CurveSample, DomainError> {
        let u = self.check_parameter(parameter)?;
        let position = de_boor_sum(&self.control_points, &self.knots, self.degree, u);

        let derivative = if self.degree == 0 {
            Vector3::zeros()
        } else {
            let knots = &self.knots[1..self.knots.len() - 1];
            de_boor_sum(&self.hodograph, knots, self.degree - 1, u).coords
        };

        Ok(CurveSample::new(position, derivative))
    }
}

/// Control points of the derivative curve.
///
/// `Q_i = p * (P_{i+1} - P_i) / (u_{i+p+1} - u_{i+1})`; zero-width spans
/// contribute a zero vector.
fn hodograph_points(points: &[Point3<f64>], knots: &[f64], degree: usize) -> Vec<Point3<f64>> {
    if degree == 0 {
        return Vec::new();
    }
    let p = degree as f64;

    points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let span = knots[i + degree + 1] - knots[i + 1];
            if span.abs() < 1e-15 {
                Point3::origin()
            } else {
                Point3::from((pair[1] - pair[0]) * (p / span))
            }
        })
        .collect()
}

/// Evaluate `sum_i N_{i,p}(u) * P_i` at an in-domain `u`.
fn de_boor_sum(points: &[Point3<f64>], knots: &[f64], degree: usize, u: f64) -> Point3<f64> {
    let span = find_span(knots, degree, points.len(), u);
    let basis = basis_functions(knots, degree, span, u);

    let mut point = Vector3::zeros();
    for (i, weight) in basis.iter().enumerate() {
        point += points[span - degree + i].coords * *weight;
    }

    Point3::from(point)
}

/// Find the knot span index for parameter `u`.
///
/// Returns `i` such that `knots[i] <= u < knots[i+1]`, clamped to `n - 1`
/// at the end of the domain.
fn find_span(knots: &[f64], degree: usize, n: usize, u: f64) -> usize {
    if u >= knots[n] {
        return n - 1;
    }

    let mut low = degree;
    let mut high = n;

    while low < high {
        let mid = (low + high) / 2;
        if knots[mid] > u {
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    low - 1
}

/// Compute the `degree + 1` non-zero basis functions at `u`.
fn basis_functions(knots: &[f64], degree: usize, span: usize, u: f64) -> Vec<f64> {
    let p = degree;
    let mut n_basis = vec![0.0; p + 1];
    let mut left = vec![0.0; p + 1];
    let mut right = vec![0.0; p + 1];

    n_basis[0] = 1.0;

    for j in 1..=p {
        left[j] = u - knots[span + 1 - j];
        right[j] = knots[span + j] - u;

        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            if denom.abs() > 1e-15 {
                let temp = n_basis[r] / denom;
                n_basis[r] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            } else {
                n_basis[r] = saved;
                saved = 0.0;
            }
        }
        n_basis[j] = saved;
    }

    n_basis
}
