//! The curve evaluation interface consumed by frame propagation.

use nalgebra::{Point3, Vector3};

use crate::error::DomainError;

/// Position and first derivative of a curve at one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Point on the curve.
    pub position: Point3<f64>,
    /// First derivative with respect to the parameter (not normalized).
    pub derivative: Vector3<f64>,
}

impl CurveSample {
    /// Create a sample from a position and derivative.
    #[must_use]
    pub fn new(position: Point3<f64>, derivative: Vector3<f64>) -> Self {
        Self {
            position,
            derivative,
        }
    }
}

/// A parametric curve that can be evaluated at parameter values.
///
/// Unlike a curve normalized to `[0, 1]`, a sampler exposes its own domain and
/// rejects parameters outside of it with a [`DomainError`].
pub trait CurveSampler {
    /// The valid parameter interval `(min, max)`.
    fn domain(&self) -> (f64, f64);

    /// Evaluate position and first derivative at `parameter`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `parameter` is outside [`Self::domain`]
    /// or the curve is undefined there.
    fn evaluate(&self, parameter: f64) -> Result<CurveSample, DomainError>;

    /// `n` parameters evenly spaced over the domain, both ends included.
    ///
    /// `n == 1` yields the start of the domain.
    fn uniform_parameters(&self, n: usize) -> Vec<f64> {
        let (min, max) = self.domain();
        match n {
            0 => Vec::new(),
            1 => vec![min],
            _ => {
                let step = (max - min) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { max } else { min + step * i as f64 })
                    .collect()
            }
        }
    }
}

impl<S: CurveSampler + ?Sized> CurveSampler for &S {
    fn domain(&self) -> (f64, f64) {
        (**self).domain()
    }

    fn evaluate(&self, parameter: f64) -> Result<CurveSample, DomainError> {
        (**self).evaluate(parameter)
    }
}
