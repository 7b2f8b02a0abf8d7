//! Error types for curve sampling and frame propagation.

use thiserror::Error;

/// Result type for curve and frame operations.
pub type CurveResult<T> = std::result::Result<T, CurveError>;

/// Errors raised by a [`CurveSampler`](crate::CurveSampler) when a parameter
/// cannot be evaluated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Parameter lies outside the curve's valid range.
    #[error("parameter {parameter} is outside curve domain [{min}, {max}]")]
    OutOfRange {
        /// The rejected parameter.
        parameter: f64,
        /// Start of the valid range.
        min: f64,
        /// End of the valid range.
        max: f64,
    },

    /// Curve is not defined at the parameter for another reason.
    #[error("curve is undefined at parameter {parameter}: {reason}")]
    Undefined {
        /// The rejected parameter.
        parameter: f64,
        /// Why evaluation failed.
        reason: String,
    },
}

impl DomainError {
    /// The parameter that could not be evaluated.
    #[must_use]
    pub fn parameter(&self) -> f64 {
        match self {
            Self::OutOfRange { parameter, .. } | Self::Undefined { parameter, .. } => *parameter,
        }
    }
}

/// Errors that can occur while building curves or frame sequences.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// An argument is empty, mis-sized or otherwise unusable.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the problem.
        reason: String,
    },

    /// The curve's first derivative vanishes, so no tangent exists.
    #[error("degenerate curve: zero-length tangent at parameter {parameter}")]
    DegenerateCurve {
        /// Parameter at which the tangent vanished.
        parameter: f64,
    },

    /// The sampler rejected a parameter.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Insufficient control points to define the curve.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Knot vector is invalid for the given curve parameters.
    #[error("invalid knot vector: {reason}")]
    InvalidKnotVector {
        /// Description of what's wrong with the knot vector.
        reason: String,
    },
}

impl CurveError {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Create an invalid knot vector error.
    #[must_use]
    pub fn invalid_knot_vector(reason: impl Into<String>) -> Self {
        Self::InvalidKnotVector {
            reason: reason.into(),
        }
    }

    /// Check if this is an invalid argument error.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this is a degenerate curve error.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateCurve { .. })
    }

    /// Check if this error came from the sampler's domain check.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::insufficient_points(4, 2);
        assert!(err.to_string().contains("need at least 4"));
        assert!(err.to_string().contains("got 2"));

        let err = CurveError::DegenerateCurve { parameter: 0.25 };
        assert!(err.to_string().contains("0.25"));

        let err = CurveError::invalid_argument("no parameters");
        assert_eq!(err.to_string(), "invalid argument: no parameters");
    }

    #[test]
    fn test_domain_error_is_transparent() {
        let domain = DomainError::OutOfRange {
            parameter: 1.5,
            min: 0.0,
            max: 1.0,
        };
        let err = CurveError::from(domain.clone());

        assert_eq!(err.to_string(), domain.to_string());
        assert!(err.to_string().contains("1.5"));
        assert!(matches!(err, CurveError::Domain(ref inner) if *inner == domain));
    }

    #[test]
    fn test_domain_error_parameter() {
        let err = DomainError::Undefined {
            parameter: -2.0,
            reason: "pole".to_string(),
        };
        assert!((err.parameter() + 2.0).abs() < f64::EPSILON);
        assert!(err.to_string().contains("pole"));
    }

    #[test]
    fn test_error_predicates() {
        let err = CurveError::invalid_argument("empty");
        assert!(err.is_invalid_argument());
        assert!(!err.is_degenerate());
        assert!(!err.is_domain());

        let err = CurveError::DegenerateCurve { parameter: 0.0 };
        assert!(err.is_degenerate());

        let err = CurveError::from(DomainError::OutOfRange {
            parameter: 2.0,
            min: 0.0,
            max: 1.0,
        });
        assert!(err.is_domain());
    }
}
