//! Error types for tube mesh generation.

use curve_frames::CurveError;
use thiserror::Error;

/// Result type for tube mesh operations.
pub type TubeResult<T> = Result<T, TubeError>;

/// Errors that can occur while building a tubular mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TubeError {
    /// Radius is invalid (zero, negative or not finite).
    #[error("invalid radius: {0} (must be positive)")]
    InvalidRadius(f64),

    /// Radial segment count is too low to enclose a volume.
    #[error("radial segments must be at least {min}, got {actual}")]
    TooFewRadialSegments {
        /// Minimum required segments.
        min: usize,
        /// Actual segment count.
        actual: usize,
    },

    /// Too few distinct frames remain to form a single ring of faces.
    #[error("need at least {required} distinct frames, got {actual}")]
    InsufficientFrames {
        /// Minimum number of logical rings.
        required: usize,
        /// Logical rings left after collapsing repeated frames.
        actual: usize,
    },

    /// An input frame is not a right-handed orthonormal basis.
    #[error("frame {index} is not orthonormal (deviation {deviation:e})")]
    MalformedFrame {
        /// Index of the frame in the input sequence.
        index: usize,
        /// Largest deviation from orthonormality.
        deviation: f64,
    },

    /// Mesh buffers disagree with each other or with the segment counts.
    #[error("inconsistent mesh buffers: {reason}")]
    InconsistentBuffers {
        /// Which invariant failed.
        reason: String,
    },

    /// Frame computation failed before meshing.
    #[error("frame computation failed: {0}")]
    Frames(#[from] CurveError),
}

impl TubeError {
    /// Check if this error reports an unusable argument (count or radius).
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidRadius(_) | Self::TooFewRadialSegments { .. }
        ) || matches!(self, Self::Frames(err) if err.is_invalid_argument())
    }

    /// Check if this is an insufficient frames error.
    #[must_use]
    pub fn is_insufficient_frames(&self) -> bool {
        matches!(self, Self::InsufficientFrames { .. })
    }

    /// Check if this is a malformed frame error.
    #[must_use]
    pub fn is_malformed_frame(&self) -> bool {
        matches!(self, Self::MalformedFrame { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TubeError::InvalidRadius(-1.0);
        assert!(err.to_string().contains("-1"));

        let err = TubeError::TooFewRadialSegments { min: 3, actual: 2 };
        assert_eq!(err.to_string(), "radial segments must be at least 3, got 2");

        let err = TubeError::MalformedFrame {
            index: 7,
            deviation: 0.5,
        };
        assert!(err.to_string().contains("frame 7"));
    }

    #[test]
    fn test_error_predicates() {
        assert!(TubeError::InvalidRadius(0.0).is_invalid_argument());
        assert!(TubeError::TooFewRadialSegments { min: 3, actual: 0 }.is_invalid_argument());
        assert!(TubeError::from(CurveError::invalid_argument("empty")).is_invalid_argument());

        let err = TubeError::InsufficientFrames {
            required: 2,
            actual: 1,
        };
        assert!(err.is_insufficient_frames());
        assert!(!err.is_invalid_argument());

        let err = TubeError::MalformedFrame {
            index: 0,
            deviation: 1.0,
        };
        assert!(err.is_malformed_frame());
    }

    #[test]
    fn test_frame_errors_convert() {
        let err: TubeError = CurveError::DegenerateCurve { parameter: 0.5 }.into();
        assert!(matches!(err, TubeError::Frames(CurveError::DegenerateCurve { .. })));
        assert!(err.to_string().contains("0.5"));
    }
}
