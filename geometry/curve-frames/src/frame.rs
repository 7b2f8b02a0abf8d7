//! Coordinate frames anchored on a curve.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate frame at a point on a curve.
///
/// The frame consists of three mutually orthonormal vectors:
/// - `tangent`: Points along the curve in the direction of increasing parameter
/// - `normal`: Perpendicular to the tangent
/// - `binormal`: Completes the right-handed basis (`tangent × normal`)
///
/// Frames are immutable values. Constructors do not correct their input;
/// consumers check [`Frame::is_orthonormal`] where it matters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    position: Point3<f64>,
    tangent: Vector3<f64>,
    normal: Vector3<f64>,
    binormal: Vector3<f64>,
}

impl Frame {
    /// Create a frame from its components, stored as given.
    #[must_use]
    pub fn new(
        position: Point3<f64>,
        tangent: Vector3<f64>,
        normal: Vector3<f64>,
        binormal: Vector3<f64>,
    ) -> Self {
        Self {
            position,
            tangent,
            normal,
            binormal,
        }
    }

    /// Create a frame from a tangent, choosing the normal deterministically.
    ///
    /// The normal is `tangent × axis`, where `axis` is the coordinate axis
    /// least aligned with the tangent (ties go to x, then y). Returns `None`
    /// if the tangent cannot be normalized.
    #[must_use]
    pub fn from_tangent(position: Point3<f64>, tangent: Vector3<f64>) -> Option<Self> {
        let tangent = tangent.try_normalize(f64::EPSILON)?;
        let normal = least_aligned_perpendicular(&tangent)?;
        let binormal = tangent.cross(&normal);

        Some(Self {
            position,
            tangent,
            normal,
            binormal,
        })
    }

    /// Create a frame from a tangent and a normal hint.
    ///
    /// The hint is projected onto the plane perpendicular to the tangent.
    /// Returns `None` if either vector is degenerate or they are parallel.
    #[must_use]
    pub fn from_tangent_and_normal(
        position: Point3<f64>,
        tangent: Vector3<f64>,
        normal_hint: Vector3<f64>,
    ) -> Option<Self> {
        let tangent = tangent.try_normalize(f64::EPSILON)?;
        let normal = (normal_hint - tangent * tangent.dot(&normal_hint)).try_normalize(1e-10)?;
        let binormal = tangent.cross(&normal);

        Some(Self {
            position,
            tangent,
            normal,
            binormal,
        })
    }

    /// Position on the curve.
    #[must_use]
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Unit tangent vector.
    #[must_use]
    pub fn tangent(&self) -> Vector3<f64> {
        self.tangent
    }

    /// Unit normal vector.
    #[must_use]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Unit binormal vector.
    #[must_use]
    pub fn binormal(&self) -> Vector3<f64> {
        self.binormal
    }

    /// The same basis anchored at another point.
    #[must_use]
    pub fn with_position(&self, position: Point3<f64>) -> Self {
        Self { position, ..*self }
    }

    /// Unit direction in the normal plane at `angle` radians from the
    /// normal, rotating toward the binormal.
    #[must_use]
    pub fn radial_direction(&self, angle: f64) -> Vector3<f64> {
        let (sin_a, cos_a) = angle.sin_cos();
        self.normal * cos_a + self.binormal * sin_a
    }

    /// Largest deviation from a right-handed orthonormal basis.
    ///
    /// Covers unit lengths, pairwise dot products and `tangent × normal = binormal`.
    #[must_use]
    pub fn orthonormality_error(&self) -> f64 {
        let deviations = [
            (self.tangent.norm() - 1.0).abs(),
            (self.normal.norm() - 1.0).abs(),
            (self.binormal.norm() - 1.0).abs(),
            self.tangent.dot(&self.normal).abs(),
            self.tangent.dot(&self.binormal).abs(),
            self.normal.dot(&self.binormal).abs(),
            (self.tangent.cross(&self.normal) - self.binormal).norm(),
        ];

        // NaN components must not slip through as "small"
        deviations
            .into_iter()
            .fold(0.0, |max, d| if d.is_nan() { f64::INFINITY } else { max.max(d) })
    }

    /// Check if the frame is a right-handed orthonormal basis within tolerance.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        self.orthonormality_error() <= tolerance
    }

    /// Check if two frames coincide: same position and axes within tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Frame, tolerance: f64) -> bool {
        (self.position - other.position).norm() <= tolerance
            && (self.tangent - other.tangent).norm() <= tolerance
            && (self.normal - other.normal).norm() <= tolerance
            && (self.binormal - other.binormal).norm() <= tolerance
    }
}

/// Unit vector perpendicular to `v`, built from the least aligned axis.
fn least_aligned_perpendicular(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let abs_x = v.x.abs();
    let abs_y = v.y.abs();
    let abs_z = v.z.abs();

    let axis = if abs_x <= abs_y && abs_x <= abs_z {
        Vector3::x()
    } else if abs_y <= abs_z {
        Vector3::y()
    } else {
        Vector3::z()
    };

    v.cross(&axis).try_normalize(f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_tangent_is_orthonormal() {
        let tangents = [
            Vector3::x(),
            Vector3::y(),
            Vector3::z(),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-3.0, 0.5, 2.0),
        ];

        for tangent in tangents {
            let frame = Frame::from_tangent(Point3::origin(), tangent).unwrap();
            assert!(frame.is_orthonormal(1e-12), "tangent {tangent:?}");
            assert_relative_eq!(frame.tangent(), tangent.normalize(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_from_tangent_is_deterministic() {
        // x is least aligned with +z, so normal = z × x = y
        let frame = Frame::from_tangent(Point3::origin(), Vector3::z()).unwrap();
        assert_relative_eq!(frame.normal(), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(frame.binormal(), -Vector3::x(), epsilon = 1e-12);

        // y is least aligned with +x, so normal = x × y = z
        let frame = Frame::from_tangent(Point3::origin(), Vector3::x()).unwrap();
        assert_relative_eq!(frame.normal(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_from_zero_tangent() {
        assert!(Frame::from_tangent(Point3::origin(), Vector3::zeros()).is_none());
    }

    #[test]
    fn test_from_tangent_and_normal() {
        let frame = Frame::from_tangent_and_normal(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::x(),
            Vector3::new(0.5, 0.0, 2.0),
        )
        .unwrap();

        assert!(frame.is_orthonormal(1e-12));
        assert_relative_eq!(frame.normal(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(frame.binormal(), -Vector3::y(), epsilon = 1e-12);

        let parallel =
            Frame::from_tangent_and_normal(Point3::origin(), Vector3::x(), Vector3::x() * 3.0);
        assert!(parallel.is_none());
    }

    #[test]
    fn test_radial_direction() {
        let frame = Frame::new(Point3::origin(), Vector3::z(), Vector3::x(), Vector3::y());

        assert_relative_eq!(frame.radial_direction(0.0), Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(
            frame.radial_direction(std::f64::consts::FRAC_PI_2),
            Vector3::y(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_orthonormality_error_detects_bad_frames() {
        let scaled = Frame::new(
            Point3::origin(),
            Vector3::x() * 2.0,
            Vector3::y(),
            Vector3::z(),
        );
        assert!(!scaled.is_orthonormal(1e-3));

        let left_handed = Frame::new(Point3::origin(), Vector3::x(), Vector3::y(), -Vector3::z());
        assert!(!left_handed.is_orthonormal(1e-3));

        let nan = Frame::new(
            Point3::origin(),
            Vector3::new(f64::NAN, 0.0, 0.0),
            Vector3::y(),
            Vector3::z(),
        );
        assert!(nan.orthonormality_error().is_infinite());
    }

    #[test]
    fn test_approx_eq_and_with_position() {
        let frame = Frame::from_tangent(Point3::origin(), Vector3::new(1.0, 2.0, 0.0)).unwrap();
        let moved = frame.with_position(Point3::new(0.0, 0.0, 1e-12));

        assert!(frame.approx_eq(&moved, 1e-9));
        assert!(!frame.approx_eq(&moved.with_position(Point3::new(1.0, 0.0, 0.0)), 1e-9));
        assert_eq!(moved.normal(), frame.normal());
    }
}
