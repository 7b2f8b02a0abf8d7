//! Collapsing runs of repeated frames into logical rings.

use curve_frames::Frame;

/// Indices of the distinct frames in a sequence.
///
/// Each maximal run of consecutive frames that coincide within `tolerance`
/// (see [`Frame::approx_eq`]) with the first frame of the run is represented
/// by that first frame. Frames are compared against the run's first frame,
/// not their neighbour, so a slow drift still starts new runs. The result is
/// strictly increasing and starts at 0 for non-empty input.
///
/// # Example
///
/// ```
/// use curve_frames::Frame;
/// use mesh_tube::distinct_frame_indices;
/// use nalgebra::{Point3, Vector3};
///
/// let a = Frame::new(Point3::origin(), Vector3::z(), Vector3::x(), Vector3::y());
/// let b = a.with_position(Point3::new(0.0, 0.0, 1.0));
///
/// assert_eq!(distinct_frame_indices(&[a, a, b, b, b, a], 1e-9), vec![0, 2, 5]);
/// ```
#[must_use]
pub fn distinct_frame_indices(frames: &[Frame], tolerance: f64) -> Vec<usize> {
    let mut distinct = Vec::with_capacity(frames.len());

    for (index, frame) in frames.iter().enumerate() {
        let in_run = distinct
            .last()
            .is_some_and(|&first| frame.approx_eq(&frames[first], tolerance));
        if !in_run {
            distinct.push(index);
        }
    }

    distinct
}
