//! Tube mesh generation from frame sequences.
//!
//! Sweeps a circle along a sequence of frames. Each distinct frame becomes one
//! ring of vertices; neighbouring rings are stitched with two triangles per
//! quad.

use std::f64::consts::TAU;

use curve_frames::{CurveSampler, Frame, RmfConfig, rotation_minimizing_frames};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collapse::distinct_frame_indices;
use crate::error::{TubeError, TubeResult};
use crate::mesh::{BufferSizes, TubularMesh};

/// Minimum number of radial segments.
pub const MIN_RADIAL_SEGMENTS: usize = 3;

/// Configuration for tube generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubeConfig {
    /// Radius of the tube.
    pub radius: f64,
    /// Number of segments around the circumference.
    pub radial_segments: usize,
    /// Maximum orthonormality deviation accepted for input frames.
    /// Default: 1e-6
    pub frame_tolerance: f64,
    /// Frames closer than this (position and axes) form a single ring.
    /// Default: 1e-9
    pub duplicate_tolerance: f64,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            radial_segments: 8,
            frame_tolerance: 1e-6,
            duplicate_tolerance: 1e-9,
        }
    }
}

impl TubeConfig {
    /// Create a tube config with the given radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Create a tube config with the given number of circumferential segments.
    #[must_use]
    pub fn with_radial_segments(mut self, segments: usize) -> Self {
        self.radial_segments = segments;
        self
    }

    /// Set the orthonormality tolerance for input frames.
    #[must_use]
    pub fn with_frame_tolerance(mut self, tolerance: f64) -> Self {
        self.frame_tolerance = tolerance;
        self
    }

    /// Set the tolerance under which consecutive frames are collapsed.
    #[must_use]
    pub fn with_duplicate_tolerance(mut self, tolerance: f64) -> Self {
        self.duplicate_tolerance = tolerance;
        self
    }

    /// Check the radius and segment count.
    ///
    /// # Errors
    ///
    /// Returns [`TubeError::TooFewRadialSegments`] or [`TubeError::InvalidRadius`],
    /// and [`TubeError::InconsistentBuffers`] if even a single span would
    /// exceed the `u32` index range.
    pub fn validate(&self) -> TubeResult<()> {
        if self.radial_segments < MIN_RADIAL_SEGMENTS {
            return Err(TubeError::TooFewRadialSegments {
                min: MIN_RADIAL_SEGMENTS,
                actual: self.radial_segments,
            });
        }

        if self.radius <= 0.0 || !self.radius.is_finite() {
            return Err(TubeError::InvalidRadius(self.radius));
        }

        indexable_sizes(1, self.radial_segments)?;

        Ok(())
    }
}

/// Generate a tube mesh around a frame sequence.
///
/// Runs of consecutive identical frames (within
/// [`TubeConfig::duplicate_tolerance`]) collapse into one ring, so the
/// returned [`TubularMesh::tubular_segments`] is the number of distinct
/// frames minus one and may be smaller than `frames.len() - 1`.
///
/// Ring `i` vertex `j` lies at angle `j * 2π / radial_segments` from the
/// frame normal toward the binormal; vertex `radial_segments` repeats
/// vertex 0. For each quad, with `A`/`D` on ring `i - 1` and `B`/`C` on ring
/// `i` (`A`, `B` at radial index `j - 1`; `D`, `C` at `j`), the indices are
/// emitted as `A, D, B, B, D, C`: two counter-clockwise, outward-facing
/// triangles sharing the diagonal `B–D`.
///
/// # Errors
///
/// - [`TubeError::TooFewRadialSegments`] / [`TubeError::InvalidRadius`] for a bad config
/// - [`TubeError::MalformedFrame`] if a frame is not orthonormal
/// - [`TubeError::InsufficientFrames`] if fewer than 2 distinct frames remain
/// - [`TubeError::InconsistentBuffers`] if the mesh cannot be indexed with `u32`
///   or its buffers cannot be allocated
///
/// # Example
///
/// ```
/// use curve_frames::Frame;
/// use mesh_tube::{TubeConfig, tube_from_frames};
/// use nalgebra::{Point3, Vector3};
///
/// let start = Frame::new(Point3::origin(), Vector3::z(), Vector3::x(), Vector3::y());
/// let end = start.with_position(Point3::new(0.0, 0.0, 10.0));
///
/// let config = TubeConfig::default().with_radius(0.5).with_radial_segments(16);
/// let mesh = tube_from_frames(&[start, start, end], &config).unwrap();
///
/// assert_eq!(mesh.tubular_segments(), 1);
/// assert_eq!(mesh.point_count(), 2 * 17);
/// assert_eq!(mesh.indices().len(), 16 * 6);
/// ```
pub fn tube_from_frames(frames: &[Frame], config: &TubeConfig) -> TubeResult<TubularMesh> {
    config.validate()?;

    for (index, frame) in frames.iter().enumerate() {
        let deviation = frame.orthonormality_error();
        if deviation > config.frame_tolerance {
            return Err(TubeError::MalformedFrame { index, deviation });
        }
    }

    let rings = distinct_frame_indices(frames, config.duplicate_tolerance);
    if rings.len() < 2 {
        return Err(TubeError::InsufficientFrames {
            required: 2,
            actual: rings.len(),
        });
    }

    let tubular_segments = rings.len() - 1;
    let radial_segments = config.radial_segments;
    let sizes = indexable_sizes(tubular_segments, radial_segments)?;

    let mut vertices = reserve_buffer(sizes.vertices)?;
    let mut normals = reserve_buffer(sizes.normals)?;
    let mut tangents = reserve_buffer(sizes.tangents)?;
    let mut uvs = reserve_buffer(sizes.uvs)?;
    let mut indices = reserve_buffer(sizes.indices)?;

    for (ring_idx, &frame_idx) in rings.iter().enumerate() {
        let frame = &frames[frame_idx];
        let center = frame.position();
        let tangent = frame.tangent();
        let u = ring_idx as f64 / tubular_segments as f64;

        for seg_idx in 0..=radial_segments {
            // The seam vertex reuses angle 0 so it matches vertex 0 exactly
            let angle = TAU * (seg_idx % radial_segments) as f64 / radial_segments as f64;
            let direction = frame.radial_direction(angle);

            let outward = direction
                .try_normalize(f64::EPSILON)
                .unwrap_or_else(|| frame.normal());
            let pos = center + direction * config.radius;

            vertices.extend_from_slice(&[pos.x, pos.y, pos.z]);
            normals.extend_from_slice(&[outward.x, outward.y, outward.z]);
            tangents.extend_from_slice(&[tangent.x, tangent.y, tangent.z, 1.0]);
            uvs.extend_from_slice(&[u, seg_idx as f64 / radial_segments as f64]);
        }
    }

    push_ring_indices(&mut indices, tubular_segments, radial_segments);

    debug!(
        frames = frames.len(),
        rings = rings.len(),
        collapsed = frames.len() - rings.len(),
        radial_segments,
        triangles = indices.len() / 3,
        "Generated tubular mesh"
    );

    TubularMesh::from_buffers(
        tubular_segments,
        radial_segments,
        config.radius,
        vertices,
        normals,
        tangents,
        uvs,
        indices,
    )
}

/// Generate frames along a curve and sweep a tube around them.
///
/// Convenience for [`rotation_minimizing_frames`] followed by
/// [`tube_from_frames`].
///
/// # Errors
///
/// Frame errors are reported as [`TubeError::Frames`]; otherwise as
/// [`tube_from_frames`].
///
/// # Example
///
/// ```
/// use curve_frames::{BSpline, CurveSampler, RmfConfig};
/// use mesh_tube::{TubeConfig, tube_from_curve};
/// use nalgebra::Point3;
///
/// let line = BSpline::clamped(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 10.0)],
///     1,
/// )
/// .unwrap();
///
/// let params = line.uniform_parameters(11);
/// let config = TubeConfig::default().with_radius(2.0);
/// let mesh = tube_from_curve(&line, &params, &RmfConfig::default(), &config).unwrap();
///
/// assert_eq!(mesh.tubular_segments(), 10);
/// ```
pub fn tube_from_curve<S: CurveSampler + ?Sized>(
    sampler: &S,
    parameters: &[f64],
    rmf: &RmfConfig,
    config: &TubeConfig,
) -> TubeResult<TubularMesh> {
    config.validate()?;
    let frames = rotation_minimizing_frames(sampler, parameters, rmf)?;
    tube_from_frames(&frames, config)
}

/// Buffer sizes for a mesh whose point indices all fit in `u32`.
fn indexable_sizes(tubular_segments: usize, radial_segments: usize) -> TubeResult<BufferSizes> {
    let sizes = TubularMesh::buffer_sizes(tubular_segments, radial_segments).ok_or_else(|| {
        TubeError::InconsistentBuffers {
            reason: format!(
                "{tubular_segments} x {radial_segments} segments overflow the buffer sizes"
            ),
        }
    })?;

    if u32::try_from(sizes.points).is_err() {
        return Err(TubeError::InconsistentBuffers {
            reason: format!("{} points exceed the u32 index range", sizes.points),
        });
    }

    Ok(sizes)
}

/// Empty buffer with room for exactly `len` elements.
fn reserve_buffer<T>(len: usize) -> TubeResult<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|err| TubeError::InconsistentBuffers {
            reason: format!("cannot allocate {len} buffer elements: {err}"),
        })?;
    Ok(buffer)
}

/// Append indices for `tubular_segments x radial_segments` quads.
///
/// Callers guarantee every point index fits in `u32`.
#[allow(clippy::cast_possible_truncation)]
fn push_ring_indices(indices: &mut Vec<u32>, tubular_segments: usize, radial_segments: usize) {
    let stride = radial_segments + 1;

    for i in 1..=tubular_segments {
        for j in 1..=radial_segments {
            let a = (stride * (i - 1) + (j - 1)) as u32;
            let b = (stride * i + (j - 1)) as u32;
            let c = (stride * i + j) as u32;
            let d = (stride * (i - 1) + j) as u32;

            indices.extend_from_slice(&[a, d, b, b, d, c]);
        }
    }
}
