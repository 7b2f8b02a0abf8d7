//! The tubular mesh value type.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{TubeError, TubeResult};

/// Components per vertex position.
pub const VERTEX_COMPONENTS: usize = 3;
/// Components per vertex normal.
pub const NORMAL_COMPONENTS: usize = 3;
/// Components per vertex tangent (direction plus handedness).
pub const TANGENT_COMPONENTS: usize = 4;
/// Components per texture coordinate.
pub const UV_COMPONENTS: usize = 2;
/// Indices per quad face (two triangles).
pub const INDICES_PER_FACE: usize = 6;

/// Expected element counts of every [`TubularMesh`] buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BufferSizes {
    /// Number of mesh points (`(tubular + 1) * (radial + 1)`).
    pub points: usize,
    /// Length of the flattened vertex buffer.
    pub vertices: usize,
    /// Length of the flattened normal buffer.
    pub normals: usize,
    /// Length of the flattened tangent buffer.
    pub tangents: usize,
    /// Length of the flattened uv buffer.
    pub uvs: usize,
    /// Length of the index buffer.
    pub indices: usize,
}

/// A tube surface as flat render buffers.
///
/// Points are laid out ring by ring: point `i * (radial_segments + 1) + j` is
/// vertex `j` of ring `i`. Each ring carries one extra point duplicating its
/// first so texture coordinates do not wrap.
///
/// The default value is the empty mesh (zero segments, zero radius, empty
/// buffers). [`TubularMesh::take`] moves the buffers out and leaves that
/// empty state behind.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubularMesh {
    tubular_segments: usize,
    radial_segments: usize,
    radius: f64,
    vertices: Vec<f64>,
    normals: Vec<f64>,
    tangents: Vec<f64>,
    uvs: Vec<f64>,
    indices: Vec<u32>,
}

impl TubularMesh {
    /// Assemble a mesh from prepared buffers.
    ///
    /// # Errors
    ///
    /// Returns [`TubeError::InconsistentBuffers`] if the buffers violate any
    /// invariant checked by [`Self::check_buffers`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_buffers(
        tubular_segments: usize,
        radial_segments: usize,
        radius: f64,
        vertices: Vec<f64>,
        normals: Vec<f64>,
        tangents: Vec<f64>,
        uvs: Vec<f64>,
        indices: Vec<u32>,
    ) -> TubeResult<Self> {
        let mesh = Self {
            tubular_segments,
            radial_segments,
            radius,
            vertices,
            normals,
            tangents,
            uvs,
            indices,
        };
        mesh.check_buffers()?;
        Ok(mesh)
    }

    /// Expected buffer sizes for the given segment counts.
    ///
    /// Returns `None` if any size overflows `usize`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_tube::TubularMesh;
    ///
    /// let sizes = TubularMesh::buffer_sizes(50, 8).unwrap();
    /// assert_eq!(sizes.points, 51 * 9);
    /// assert_eq!(sizes.tangents, 51 * 9 * 4);
    /// assert_eq!(sizes.indices, 50 * 8 * 6);
    ///
    /// assert!(TubularMesh::buffer_sizes(1, usize::MAX).is_none());
    /// ```
    #[must_use]
    pub fn buffer_sizes(tubular_segments: usize, radial_segments: usize) -> Option<BufferSizes> {
        let rings = tubular_segments.checked_add(1)?;
        let points = rings.checked_mul(radial_segments.checked_add(1)?)?;
        Some(BufferSizes {
            points,
            vertices: points.checked_mul(VERTEX_COMPONENTS)?,
            normals: points.checked_mul(NORMAL_COMPONENTS)?,
            tangents: points.checked_mul(TANGENT_COMPONENTS)?,
            uvs: points.checked_mul(UV_COMPONENTS)?,
            indices: tubular_segments
                .checked_mul(radial_segments)?
                .checked_mul(INDICES_PER_FACE)?,
        })
    }

    /// Number of ring-to-ring spans actually realized.
    #[must_use]
    pub fn tubular_segments(&self) -> usize {
        self.tubular_segments
    }

    /// Number of subdivisions of the circular profile.
    #[must_use]
    pub fn radial_segments(&self) -> usize {
        self.radial_segments
    }

    /// Tube radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Flattened `xyz` positions.
    #[must_use]
    pub fn vertices(&self) -> &[f64] {
        &self.vertices
    }

    /// Flattened `xyz` outward unit normals.
    #[must_use]
    pub fn normals(&self) -> &[f64] {
        &self.normals
    }

    /// Flattened `xyzw` tangents; `w` is the handedness (always 1.0).
    #[must_use]
    pub fn tangents(&self) -> &[f64] {
        &self.tangents
    }

    /// Flattened `uv` texture coordinates.
    #[must_use]
    pub fn uvs(&self) -> &[f64] {
        &self.uvs
    }

    /// Triangle indices, six per quad face.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Check if the mesh has no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of mesh points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.vertices.len() / VERTEX_COMPONENTS
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of point `index`.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<Point3<f64>> {
        let start = index.checked_mul(VERTEX_COMPONENTS)?;
        let c = self.vertices.get(start..start.checked_add(VERTEX_COMPONENTS)?)?;
        Some(Point3::new(c[0], c[1], c[2]))
    }

    /// Normal of point `index`.
    #[must_use]
    pub fn normal(&self, index: usize) -> Option<Vector3<f64>> {
        let start = index.checked_mul(NORMAL_COMPONENTS)?;
        let c = self.normals.get(start..start.checked_add(NORMAL_COMPONENTS)?)?;
        Some(Vector3::new(c[0], c[1], c[2]))
    }

    /// Move the mesh out, leaving the empty mesh in its place.
    #[must_use]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Verify the buffer invariants.
    ///
    /// Every buffer length must be a multiple of its component width, all
    /// per-point buffers must describe the same number of points, lengths
    /// must match [`Self::buffer_sizes`] (an empty mesh is consistent), and
    /// every index must address an existing point.
    ///
    /// # Errors
    ///
    /// Returns [`TubeError::InconsistentBuffers`] naming the first violation.
    pub fn check_buffers(&self) -> TubeResult<()> {
        let widths = [
            ("vertices", self.vertices.len(), VERTEX_COMPONENTS),
            ("normals", self.normals.len(), NORMAL_COMPONENTS),
            ("tangents", self.tangents.len(), TANGENT_COMPONENTS),
            ("uvs", self.uvs.len(), UV_COMPONENTS),
            ("indices", self.indices.len(), INDICES_PER_FACE),
        ];
        for (name, len, width) in widths {
            if len % width != 0 {
                return Err(inconsistent(format!(
                    "{name} length {len} is not a multiple of {width}"
                )));
            }
        }

        let points = self.point_count();
        let counts = [
            ("normals", self.normals.len() / NORMAL_COMPONENTS),
            ("tangents", self.tangents.len() / TANGENT_COMPONENTS),
            ("uvs", self.uvs.len() / UV_COMPONENTS),
        ];
        for (name, count) in counts {
            if count != points {
                return Err(inconsistent(format!(
                    "{name} describe {count} points, vertices describe {points}"
                )));
            }
        }

        if self.is_empty() && self.indices.is_empty() {
            return Ok(());
        }

        let Some(expected) = Self::buffer_sizes(self.tubular_segments, self.radial_segments)
        else {
            return Err(inconsistent(format!(
                "{} x {} segments overflow the buffer sizes",
                self.tubular_segments, self.radial_segments
            )));
        };
        if points != expected.points || self.indices.len() != expected.indices {
            return Err(inconsistent(format!(
                "{} points and {} indices do not match {} x {} segments",
                points,
                self.indices.len(),
                self.tubular_segments,
                self.radial_segments
            )));
        }

        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= points) {
            return Err(inconsistent(format!(
                "index {bad} out of bounds for {points} points"
            )));
        }

        Ok(())
    }
}

fn inconsistent(reason: String) -> TubeError {
    TubeError::InconsistentBuffers { reason }
}
