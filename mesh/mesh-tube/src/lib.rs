//! Tubular mesh generation along curves.
//!
//! Sweeps a circular cross-section along a sequence of frames (typically
//! rotation-minimizing frames from `curve-frames`) and emits flat render
//! buffers: positions, outward normals, tangents, texture coordinates and
//! triangle indices.
//!
//! # Example
//!
//! ```
//! use curve_frames::{BSpline, CurveSampler, RmfConfig};
//! use mesh_tube::{TubeConfig, tube_from_curve};
//! use nalgebra::Point3;
//!
//! let spline = BSpline::clamped(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(10.0, 5.0, 0.0),
//!         Point3::new(20.0, -5.0, 5.0),
//!         Point3::new(30.0, 0.0, 0.0),
//!     ],
//!     3,
//! )
//! .unwrap();
//!
//! let params = spline.uniform_parameters(33);
//! let config = TubeConfig::default().with_radius(1.5).with_radial_segments(12);
//! let mesh = tube_from_curve(&spline, &params, &RmfConfig::default(), &config).unwrap();
//!
//! assert_eq!(mesh.tubular_segments(), 32);
//! assert_eq!(mesh.point_count(), 33 * 13);
//! assert_eq!(mesh.triangle_count(), 32 * 12 * 2);
//! ```
//!
//! # Repeated Frames
//!
//! Consecutive identical frames are collapsed into a single ring, so the
//! mesh never contains zero-area quads. The realized segment count is
//! reported by [`TubularMesh::tubular_segments`].
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. The buffers are
//! plain `Vec<f64>`/`Vec<u32>` ready to upload to any renderer.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for meshes and config

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_precision_loss,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::suboptimal_flops
)]

mod collapse;
mod error;
mod mesh;
mod tube;

pub use collapse::distinct_frame_indices;
pub use error::{TubeError, TubeResult};
pub use mesh::{
    BufferSizes, INDICES_PER_FACE, NORMAL_COMPONENTS, TANGENT_COMPONENTS, TubularMesh,
    UV_COMPONENTS, VERTEX_COMPONENTS,
};
pub use tube::{MIN_RADIAL_SEGMENTS, TubeConfig, tube_from_curve, tube_from_frames};

// Re-export the frame type consumed by the builder
pub use curve_frames::Frame;
