//! Curve sampling and rotation-minimizing frames.
//!
//! This crate turns a parametric curve into a sequence of orthonormal frames
//! that twist as little as possible about the curve tangent. Such frames are
//! the basis for sweeping profiles (tubes, cables, pipes) along a curve
//! without the flips of Frenet-Serret frames.
//!
//! - [`CurveSampler`] - The evaluation interface: position and first
//!   derivative at a parameter, with an explicit domain
//! - [`BSpline`] - Arbitrary-degree B-spline implementing [`CurveSampler`]
//! - [`Frame`] - Position plus right-handed orthonormal basis
//! - [`rotation_minimizing_frames`] - Double reflection propagation
//!
//! # Example
//!
//! ```
//! use curve_frames::{BSpline, CurveSampler, RmfConfig, rotation_minimizing_frames};
//! use nalgebra::Point3;
//!
//! let spline = BSpline::clamped(
//!     vec![
//!         Point3::new(100.0, 200.0, 0.0),
//!         Point3::new(150.0, 220.0, 10.0),
//!         Point3::new(190.0, 120.0, 50.0),
//!         Point3::new(260.0, 70.0, 30.0),
//!         Point3::new(300.0, 200.0, 20.0),
//!     ],
//!     3,
//! )
//! .unwrap();
//!
//! let params = spline.uniform_parameters(50);
//! let frames = rotation_minimizing_frames(&spline, &params, &RmfConfig::default()).unwrap();
//!
//! assert_eq!(frames.len(), 50);
//! assert!(frames.iter().all(|f| f.is_orthonormal(1e-9)));
//! ```
//!
//! # Repeated Samples
//!
//! Repeating a parameter is not an error: the frame is carried forward
//! unchanged to the (identical) position. Consumers such as `mesh-tube`
//! collapse such runs.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//!
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for frames, splines and config

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::module_name_repetitions,
    clippy::needless_range_loop,
    clippy::suboptimal_flops
)]

mod bspline;
mod error;
mod frame;
mod rmf;
mod sampler;

pub use bspline::BSpline;
pub use error::{CurveError, CurveResult, DomainError};
pub use frame::Frame;
pub use rmf::{RmfConfig, rotation_minimizing_frames, rotation_minimizing_frames_into};
pub use sampler::{CurveSample, CurveSampler};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
