//! Camera system for 3D scene viewing.
//!
//! Provides a quaternion trackball with zoom and an eased reset animation,
//! plus the projection and transform helpers used by the renderer.

/// Viewport, projection, view/model transforms and the GPU camera uniform.
pub mod core;
/// Quaternion trackball controller.
pub mod trackball;

pub use self::core::{FrameMatrices, Projection, Viewport};
pub use trackball::TrackballCamera;
