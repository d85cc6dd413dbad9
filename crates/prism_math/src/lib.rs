//! Geometry kernel for Prism.
//!
//! Points, directions and the model placement transforms used by every other
//! crate. Everything is `f64`.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod point;
mod transform;
mod vector;

pub use interval::Interval;
pub use point::{Point3, POINT_EPSILON};
pub use transform::{
    non_parallel_axis, rotation_about_axis, scale_matrix, translation_matrix, Mat4Ext, Placement,
};
pub use vector::Vector3;
