// Transform utilities for placing model vertices in world space.
//
// Builds rotation-about-an-arbitrary-axis, uniform scale and translation
// matrices on top of glam::DMat4 and composes them as T * S * R.

use glam::{DMat4, DVec3, DVec4};

use crate::{Point3, Vector3};

/// Extension trait for DMat4 to work with the kernel's point and vector types.
pub trait Mat4Ext {
    /// Transform a point (implicit w=1, translation applies).
    fn transform_point(&self, point: Point3) -> Point3;
}

impl Mat4Ext for DMat4 {
    fn transform_point(&self, point: Point3) -> Point3 {
        Point3::from_raw(self.transform_point3(point.raw()))
    }
}

/// An axis that is guaranteed not to be parallel to `w`.
///
/// Copies `w` and forces its smallest-magnitude coordinate to 1. When two
/// coordinates tie, the first one wins.
pub fn non_parallel_axis(w: Vector3) -> Vector3 {
    let mut m = [w.x(), w.y(), w.z()];
    let mut min_index = 0;
    for i in 1..3 {
        if m[i].abs() < m[min_index].abs() {
            min_index = i;
        }
    }
    m[min_index] = 1.0;
    Vector3::new(m[0], m[1], m[2])
}

/// Rotation by `theta_degrees` about `axis`.
///
/// Changes basis so that `axis` becomes Z, rotates about Z and changes back:
/// `Rᵀ · Rz(θ) · R` where `R` has rows U, V, W. A zero axis yields the
/// identity.
pub fn rotation_about_axis(axis: Vector3, theta_degrees: f64) -> DMat4 {
    let w = axis.unit();
    if w == Vector3::ZERO {
        return DMat4::IDENTITY;
    }
    let m = non_parallel_axis(w);
    let u = m.cross(w).unit();
    let v = w.cross(u).unit();

    let basis = DMat4::from_cols(
        u.raw().extend(0.0),
        v.raw().extend(0.0),
        w.raw().extend(0.0),
        DVec4::W,
    )
    .transpose();
    let z_rotation = DMat4::from_rotation_z(theta_degrees.to_radians());

    basis.transpose() * z_rotation * basis
}

/// Uniform scale matrix.
pub fn scale_matrix(factor: f64) -> DMat4 {
    DMat4::from_scale(DVec3::splat(factor))
}

/// Translation that moves the origin to `point`.
pub fn translation_matrix(point: Point3) -> DMat4 {
    DMat4::from_translation(point.raw())
}

/// Rigid placement of a model instance: rotate, then scale, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Rotation axis (need not be unit length)
    pub axis: Vector3,
    /// Rotation angle in degrees
    pub theta_degrees: f64,
    /// Uniform scale factor
    pub scale: f64,
    /// Where the model origin ends up
    pub translation: Point3,
}

impl Placement {
    pub fn new(axis: Vector3, theta_degrees: f64, scale: f64, translation: Point3) -> Self {
        Self {
            axis,
            theta_degrees,
            scale,
            translation,
        }
    }

    /// The composed matrix `T · S · R`.
    pub fn matrix(&self) -> DMat4 {
        translation_matrix(self.translation)
            * scale_matrix(self.scale)
            * rotation_about_axis(self.axis, self.theta_degrees)
    }

    /// Transform every vertex into world space.
    pub fn apply(&self, vertices: &[Point3]) -> Vec<Point3> {
        let matrix = self.matrix();
        vertices.iter().map(|&v| matrix.transform_point(v)).collect()
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(Vector3::Z, 0.0, 1.0, Point3::ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Vector3, b: Vector3) -> bool {
        a.abs_diff_eq(b, EPS)
    }

    fn rotate(matrix: &DMat4, v: Vector3) -> Vector3 {
        Vector3::from_raw(matrix.transform_vector3(v.raw()))
    }

    #[test]
    fn test_non_parallel_axis() {
        assert_eq!(non_parallel_axis(Vector3::new(0.0, 0.0, 1.0)), Vector3::new(1.0, 0.0, 1.0));
        assert_eq!(non_parallel_axis(Vector3::new(0.6, -0.1, 0.8)), Vector3::new(0.6, 1.0, 0.8));
        // Ties go to the first coordinate
        assert_eq!(non_parallel_axis(Vector3::new(0.5, 0.5, 0.9)), Vector3::new(1.0, 0.5, 0.9));
    }

    #[test]
    fn test_identity_placement_is_noop() {
        let vertices = vec![
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-4.5, 0.0, 2.25),
            Point3::new(0.0, -7.0, 0.1),
        ];
        for axis in [Vector3::X, Vector3::new(1.0, 1.0, 0.0), Vector3::new(0.3, -2.0, 5.0)] {
            let placement = Placement::new(axis, 0.0, 1.0, Point3::ORIGIN);
            let placed = placement.apply(&vertices);
            for (a, b) in placed.iter().zip(&vertices) {
                assert!(a.raw().abs_diff_eq(b.raw(), EPS), "{:?} != {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_rotation_about_z_matches_standard_rotation() {
        let rotation = rotation_about_axis(Vector3::Z, 90.0);
        let rotated = rotate(&rotation, Vector3::X);
        assert!(close(rotated, Vector3::Y), "{:?}", rotated);
    }

    #[test]
    fn test_rotation_about_x() {
        let rotation = rotation_about_axis(Vector3::new(2.0, 0.0, 0.0), 90.0);
        let rotated = rotate(&rotation, Vector3::Y);
        assert!(close(rotated, Vector3::Z), "{:?}", rotated);
    }

    #[test]
    fn test_rotation_keeps_axis_fixed() {
        let axis = Vector3::new(1.0, 2.0, -1.0);
        let rotation = rotation_about_axis(axis, 73.0);
        assert!(close(rotate(&rotation, axis), axis));
    }

    #[test]
    fn test_rotation_inverse() {
        let axis = Vector3::new(0.4, -1.0, 2.5);
        let v = Vector3::new(3.0, -2.0, 0.5);
        for theta in [15.0, 90.0, 147.5, -30.0] {
            let forward = rotation_about_axis(axis, theta);
            let back = rotation_about_axis(axis, -theta);
            let round_trip = rotate(&back, rotate(&forward, v));
            assert!(close(round_trip, v), "theta {}: {:?}", theta, round_trip);
        }
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(rotation_about_axis(Vector3::ZERO, 45.0), DMat4::IDENTITY);
    }

    #[test]
    fn test_placement_order_rotate_scale_translate() {
        // Rotate X onto Y, scale by 2, then move by (10, 0, 0)
        let placement = Placement::new(Vector3::Z, 90.0, 2.0, Point3::new(10.0, 0.0, 0.0));
        let placed = placement.apply(&[Point3::new(1.0, 0.0, 0.0)]);
        assert!(placed[0].raw().abs_diff_eq(DVec3::new(10.0, 2.0, 0.0), EPS), "{:?}", placed[0]);
    }

    #[test]
    fn test_translation_moves_points() {
        let matrix = translation_matrix(Point3::new(10.0, 20.0, 30.0));
        assert_eq!(
            matrix.transform_point(Point3::new(1.0, 2.0, 3.0)),
            Point3::new(11.0, 22.0, 33.0)
        );
    }
}
