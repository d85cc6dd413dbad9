//! Triangle primitive for ray casting.
//!
//! Intersection solves for the barycentric coordinates and ray distance
//! directly with a 3x3 linear system:
//!
//! ```text
//! [A−B | A−C | d] · [β, γ, t]ᵀ = A − origin
//! ```

use std::sync::Arc;

use prism_core::Material;
use prism_math::{DMat3, Point3, Vector3};

use crate::hittable::{Hittable, MIN_HIT_DISTANCE};
use crate::Ray;

/// Rays whose direction has a smaller cosine with the triangle's plane
/// normal are treated as parallel misses.
pub const PARALLEL_EPSILON: f64 = 1e-12;

/// Solution of the triangle/ray linear system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    /// Weight of vertex B
    pub beta: f64,
    /// Weight of vertex C
    pub gamma: f64,
    /// Distance along the ray
    pub t: f64,
}

impl Barycentric {
    /// True when the point lies inside the triangle (edges included).
    pub fn is_inside(&self) -> bool {
        self.beta >= 0.0 && self.gamma >= 0.0 && self.beta + self.gamma <= 1.0
    }
}

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    a: Point3,
    b: Point3,
    c: Point3,
    /// Indices of A, B, C in the source mesh
    indices: [usize; 3],
    /// Pre-computed face normal `(C−A) × (B−A)`, unit length
    normal: Vector3,
    material: Arc<Material>,
}

impl Triangle {
    /// Create a triangle that is not tied to a mesh.
    pub fn new(a: Point3, b: Point3, c: Point3, material: Arc<Material>) -> Self {
        Self::from_mesh(a, b, c, [0, 1, 2], material)
    }

    /// Create a triangle remembering the mesh vertex indices it came from.
    pub fn from_mesh(
        a: Point3,
        b: Point3,
        c: Point3,
        indices: [usize; 3],
        material: Arc<Material>,
    ) -> Self {
        let normal = (c - a).cross(b - a).unit();
        Self {
            a,
            b,
            c,
            indices,
            normal,
            material,
        }
    }

    pub fn vertices(&self) -> [Point3; 3] {
        [self.a, self.b, self.c]
    }

    /// Source mesh vertex indices of A, B and C.
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// The pre-computed unit normal. Zero for a degenerate triangle.
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Solve for β, γ and t without any range checks.
    ///
    /// Returns `None` when the ray is parallel to the triangle's plane.
    pub fn barycentric(&self, ray: &Ray) -> Option<Barycentric> {
        let d = ray.direction();
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        // Unit normal keeps the test independent of triangle size
        if ac.cross(ab).unit().dot(d).abs() < PARALLEL_EPSILON {
            return None;
        }

        let m = DMat3::from_cols((self.a - self.b).raw(), (self.a - self.c).raw(), d.raw());
        let rhs = (self.a - ray.origin()).raw();
        let solution = m.inverse() * rhs;

        Some(Barycentric {
            beta: solution.x,
            gamma: solution.y,
            t: solution.z,
        })
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.barycentric(ray)
            .filter(|bary| bary.is_inside() && bary.t > MIN_HIT_DISTANCE)
            .map(|bary| bary.t)
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn normal_at(&self, _point: Point3) -> Vector3 {
        self.normal
    }
}
