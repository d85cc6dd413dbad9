//! Sphere primitive for ray casting.

use std::sync::Arc;

use prism_core::Material;
use prism_math::{Point3, Vector3};

use crate::hittable::{Hittable, MIN_HIT_DISTANCE};
use crate::Ray;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance to the near root of the ray/sphere equation.
    ///
    /// `None` when the ray's line misses the sphere. The value can be zero
    /// or negative when the sphere is behind (or around) the origin. The far
    /// root is never returned.
    pub fn near_root(&self, ray: &Ray) -> Option<f64> {
        let oc = self.center - ray.origin();
        let v = ray.direction().dot(oc);
        let disc = self.radius * self.radius - (oc.dot(oc) - v * v);
        if disc < 0.0 {
            return None;
        }
        Some(v - disc.sqrt())
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.near_root(ray).filter(|&t| t > MIN_HIT_DISTANCE)
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn normal_at(&self, point: Point3) -> Vector3 {
        (point - self.center).unit()
    }
}
