//! Hittable trait, primitive dispatch and the closest-hit accumulator.

use prism_core::Material;
use prism_math::{Interval, Point3, Vector3};

use crate::{Ray, Sphere, Triangle};

/// Hits closer than this are ignored, so a ray leaving a surface does not
/// hit that same surface again.
pub const MIN_HIT_DISTANCE: f64 = 1e-6;

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Distance along `ray` to the intersection, or `None` for a miss.
    ///
    /// Returned distances are always greater than [`MIN_HIT_DISTANCE`].
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Surface material.
    fn material(&self) -> &Material;

    /// Outward surface normal at `point` (unit length).
    fn normal_at(&self, point: Point3) -> Vector3;
}

/// A reference to one of the scene's primitives.
#[derive(Debug, Clone, Copy)]
pub enum Primitive<'a> {
    Triangle(&'a Triangle),
    Sphere(&'a Sphere),
}

impl<'a> Primitive<'a> {
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Primitive::Triangle(triangle) => triangle.intersect(ray),
            Primitive::Sphere(sphere) => sphere.intersect(ray),
        }
    }

    pub fn material(&self) -> &'a Material {
        match *self {
            Primitive::Triangle(triangle) => triangle.material(),
            Primitive::Sphere(sphere) => sphere.material(),
        }
    }

    pub fn normal_at(&self, point: Point3) -> Vector3 {
        match self {
            Primitive::Triangle(triangle) => triangle.normal_at(point),
            Primitive::Sphere(sphere) => sphere.normal_at(point),
        }
    }
}

/// The closest intersection found along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Distance along the ray
    pub t: f64,
    /// Intersection point
    pub point: Point3,
    /// What was hit
    pub primitive: Primitive<'a>,
}

/// Closest-hit bookkeeping for a single cast.
///
/// Starts empty (distance +∞). Each candidate is kept only if it is strictly
/// closer than the current best, so on ties the first primitive tested wins.
#[derive(Debug, Clone)]
pub struct HitRecord<'a> {
    ray: Ray,
    closest: Option<(f64, Primitive<'a>)>,
}

impl<'a> HitRecord<'a> {
    /// An empty record for `ray`.
    pub fn new(ray: Ray) -> Self {
        Self { ray, closest: None }
    }

    /// Distance to the closest hit so far (+∞ if none).
    pub fn closest_t(&self) -> f64 {
        self.closest.map_or(f64::INFINITY, |(t, _)| t)
    }

    /// Test `primitive` against the ray and keep it if it is the new
    /// closest hit. Returns true if the record changed.
    pub fn consider(&mut self, primitive: Primitive<'a>) -> bool {
        let accepted = Interval::new(MIN_HIT_DISTANCE, self.closest_t());
        match primitive.intersect(&self.ray) {
            Some(t) if accepted.surrounds(t) => {
                self.closest = Some((t, primitive));
                true
            }
            _ => false,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.closest.is_some()
    }

    /// The closest hit, if any.
    pub fn hit(&self) -> Option<Hit<'a>> {
        self.closest.map(|(t, primitive)| Hit {
            t,
            point: self.ray.at(t),
            primitive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sphere_at(z: f64) -> Sphere {
        Sphere::new(Point3::new(0.0, 0.0, z), 1.0, Arc::new(Material::default()))
    }

    #[test]
    fn test_empty_record() {
        let record = HitRecord::new(Ray::new(Point3::ORIGIN, Vector3::X));
        assert!(!record.is_hit());
        assert!(record.hit().is_none());
        assert_eq!(record.closest_t(), f64::INFINITY);
    }

    #[test]
    fn test_closest_hit_independent_of_order() {
        let near = sphere_at(-5.0);
        let far = sphere_at(-10.0);
        let ray = Ray::new(Point3::ORIGIN, Vector3::new(0.0, 0.0, -1.0));

        let mut forward = HitRecord::new(ray);
        forward.consider(Primitive::Sphere(&near));
        forward.consider(Primitive::Sphere(&far));

        let mut backward = HitRecord::new(ray);
        backward.consider(Primitive::Sphere(&far));
        backward.consider(Primitive::Sphere(&near));

        assert!((forward.closest_t() - 4.0).abs() < 1e-9);
        assert!((backward.closest_t() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_keeps_first() {
        let first = sphere_at(-5.0);
        let second = sphere_at(-5.0);
        let ray = Ray::new(Point3::ORIGIN, Vector3::new(0.0, 0.0, -1.0));

        let mut record = HitRecord::new(ray);
        assert!(record.consider(Primitive::Sphere(&first)));
        assert!(!record.consider(Primitive::Sphere(&second)));

        match record.hit().unwrap().primitive {
            Primitive::Sphere(s) => assert!(std::ptr::eq(s, &first)),
            Primitive::Triangle(_) => panic!("expected sphere"),
        }
    }

    #[test]
    fn test_hit_point() {
        let sphere = sphere_at(-5.0);
        let mut record = HitRecord::new(Ray::new(Point3::ORIGIN, Vector3::new(0.0, 0.0, -3.0)));
        record.consider(Primitive::Sphere(&sphere));
        let hit = record.hit().unwrap();
        assert_eq!(hit.point, Point3::new(0.0, 0.0, -4.0));
        assert_eq!(hit.primitive.normal_at(hit.point), Vector3::Z);
    }
}
