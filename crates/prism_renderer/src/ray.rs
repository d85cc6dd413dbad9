//! Ray type for ray casting.
//!
//! A ray is an origin point and a direction. The direction is always stored
//! at unit length, so the ray parameter `t` is a true distance.

use prism_math::{Point3, Vector3};

/// A ray with origin and unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray
    origin: Point3,
    /// Direction (unit length, or zero for a degenerate ray)
    direction: Vector3,
}

impl Ray {
    /// Create a new ray. `direction` is normalized.
    #[inline]
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.unit(),
        }
    }

    /// Ray starting at `from` and heading towards `to`.
    #[inline]
    pub fn towards(from: Point3, to: Point3) -> Self {
        Self::new(from, Vector3::between(from, to))
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Get the ray's unit direction.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Compute a point along the ray at distance t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Same origin, opposite direction.
    #[inline]
    pub fn reverse(&self) -> Ray {
        Self {
            origin: self.origin,
            direction: self.direction.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_normalized() {
        let ray = Ray::new(Point3::ORIGIN, Vector3::new(0.0, 0.0, -8.0));
        assert_eq!(ray.direction(), Vector3::new(0.0, 0.0, -1.0));
        assert!((ray.direction().magnitude() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0));

        assert_eq!(ray.at(0.0), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(1.0), Point3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(2.5), Point3::new(3.5, 0.0, 0.0));
    }

    #[test]
    fn test_towards_and_reverse() {
        let ray = Ray::towards(Point3::new(0.0, 5.0, 0.0), Point3::ORIGIN);
        assert_eq!(ray.direction(), Vector3::new(0.0, -1.0, 0.0));

        let back = ray.reverse();
        assert_eq!(back.origin(), ray.origin());
        assert_eq!(back.direction(), Vector3::Y);
    }

    #[test]
    fn test_zero_direction_stays_zero() {
        let ray = Ray::towards(Point3::ORIGIN, Point3::ORIGIN);
        assert_eq!(ray.direction(), Vector3::ZERO);
    }
}
