use std::ops::{Add, Sub};

use glam::DVec3;

use crate::Vector3;

/// Tolerance used by [`Point3`] equality.
///
/// Transformed vertices and hit points pick up round-off, so two points are
/// considered equal when every component is within this distance.
pub const POINT_EPSILON: f64 = 0.001;

/// A position in 3D space.
///
/// `==` is approximate (see [`POINT_EPSILON`]) and therefore not transitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point3(DVec3);

impl Point3 {
    pub const ORIGIN: Point3 = Point3(DVec3::ZERO);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn from_raw(raw: DVec3) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(&self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Vector from the origin to this point.
    #[inline]
    pub fn to_vector(&self) -> Vector3 {
        Vector3::from_raw(self.0)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: Point3) -> f64 {
        self.0.distance(other.0)
    }

    /// Component-wise comparison within [`POINT_EPSILON`].
    pub fn approx_eq(&self, other: &Point3) -> bool {
        self.0.abs_diff_eq(other.0, POINT_EPSILON)
    }
}

impl PartialEq for Point3 {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Vector3) -> Point3 {
        Self(self.0 + rhs.raw())
    }
}

impl Sub<Vector3> for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, rhs: Vector3) -> Point3 {
        Self(self.0 - rhs.raw())
    }
}

/// `head - tail` is the vector from `tail` to `head`.
impl Sub for Point3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, rhs: Point3) -> Vector3 {
        Vector3::between(rhs, self)
    }
}

impl From<DVec3> for Point3 {
    fn from(raw: DVec3) -> Self {
        Self(raw)
    }
}

impl From<Point3> for DVec3 {
    fn from(p: Point3) -> Self {
        p.0
    }
}
