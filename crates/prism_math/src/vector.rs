use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec3;

use crate::Point3;

/// A direction in 3D space.
///
/// The magnitude and unit-length form are always derived from the raw
/// triple, so they can never disagree with it. All operations return new
/// values.
///
/// Note that [`Vector3::scale`] works on the *unit* direction: the result has
/// length `|s|`, whatever the length of `self`. Use `v * s` for plain
/// component-wise scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3(DVec3);

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Vector3 = Vector3(DVec3::ZERO);
    pub const X: Vector3 = Vector3(DVec3::X);
    pub const Y: Vector3 = Vector3(DVec3::Y);
    pub const Z: Vector3 = Vector3(DVec3::Z);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Vector from `tail` to `head` (head minus tail).
    #[inline]
    pub fn between(tail: Point3, head: Point3) -> Self {
        Self(head.raw() - tail.raw())
    }

    #[inline]
    pub fn from_raw(raw: DVec3) -> Self {
        Self(raw)
    }

    /// The raw (not normalized) triple.
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

    /// Component by index (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        self.0[index]
    }

    /// Length of the raw triple.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.0.length()
    }

    /// Unit-length form. The zero vector maps to itself.
    #[inline]
    pub fn unit(&self) -> Vector3 {
        Self(self.0.normalize_or_zero())
    }

    /// Vector of length `s` along this vector's direction.
    #[inline]
    pub fn scale(&self, s: f64) -> Vector3 {
        Self(self.0.normalize_or_zero() * s)
    }

    #[inline]
    pub fn dot(&self, other: Vector3) -> f64 {
        self.0.dot(other.0)
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(&self, other: Vector3) -> Vector3 {
        let (a, b) = (self.0, other.0);
        Self::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }

    /// Same vector pointing the other way.
    #[inline]
    pub fn reverse(&self) -> Vector3 {
        Self(-self.0)
    }

    /// Treat this vector as a position relative to the origin.
    #[inline]
    pub fn to_point(&self) -> Point3 {
        Point3::from_raw(self.0)
    }

    /// True if every component is within `epsilon` of `other`'s.
    pub fn abs_diff_eq(&self, other: Vector3, epsilon: f64) -> bool {
        self.0.abs_diff_eq(other.0, epsilon)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    #[inline]
    fn add(self, rhs: Vector3) -> Vector3 {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, rhs: Vector3) -> Vector3 {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    #[inline]
    fn neg(self) -> Vector3 {
        self.reverse()
    }
}

/// Raw component-wise scaling (not the same as [`Vector3::scale`]).
impl Mul<f64> for Vector3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: f64) -> Vector3 {
        Self(self.0 * rhs)
    }
}

impl From<DVec3> for Vector3 {
    fn from(raw: DVec3) -> Self {
        Self(raw)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        v.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_cross_right_handed() {
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::Y.cross(Vector3::Z), Vector3::X);
        assert_eq!(Vector3::Z.cross(Vector3::X), Vector3::Y);
        assert_eq!(Vector3::Y.cross(Vector3::X), -Vector3::Z);
    }

    #[test]
    fn test_cross_with_self_is_zero() {
        let samples = [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.3, 0.0, 7.5),
            Vector3::new(0.0, -1.0, 0.0),
        ];
        for v in samples {
            let u = v.unit();
            assert!(u.cross(u).abs_diff_eq(Vector3::ZERO, EPS));
        }
    }

    #[test]
    fn test_cross_is_orthogonal() {
        let v = Vector3::new(0.2, -0.7, 1.3).unit();
        let others = [
            Vector3::new(4.0, 1.0, -2.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(-3.0, 8.0, 0.5),
        ];
        for w in others {
            assert!(v.dot(v.cross(w)).abs() < EPS);
        }
    }

    #[test]
    fn test_zero_vector_normalizes_to_zero() {
        let zero = Vector3::ZERO;
        assert_eq!(zero.unit(), Vector3::ZERO);
        assert_eq!(zero.scale(5.0), Vector3::ZERO);
        assert_eq!(zero.magnitude(), 0.0);
    }

    #[test]
    fn test_scale_uses_unit_direction() {
        let v = Vector3::new(0.0, 3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);

        let scaled = v.scale(2.0);
        assert!((scaled.magnitude() - 2.0).abs() < EPS);
        assert!(scaled.abs_diff_eq(Vector3::new(0.0, 1.2, 1.6), EPS));

        // Raw multiplication keeps the input length
        let raw = v * 2.0;
        assert_eq!(raw, Vector3::new(0.0, 6.0, 8.0));
    }

    #[test]
    fn test_between_points() {
        let tail = Point3::new(1.0, 1.0, 1.0);
        let head = Point3::new(2.0, 3.0, 4.0);
        assert_eq!(Vector3::between(tail, head), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_add_sub_reverse() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a.reverse(), Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(b), 32.0);
    }
}
