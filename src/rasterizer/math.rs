//! Vector math for the 3D pipeline

use std::ops::{Add, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

/// Below this length a direction is treated as zero
const NORMALIZE_EPSILON: f32 = 1e-6;

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn len_squared(self) -> f32 {
        self.dot(self)
    }

    /// Unit vector in the same direction, or zero for (near) zero-length input
    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l < NORMALIZE_EPSILON {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Unclamped linear interpolation, `t = 0` gives `self`
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        self + (other - self) * t
    }

    /// Same vector with the Y component dropped (ground plane)
    pub fn flat(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of edge length `size` centered on the origin
    pub fn cube(size: f32) -> Self {
        let s = size / 2.0;
        Self::new(Vec3::new(-s, -s, -s), Vec3::new(s, s, s))
    }

    /// Check if a point is inside the box
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y && point.y <= self.max.y
            && point.z >= self.min.z && point.z <= self.max.z
    }

    /// Get center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The 8 corners offset by `origin`: the -Z face starting at `min`
    /// and winding through +X, +Y, then the same four at +Z.
    pub fn corners(&self, origin: Vec3) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
        ]
        .map(|c| c + origin)
    }
}

/// Scalar interpolation clamped to `t` in [0, 1]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert_eq!(Vec3::new(1e-8, 0.0, 0.0).normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = Vec3::new(3.0, -4.0, 12.0).normalize();
        assert!((n.len() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(lerp(2.0, 4.0, 7.0), 4.0);
        assert_eq!(lerp(2.0, 4.0, -1.0), 2.0);

        let mid = Vec3::new(0.0, 0.0, -5.0).lerp(Vec3::new(10.0, 2.0, 5.0), 0.5);
        assert_eq!(mid, Vec3::new(5.0, 1.0, 0.0));
    }

    #[test]
    fn test_aabb_corners_and_contains() {
        let b = Aabb::cube(2.0);
        let corners = b.corners(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(corners[0], Vec3::new(9.0, -1.0, -1.0));
        assert_eq!(corners[6], Vec3::new(11.0, 1.0, 1.0));
        assert!(b.contains(Vec3::new(0.5, -1.0, 0.0)));
        assert!(!b.contains(Vec3::new(1.5, 0.0, 0.0)));
        assert_eq!(b.center(), Vec3::ZERO);
    }
}
