//! Solid world geometry handed to the renderer
//!
//! Pure data with minimal behavior. Turning it into lines lives in `shapes`.

use serde::{Serialize, Deserialize};
use crate::rasterizer::{Aabb, BoundedBox, Color, Vec3};

/// Outward normals of the six box faces, paired with corner indices
/// into [`Aabb::corners`]
pub const BOX_FACES: [([usize; 4], Vec3); 6] = [
    ([0, 1, 2, 3], Vec3::new(0.0, 0.0, -1.0)), // Front
    ([5, 4, 7, 6], Vec3::new(0.0, 0.0, 1.0)),  // Back
    ([4, 0, 3, 7], Vec3::new(-1.0, 0.0, 0.0)), // Left
    ([1, 5, 6, 2], Vec3::new(1.0, 0.0, 0.0)),  // Right
    ([3, 2, 6, 7], Vec3::new(0.0, 1.0, 0.0)),  // Top
    ([4, 5, 1, 0], Vec3::new(0.0, -1.0, 0.0)), // Bottom
];

/// The 12 edges of a box as corner index pairs
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// A colored box (platform, wall, crate)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolidBox {
    pub position: Vec3,
    /// Bounds relative to `position`
    pub bounds: Aabb,
    pub color: Color,
}

impl SolidBox {
    pub fn new(position: Vec3, bounds: Aabb, color: Color) -> Self {
        Self { position, bounds, color }
    }

    /// World-space corners
    pub fn corners(&self) -> [Vec3; 8] {
        self.bounds.corners(self.position)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.bounds.contains(point - self.position)
    }

    /// Culling proxy
    pub fn bounded(&self) -> BoundedBox {
        BoundedBox::new(self.position, self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normals_point_outward() {
        let b = SolidBox::new(Vec3::new(3.0, 1.0, -2.0), Aabb::cube(2.0), Color::WHITE);
        let corners = b.corners();
        for (indices, normal) in BOX_FACES {
            let center = indices
                .iter()
                .fold(Vec3::ZERO, |acc, &i| acc + corners[i])
                * 0.25;
            assert!((center - b.position).dot(normal) > 0.0);
        }
    }

    #[test]
    fn test_contains_is_relative_to_position() {
        let b = SolidBox::new(Vec3::new(8.0, -1.0, 5.0), Aabb::new(Vec3::new(-1.5, -1.0, -1.5), Vec3::new(1.5, 3.0, 1.5)), Color::GREEN);
        assert!(b.contains(Vec3::new(8.0, 1.5, 5.0)));
        assert!(!b.contains(Vec3::new(0.0, 0.0, 0.0)));
        assert_eq!(b.bounded().center, b.position);
    }
}
