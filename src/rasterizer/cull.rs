//! Approximate view-cone culling
//!
//! Both tests work on the ground plane (XZ) around the camera's yaw and
//! prefer keeping things: anything that slips through is handled by the
//! near-plane clip and the depth test later.

use serde::{Serialize, Deserialize};
use super::camera::Camera;
use super::math::{Aabb, Vec3};

/// Culling thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullSettings {
    /// Horizontal draw distance
    pub range: f32,
    /// Minimum cosine between view direction and direction to a point
    pub min_cos: f32,
    /// Half-angle of the view cone for the bounding-sphere test, in degrees
    pub half_fov_degrees: f32,
}

impl Default for CullSettings {
    fn default() -> Self {
        Self {
            range: 50.0,
            min_cos: 0.3,
            half_fov_degrees: 45.0,
        }
    }
}

/// Axis-aligned box placed at `center`, bounds relative to it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundedBox {
    pub center: Vec3,
    pub bounds: Aabb,
}

impl BoundedBox {
    pub fn new(center: Vec3, bounds: Aabb) -> Self {
        Self { center, bounds }
    }

    /// Distance from `center` to the farthest corner
    pub fn bounding_sphere_radius(&self) -> f32 {
        let (min, max) = (self.bounds.min, self.bounds.max);
        let dx = min.x.abs().max(max.x.abs());
        let dy = min.y.abs().max(max.y.abs());
        let dz = min.z.abs().max(max.z.abs());
        Vec3::new(dx, dy, dz).len()
    }
}

/// Frustum culling helper bound to one camera pose
pub struct Frustum {
    position: Vec3,
    forward: Vec3,
    near_plane: f32,
    settings: CullSettings,
    tan_half_fov: f32,
}

impl Frustum {
    pub fn new(camera: &Camera, near_plane: f32, settings: CullSettings) -> Self {
        Self {
            position: camera.position,
            forward: camera.ground_forward(),
            near_plane,
            settings,
            tan_half_fov: settings.half_fov_degrees.to_radians().tan(),
        }
    }

    /// Point test. A point exactly at `range` is rejected.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let to_point = (point - self.position).flat();
        let distance_sq = to_point.len_squared();

        if distance_sq >= self.settings.range * self.settings.range {
            return false;
        }

        let distance = distance_sq.sqrt();
        if distance < 1e-6 {
            return true;
        }

        let dir = to_point * (1.0 / distance);
        dir.dot(self.forward) >= self.settings.min_cos
    }

    /// Bounding-sphere test for a box
    pub fn contains_box(&self, bbox: &BoundedBox) -> bool {
        let radius = bbox.bounding_sphere_radius();
        let to_object = (bbox.center - self.position).flat();
        let distance = to_object.len();

        if distance > self.settings.range + radius || distance < self.near_plane - radius {
            return false;
        }

        // Distance along the view ray
        let d = to_object.dot(self.forward);
        if d < 0.0 && distance > radius {
            return false;
        }

        let dist_to_ray = (to_object - self.forward * d).len();
        if dist_to_ray < radius {
            return true;
        }

        dist_to_ray - radius < d * self.tan_half_fov
    }
}

/// One-off point test
pub fn point_in_frustum(point: Vec3, camera: &Camera, near_plane: f32, settings: CullSettings) -> bool {
    Frustum::new(camera, near_plane, settings).contains_point(point)
}

/// One-off bounding-sphere test
pub fn box_in_frustum(bbox: &BoundedBox, camera: &Camera, near_plane: f32, settings: CullSettings) -> bool {
    Frustum::new(camera, near_plane, settings).contains_box(bbox)
}
