//! Pinhole camera and perspective projection
//!
//! World → camera space is a translation to the eye, a yaw about Y, then a
//! pitch about X. The camera looks down +Z in camera space. Projection uses
//! `fov` as a focal-length multiplier: screen offset = camera offset × fov / z.

use super::math::Vec3;
use super::trig::fast_sin_cos;
use super::types::ProjectedPoint;

/// How much horizontal view bob leans the yaw (head tilt)
pub const BOB_YAW_FACTOR: f32 = 0.02;

/// Pitch limit applied by [`Camera::rotate`]
pub const MAX_PITCH: f32 = 1.5;

/// Camera pose, mutated once per frame by movement logic
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    /// Feet position
    pub position: Vec3,
    /// Rotation about Y (rotY)
    pub yaw: f32,
    /// Rotation about X (rotX), positive looks up
    pub pitch: f32,
    /// Eye height above `position`
    pub height: f32,
    /// Vertical view bob
    pub bob_y: f32,
    /// Horizontal view bob, tilts the yaw slightly
    pub bob_x: f32,
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            ..Default::default()
        }
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Eye position: feet plus height plus vertical bob
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.position.y + self.height + self.bob_y,
            self.position.z,
        )
    }

    /// Yaw actually used for rendering, including the bob tilt
    pub fn view_yaw(&self) -> f32 {
        self.yaw + self.bob_x * BOB_YAW_FACTOR
    }

    /// World-space direction that maps to the center of the screen
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = fast_sin_cos(self.view_yaw());
        let (sx, cx) = fast_sin_cos(self.pitch);
        Vec3::new(sy * cx, sx, cy * cx)
    }

    /// Horizontal forward direction from yaw alone, as used by culling
    pub fn ground_forward(&self) -> Vec3 {
        let (sy, cy) = fast_sin_cos(self.yaw);
        Vec3::new(sy, 0.0, cy)
    }

    /// Add to yaw and pitch, keeping pitch away from the poles
    pub fn rotate(&mut self, d_pitch: f32, d_yaw: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Aim the eye at `target` (cinematic cameras)
    pub fn look_at(&mut self, target: Vec3) {
        let d = target - self.eye();
        let horizontal = (d.x * d.x + d.z * d.z).sqrt();
        self.yaw = d.x.atan2(d.z) - self.bob_x * BOB_YAW_FACTOR;
        self.pitch = d.y.atan2(horizontal);
    }

    /// Snapshot the rotation terms for a batch of transforms
    pub fn view(&self) -> ViewTransform {
        let (sin_yaw, cos_yaw) = fast_sin_cos(self.view_yaw());
        let (sin_pitch, cos_pitch) = fast_sin_cos(self.pitch);
        ViewTransform {
            eye: self.eye(),
            sin_yaw,
            cos_yaw,
            sin_pitch,
            cos_pitch,
        }
    }
}

/// Precomputed world → camera space transform for one camera pose
#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    pub eye: Vec3,
    sin_yaw: f32,
    cos_yaw: f32,
    sin_pitch: f32,
    cos_pitch: f32,
}

impl ViewTransform {
    pub fn to_camera_space(&self, p: Vec3) -> Vec3 {
        let d = p - self.eye;

        let x = self.cos_yaw * d.x - self.sin_yaw * d.z;
        let z = self.sin_yaw * d.x + self.cos_yaw * d.z;

        let y = self.cos_pitch * d.y - self.sin_pitch * z;
        let z = self.sin_pitch * d.y + self.cos_pitch * z;

        Vec3::new(x, y, z)
    }
}

/// Screen-space projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub width: usize,
    pub height: usize,
    pub near_plane: f32,
    /// Focal multiplier, not an angle
    pub fov: f32,
}

impl Projection {
    pub fn new(width: usize, height: usize, near_plane: f32, fov: f32) -> Self {
        Self { width, height, near_plane, fov }
    }

    /// Unrounded screen position for a camera-space point in front of the
    /// near plane. Callers must have checked `z > 0`.
    pub fn screen_position(&self, v: Vec3) -> (f32, f32) {
        let sx = self.width as f32 / 2.0 + v.x * self.fov / v.z;
        let sy = self.height as f32 / 2.0 - v.y * self.fov / v.z;
        (sx, sy)
    }

    /// Nearest pixel for a camera-space point. Far-off points saturate at
    /// the `i32` range.
    pub fn to_screen(&self, v: Vec3) -> (i32, i32) {
        let (sx, sy) = self.screen_position(v);
        (sx.round() as i32, sy.round() as i32)
    }

    /// Project a camera-space point, or the hidden sentinel at/behind the near plane
    pub fn project_camera_space(&self, v: Vec3) -> ProjectedPoint {
        if v.z <= self.near_plane {
            return ProjectedPoint::hidden(v.z);
        }
        let (x, y) = self.to_screen(v);
        ProjectedPoint::new(x, y, v.z)
    }

    /// Full world → screen projection with depth
    pub fn project(&self, world: Vec3, camera: &Camera) -> ProjectedPoint {
        self.project_camera_space(camera.view().to_camera_space(world))
    }
}
