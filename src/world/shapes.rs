//! Primitive assembly
//!
//! Every shape here breaks down into world-space line segments queued on a
//! [`DrawList`]. Nothing is rasterized directly, so shapes can be built
//! before the frame starts and culled or dropped as a whole. Each function
//! returns the number of commands it queued.

use crate::rasterizer::{Camera, Color, DrawList, Vec3, ViewTransform};
use super::geometry::{SolidBox, BOX_EDGES, BOX_FACES};

fn push_edges(list: &mut DrawList, verts: &[Vec3; 8], edges: &[(usize, usize)], color: Color) -> usize {
    let mut queued = 0;
    for &(a, b) in edges {
        if list.line(verts[a], verts[b], color) {
            queued += 1;
        }
    }
    queued
}

/// Axis-aligned wire cube of edge length `size`
pub fn draw_wire_cube(list: &mut DrawList, center: Vec3, size: f32, color: Color) -> usize {
    let s = size / 2.0;
    let verts = [
        Vec3::new(-s, -s, -s),
        Vec3::new(s, -s, -s),
        Vec3::new(s, s, -s),
        Vec3::new(-s, s, -s),
        Vec3::new(-s, -s, s),
        Vec3::new(s, -s, s),
        Vec3::new(s, s, s),
        Vec3::new(-s, s, s),
    ]
    .map(|v| v + center);
    push_edges(list, &verts, &BOX_EDGES, color)
}

/// All 12 edges of a box
pub fn draw_box_edges(list: &mut DrawList, solid: &SolidBox) -> usize {
    push_edges(list, &solid.corners(), &BOX_EDGES, solid.color)
}

/// Wireframe of only the faces turned toward the camera.
///
/// A face is drawn when its outward normal points against the direction
/// from the eye to the box center. Shared edges of two visible faces are
/// queued twice; the depth test makes that harmless.
pub fn draw_box(list: &mut DrawList, solid: &SolidBox, camera: &Camera) -> usize {
    let corners = solid.corners();
    let to_box = solid.position - camera.eye();
    let mut queued = 0;

    for (face, normal) in BOX_FACES {
        if normal.dot(to_box) >= 0.0 {
            continue;
        }
        for i in 0..4 {
            if list.line(corners[face[i]], corners[face[(i + 1) % 4]], solid.color) {
                queued += 1;
            }
        }
    }
    queued
}

/// Square prism of half-width `thickness` around the segment `p1`-`p2`
pub fn draw_volumetric_segment(list: &mut DrawList, p1: Vec3, p2: Vec3, thickness: f32, color: Color) -> usize {
    let dir = (p2 - p1).normalize();
    let mut right = dir.cross(Vec3::UP).normalize();
    if right == Vec3::ZERO {
        // Vertical segment, any horizontal axis will do
        right = Vec3::new(1.0, 0.0, 0.0);
    }
    let up = right.cross(dir).normalize();

    let right = right * thickness;
    let up = up * thickness;
    let ring = |p: Vec3| [p + right + up, p - right + up, p - right - up, p + right - up];
    let [a0, a1, a2, a3] = ring(p1);
    let [b0, b1, b2, b3] = ring(p2);

    push_edges(list, &[a0, a1, a2, a3, b0, b1, b2, b3], &BOX_EDGES, color)
}

/// Square line grid on the plane `y`, from `-half_extent` to `half_extent`
/// on both axes
pub fn draw_floor_grid(list: &mut DrawList, half_extent: i32, spacing: usize, y: f32, color: Color) -> usize {
    let extent = half_extent as f32;
    let mut queued = 0;
    for i in (-half_extent..=half_extent).step_by(spacing.max(1)) {
        let i = i as f32;
        if list.line(Vec3::new(i, y, -extent), Vec3::new(i, y, extent), color) {
            queued += 1;
        }
        if list.line(Vec3::new(-extent, y, i), Vec3::new(extent, y, i), color) {
            queued += 1;
        }
    }
    queued
}

/// Checkered tile floor drawn around the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileFloor {
    pub tile_size: f32,
    /// Radius in tiles
    pub view_range: i32,
    pub height: f32,
    pub even: Color,
    pub odd: Color,
}

impl Default for TileFloor {
    fn default() -> Self {
        Self {
            tile_size: 4.0,
            view_range: 8,
            height: -2.0,
            even: Color::new(45, 45, 55),
            odd: Color::new(35, 35, 45),
        }
    }
}

/// Tiles within a circle of `view_range` tiles around the eye, each as an
/// outline plus one diagonal. Tiles whose first corner is behind the near
/// plane are skipped.
pub fn draw_tile_floor(list: &mut DrawList, floor: &TileFloor, view: &ViewTransform, near: f32) -> usize {
    let size = floor.tile_size;
    let range = floor.view_range;
    let cam_x = (view.eye.x / size).floor() as i32;
    let cam_z = (view.eye.z / size).floor() as i32;
    let mut queued = 0;

    for dx in -range..=range {
        for dz in -range..=range {
            if dx * dx + dz * dz > range * range {
                continue;
            }

            let (tx, tz) = (cam_x + dx, cam_z + dz);
            let (x, z) = (tx as f32 * size, tz as f32 * size);
            let corners = [
                Vec3::new(x, floor.height, z),
                Vec3::new(x + size, floor.height, z),
                Vec3::new(x + size, floor.height, z + size),
                Vec3::new(x, floor.height, z + size),
            ];

            if view.to_camera_space(corners[0]).z < near {
                continue;
            }

            let color = if (tx + tz).rem_euclid(2) == 0 { floor.even } else { floor.odd };
            let segments = [
                (corners[0], corners[1]),
                (corners[1], corners[2]),
                (corners[2], corners[3]),
                (corners[3], corners[0]),
                (corners[0], corners[2]),
            ];
            for (a, b) in segments {
                if list.line(a, b, color) {
                    queued += 1;
                }
            }
        }
    }
    queued
}

/// Wireframe walls around a square arena, with a ceiling outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallGrid {
    /// Half the side length of the arena
    pub world_size: f32,
    /// Floor height the walls stand on
    pub base: f32,
    pub height: f32,
    /// Spacing of the vertical strokes; horizontal ones use twice this
    pub step: f32,
    pub color: Color,
}

impl Default for WallGrid {
    fn default() -> Self {
        Self {
            world_size: 30.0,
            base: -2.0,
            height: 8.0,
            step: 4.0,
            color: Color::new(80, 80, 90),
        }
    }
}

/// Values `start, start + step, ...` up to and including `end`
fn grid_positions(start: f32, end: f32, step: f32) -> impl Iterator<Item = f32> {
    let count = if step > 0.0 && end >= start {
        ((end - start) / step + 1e-4).floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |i| start + i as f32 * step)
}

/// Sparse wall strokes on the four sides of the arena: vertical lines every
/// `step`, horizontal lines every `2 * step` from the base up, then the
/// ceiling as an outline plus both diagonals.
pub fn draw_wall_grid(list: &mut DrawList, walls: &WallGrid) -> usize {
    if walls.height <= 0.0 || walls.step <= 0.0 {
        return 0;
    }

    let s = walls.world_size;
    let bottom = walls.base;
    let top = walls.base + walls.height;
    let color = walls.color;
    let mut segments = Vec::new();

    for i in grid_positions(-s, s, walls.step) {
        segments.push((Vec3::new(i, bottom, -s), Vec3::new(i, top, -s)));
        segments.push((Vec3::new(i, bottom, s), Vec3::new(i, top, s)));
        segments.push((Vec3::new(-s, bottom, i), Vec3::new(-s, top, i)));
        segments.push((Vec3::new(s, bottom, i), Vec3::new(s, top, i)));
    }

    for y in grid_positions(bottom, top, walls.step * 2.0) {
        segments.push((Vec3::new(-s, y, -s), Vec3::new(s, y, -s)));
        segments.push((Vec3::new(-s, y, s), Vec3::new(s, y, s)));
        segments.push((Vec3::new(-s, y, -s), Vec3::new(-s, y, s)));
        segments.push((Vec3::new(s, y, -s), Vec3::new(s, y, s)));
    }

    let ceiling = [
        Vec3::new(-s, top, -s),
        Vec3::new(s, top, -s),
        Vec3::new(s, top, s),
        Vec3::new(-s, top, s),
    ];
    for i in 0..4 {
        segments.push((ceiling[i], ceiling[(i + 1) % 4]));
    }
    segments.push((ceiling[0], ceiling[2]));
    segments.push((ceiling[1], ceiling[3]));

    let mut queued = 0;
    for (a, b) in segments {
        if list.line(a, b, color) {
            queued += 1;
        }
    }
    queued
}

/// Evenly spaced values in `[start, end)`
fn strokes(start: f32, end: f32, step: f32) -> impl Iterator<Item = f32> {
    let count = if step > 0.0 && end > start {
        ((end - start) / step).ceil() as usize
    } else {
        0
    };
    (0..count)
        .map(move |i| start + i as f32 * step)
        .filter(move |&v| v < end)
}

/// Fake solid box: the side faces toward the camera as horizontal strokes,
/// the top (when seen from above) as brighter strokes across it.
pub fn draw_box_strokes(list: &mut DrawList, solid: &SolidBox, camera: &Camera, step: f32) -> usize {
    let c = solid.position;
    let b = solid.bounds;
    let to_cam = camera.eye() - c;
    let mut queued = 0;

    // Side faces: the Z face and the X face closest to the camera
    let z_face = if to_cam.z < 0.0 { b.min.z } else { b.max.z };
    let x_face = if to_cam.x < 0.0 { b.min.x } else { b.max.x };
    for y in strokes(b.min.y, b.max.y, step) {
        let y = c.y + y;
        let front = (
            Vec3::new(c.x + b.min.x, y, c.z + z_face),
            Vec3::new(c.x + b.max.x, y, c.z + z_face),
        );
        let side = (
            Vec3::new(c.x + x_face, y, c.z + b.min.z),
            Vec3::new(c.x + x_face, y, c.z + b.max.z),
        );
        for (p1, p2) in [front, side] {
            if list.line(p1, p2, solid.color) {
                queued += 1;
            }
        }
    }

    if to_cam.y > b.max.y {
        let top = solid.color.brighten(30);
        let y = c.y + b.max.y;
        for x in strokes(b.min.x, b.max.x, step) {
            let p1 = Vec3::new(c.x + x, y, c.z + b.min.z);
            let p2 = Vec3::new(c.x + x, y, c.z + b.max.z);
            if list.line(p1, p2, top) {
                queued += 1;
            }
        }
    }
    queued
}
