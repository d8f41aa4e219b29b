//! Demo scene
//!
//! A handful of platform boxes on a tiled floor inside a walled arena, a
//! ring of collectible cubes, a couple of beams and one filled marker
//! triangle. Everything is culled per object against the camera and queued
//! on a draw list. The floor and walls are never culled.

use crate::rasterizer::{
    fast_cos, fast_sin, Aabb, Camera, Color, DrawList, Renderer, Vec3,
};
use super::geometry::SolidBox;
use super::shapes::{
    draw_box, draw_box_strokes, draw_tile_floor, draw_volumetric_segment, draw_wall_grid,
    draw_wire_cube, TileFloor, WallGrid,
};

/// Minimum spacing between collectibles
const COLLECTIBLE_SPACING: f32 = 1.5;
const COLLECTIBLE_SIZE: f32 = 0.5;

/// How boxes are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxStyle {
    /// Edges of the faces toward the camera
    #[default]
    Wire,
    /// Stepped strokes on the visible faces plus a darker wire outline
    Strokes,
}

/// Thick line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beam {
    pub start: Vec3,
    pub end: Vec3,
    pub thickness: f32,
    pub color: Color,
}

/// Per-frame submission counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub objects: usize,
    pub culled: usize,
    pub commands: usize,
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub boxes: Vec<SolidBox>,
    pub collectibles: Vec<Vec3>,
    pub beams: Vec<Beam>,
    /// World-space filled triangle
    pub marker: [Vec3; 3],
    pub marker_color: Color,
    pub floor: TileFloor,
    pub walls: WallGrid,
    pub box_style: BoxStyle,
    pub stroke_step: f32,
}

impl Scene {
    /// The default level layout
    pub fn demo() -> Self {
        let boxes = vec![
            SolidBox::new(Vec3::ZERO, Aabb::cube(4.2), Color::WHITE),
            SolidBox::new(
                Vec3::new(8.0, -1.0, 5.0),
                Aabb::new(Vec3::new(-1.5, -1.0, -1.5), Vec3::new(1.5, 3.0, 1.5)),
                Color::new(100, 255, 100),
            ),
            SolidBox::new(
                Vec3::new(-6.0, -1.5, 3.0),
                Aabb::new(Vec3::new(-2.0, -0.5, -2.0), Vec3::new(2.0, 0.5, 2.0)),
                Color::new(100, 100, 255),
            ),
            SolidBox::new(
                Vec3::new(5.0, -1.0, -8.0),
                Aabb::new(Vec3::new(-3.0, -1.0, -1.0), Vec3::new(3.0, 1.0, 1.0)),
                Color::new(255, 100, 100),
            ),
            SolidBox::new(
                Vec3::new(-10.0, 0.0, -5.0),
                Aabb::new(Vec3::new(-1.0, -2.0, -1.0), Vec3::new(1.0, 2.0, 1.0)),
                Color::new(255, 255, 100),
            ),
        ];
        let collectibles = spiral_collectibles(45, &boxes);

        let beams = vec![
            Beam {
                start: Vec3::new(-3.0, -2.0, 12.0),
                end: Vec3::new(-3.0, 4.0, 12.0),
                thickness: 0.3,
                color: Color::new(200, 160, 120),
            },
            Beam {
                start: Vec3::new(-3.0, 4.0, 12.0),
                end: Vec3::new(3.0, 4.0, 12.0),
                thickness: 0.3,
                color: Color::new(200, 160, 120),
            },
            Beam {
                start: Vec3::new(3.0, 4.0, 12.0),
                end: Vec3::new(3.0, -2.0, 12.0),
                thickness: 0.3,
                color: Color::new(200, 160, 120),
            },
        ];

        Self {
            boxes,
            collectibles,
            beams,
            marker: [
                Vec3::new(-2.0, -1.9, 8.0),
                Vec3::new(2.0, -1.9, 8.0),
                Vec3::new(0.0, 2.0, 9.0),
            ],
            marker_color: Color::new(220, 120, 40),
            floor: TileFloor::default(),
            walls: WallGrid::default(),
            box_style: BoxStyle::Wire,
            stroke_step: 0.3,
        }
    }

    /// Queue everything visible from `camera`. With `cull` off every object
    /// is queued and left to the near-plane clip and the depth test.
    pub fn collect(&self, renderer: &Renderer, camera: &Camera, time: f32, list: &mut DrawList, cull: bool) -> CollectStats {
        let frustum = renderer.frustum(camera);
        let mut stats = CollectStats::default();
        let start = list.len();

        draw_tile_floor(list, &self.floor, &camera.view(), renderer.near_plane());
        draw_wall_grid(list, &self.walls);

        for solid in &self.boxes {
            stats.objects += 1;
            if cull && !frustum.contains_box(&solid.bounded()) {
                stats.culled += 1;
                continue;
            }
            match self.box_style {
                BoxStyle::Wire => {
                    draw_box(list, solid, camera);
                }
                BoxStyle::Strokes => {
                    draw_box_strokes(list, solid, camera, self.stroke_step);
                    let outline = SolidBox { color: solid.color.shade(0.5), ..*solid };
                    draw_box(list, &outline, camera);
                }
            }
        }

        for (i, &base) in self.collectibles.iter().enumerate() {
            stats.objects += 1;
            let phase = i as f32 * 0.3;
            let position = base + Vec3::new(0.0, fast_sin(time * 2.0 + phase) * 0.2, 0.0);
            if cull && !frustum.contains_point(position) {
                stats.culled += 1;
                continue;
            }
            draw_wire_cube(list, position, COLLECTIBLE_SIZE, Color::new(255, 215, 0));
        }

        for beam in &self.beams {
            stats.objects += 1;
            if cull && !(frustum.contains_point(beam.start) || frustum.contains_point(beam.end)) {
                stats.culled += 1;
                continue;
            }
            draw_volumetric_segment(list, beam.start, beam.end, beam.thickness, beam.color);
        }

        stats.objects += 1;
        let [a, b, c] = self.marker.map(|v| renderer.project(v, camera));
        if a.is_visible() && b.is_visible() && c.is_visible() {
            list.triangle(a, b, c, self.marker_color);
        } else {
            stats.culled += 1;
        }

        stats.commands = list.len() - start;
        stats
    }
}

/// Collectibles on an outward spiral, skipping spots inside a box or too
/// close to an earlier one
fn spiral_collectibles(count: usize, boxes: &[SolidBox]) -> Vec<Vec3> {
    let mut placed: Vec<Vec3> = Vec::with_capacity(count);
    for i in 0..count {
        let angle = i as f32 / 10.0 * std::f32::consts::TAU;
        let radius = 4.0 + (i / 5) as f32 * 2.5;
        let p = Vec3::new(
            fast_cos(angle) * radius,
            0.5 + fast_sin(i as f32 * 0.3) * 0.5,
            fast_sin(angle) * radius,
        );

        if boxes.iter().any(|b| b.contains(p)) {
            continue;
        }
        if placed.iter().any(|&q| (q - p).len() < COLLECTIBLE_SPACING) {
            continue;
        }
        placed.push(p);
    }
    log::debug!("placed {} of {} collectibles", placed.len(), count);
    placed
}
