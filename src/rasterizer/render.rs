//! Renderer context and per-frame draw list
//!
//! The `Renderer` owns the framebuffer (and its depth buffer), the projection
//! parameters and the culling thresholds. A frame is `begin_frame`, any number
//! of draw calls, then presenting `framebuffer()`. Because every pixel write
//! is depth-tested, draw calls can arrive in any order.

use super::camera::{Camera, Projection};
use super::cull::{BoundedBox, CullSettings, Frustum};
use super::framebuffer::Framebuffer;
use super::line::{draw_line, LineOutcome};
use super::math::Vec3;
use super::triangle::fill_triangle;
use super::types::{Color, ProjectedPoint};
use crate::config::RenderConfig;

/// Counters for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub lines: usize,
    pub lines_culled: usize,
    pub lines_clipped: usize,
    pub triangles: usize,
    pub triangles_skipped: usize,
    pub pixels_written: usize,
}

/// A single draw request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// World-space segment
    Line { a: Vec3, b: Vec3, color: Color },
    /// Already projected triangle
    Triangle { points: [ProjectedPoint; 3], color: Color },
}

/// Draw requests collected for one frame, discarded after presentation
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    limit: Option<usize>,
    dropped: usize,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list that refuses commands past `limit`
    pub fn bounded(limit: usize) -> Self {
        Self {
            commands: Vec::with_capacity(limit),
            limit: Some(limit),
            dropped: 0,
        }
    }

    /// Queue a command. Returns false if the list is full.
    pub fn push(&mut self, command: DrawCommand) -> bool {
        if self.limit.is_some_and(|limit| self.commands.len() >= limit) {
            self.dropped += 1;
            return false;
        }
        self.commands.push(command);
        true
    }

    pub fn line(&mut self, a: Vec3, b: Vec3, color: Color) -> bool {
        self.push(DrawCommand::Line { a, b, color })
    }

    pub fn triangle(&mut self, p1: ProjectedPoint, p2: ProjectedPoint, p3: ProjectedPoint, color: Color) -> bool {
        self.push(DrawCommand::Triangle { points: [p1, p2, p3], color })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands refused because the list was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Drop all commands, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
        self.dropped = 0;
    }
}

pub struct Renderer {
    fb: Framebuffer,
    projection: Projection,
    cull: CullSettings,
    clear_color: Color,
    stats: FrameStats,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        let mut fb = Framebuffer::new(config.width, config.height);
        fb.clear(config.clear_color);
        Self {
            fb,
            projection: Projection::new(config.width, config.height, config.near_plane, config.fov),
            cull: config.cull,
            clear_color: config.clear_color,
            stats: FrameStats::default(),
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn fov(&self) -> f32 {
        self.projection.fov
    }

    /// Change the focal multiplier; takes effect for the next draw call
    pub fn set_fov(&mut self, fov: f32) {
        self.projection.fov = fov;
    }

    pub fn near_plane(&self) -> f32 {
        self.projection.near_plane
    }

    pub fn cull_settings(&self) -> CullSettings {
        self.cull
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Clear color and depth, reset the counters
    pub fn begin_frame(&mut self) {
        self.fb.clear(self.clear_color);
        self.stats = FrameStats::default();
    }

    /// Project a world point with the current fov
    pub fn project(&self, world: Vec3, camera: &Camera) -> ProjectedPoint {
        self.projection.project(world, camera)
    }

    /// Depth-tested world-space line
    pub fn draw_line(&mut self, p1: Vec3, p2: Vec3, camera: &Camera, color: Color) {
        let view = camera.view();
        let outcome = draw_line(&mut self.fb, &view, &self.projection, p1, p2, color);
        self.record_line(outcome);
    }

    /// Several segments sharing one camera transform
    pub fn draw_lines(&mut self, segments: &[(Vec3, Vec3)], camera: &Camera, color: Color) {
        let view = camera.view();
        for &(a, b) in segments {
            let outcome = draw_line(&mut self.fb, &view, &self.projection, a, b, color);
            self.record_line(outcome);
        }
    }

    fn record_line(&mut self, outcome: LineOutcome) {
        self.stats.lines += 1;
        self.stats.pixels_written += outcome.pixels();
        match outcome {
            LineOutcome::Culled => self.stats.lines_culled += 1,
            LineOutcome::Clipped { .. } => self.stats.lines_clipped += 1,
            LineOutcome::Drawn { .. } => {}
        }
    }

    /// Scanline fill of an already projected triangle
    pub fn fill_triangle(&mut self, p1: ProjectedPoint, p2: ProjectedPoint, p3: ProjectedPoint, color: Color) {
        let written = fill_triangle(&mut self.fb, p1, p2, p3, color);
        self.stats.triangles += 1;
        if written == 0 {
            self.stats.triangles_skipped += 1;
        }
        self.stats.pixels_written += written;
    }

    /// Project a world-space triangle and fill it. Skipped entirely if any
    /// vertex is at or behind the near plane.
    pub fn draw_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, camera: &Camera, color: Color) {
        let view = camera.view();
        let [pa, pb, pc] = [a, b, c].map(|v| self.projection.project_camera_space(view.to_camera_space(v)));
        if !(pa.is_visible() && pb.is_visible() && pc.is_visible()) {
            self.stats.triangles += 1;
            self.stats.triangles_skipped += 1;
            return;
        }
        self.fill_triangle(pa, pb, pc, color);
    }

    /// Play back a draw list in order
    pub fn submit(&mut self, list: &DrawList, camera: &Camera) {
        let view = camera.view();
        for command in list.commands() {
            match *command {
                DrawCommand::Line { a, b, color } => {
                    let outcome = draw_line(&mut self.fb, &view, &self.projection, a, b, color);
                    self.record_line(outcome);
                }
                DrawCommand::Triangle { points: [p1, p2, p3], color } => {
                    self.fill_triangle(p1, p2, p3, color);
                }
            }
        }
    }

    /// Clear, play back `list`, and report what happened
    pub fn render_frame(&mut self, camera: &Camera, list: &DrawList) -> FrameStats {
        self.begin_frame();
        self.submit(list, camera);
        if list.dropped() > 0 {
            log::warn!("draw list full, {} commands dropped", list.dropped());
        }
        log::trace!("frame: {} commands, {:?}", list.len(), self.stats);
        self.stats
    }

    /// Culling helper for the current camera pose
    pub fn frustum(&self, camera: &Camera) -> Frustum {
        Frustum::new(camera, self.projection.near_plane, self.cull)
    }

    pub fn point_visible(&self, point: Vec3, camera: &Camera) -> bool {
        self.frustum(camera).contains_point(point)
    }

    pub fn box_visible(&self, bbox: &BoundedBox, camera: &Camera) -> bool {
        self.frustum(camera).contains_box(bbox)
    }
}
