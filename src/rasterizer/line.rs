//! Depth-tested 3D line drawing
//!
//! Segments are moved into camera space, clipped against the near plane only,
//! projected, then stepped DDA-style. Depth along the segment comes from
//! interpolating 1/z in screen space, which is what keeps it perspective-correct.

use super::camera::{Projection, ViewTransform};
use super::framebuffer::Framebuffer;
use super::math::Vec3;
use super::types::Color;

/// What happened to a segment on its way to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Both endpoints were behind the near plane
    Culled,
    /// Drawn without clipping
    Drawn { pixels: usize },
    /// One endpoint was moved onto the near plane
    Clipped { pixels: usize },
}

impl LineOutcome {
    pub fn pixels(&self) -> usize {
        match *self {
            LineOutcome::Culled => 0,
            LineOutcome::Drawn { pixels } | LineOutcome::Clipped { pixels } => pixels,
        }
    }
}

/// Clip a camera-space segment against `z = near`.
///
/// Returns `None` when both ends are behind the plane. Otherwise the endpoint
/// that is behind (if any) is replaced by the crossing point, and the flag
/// reports whether that happened.
pub fn clip_to_near_plane(a: Vec3, b: Vec3, near: f32) -> Option<(Vec3, Vec3, bool)> {
    match (a.z < near, b.z < near) {
        (true, true) => None,
        (false, false) => Some((a, b, false)),
        (true, false) => {
            let t = (near - a.z) / (b.z - a.z);
            Some((near_point(a, b, t, near), b, true))
        }
        (false, true) => {
            let t = (near - b.z) / (a.z - b.z);
            Some((a, near_point(b, a, t, near), true))
        }
    }
}

fn near_point(from: Vec3, to: Vec3, t: f32, near: f32) -> Vec3 {
    let p = from.lerp(to, t);
    Vec3::new(p.x, p.y, near)
}

/// Draw a world-space segment with depth testing
pub fn draw_line(
    fb: &mut Framebuffer,
    view: &ViewTransform,
    projection: &Projection,
    p1: Vec3,
    p2: Vec3,
    color: Color,
) -> LineOutcome {
    let a = view.to_camera_space(p1);
    let b = view.to_camera_space(p2);

    let Some((a, b, clipped)) = clip_to_near_plane(a, b, projection.near_plane) else {
        return LineOutcome::Culled;
    };

    let pixels = rasterize_segment(fb, projection, a, b, color);
    if clipped {
        LineOutcome::Clipped { pixels }
    } else {
        LineOutcome::Drawn { pixels }
    }
}

/// Parametric range `[t0, t1]` of `p + d * t`, `t` in [0, 1], that lies
/// inside `[0, w] x [0, h]` (Liang-Barsky)
fn clip_to_screen(x: f64, y: f64, dx: f64, dy: f64, w: f64, h: f64) -> Option<(f64, f64)> {
    let mut t0 = 0.0;
    let mut t1 = 1.0;
    for (p, q) in [(-dx, x), (dx, w - x), (-dy, y), (dy, h - y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = f64::max(t0, r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = f64::min(t1, r);
        }
    }
    Some((t0, t1))
}

/// Project two clipped camera-space endpoints and step between them.
///
/// Steps are counted over the whole projected segment, but only the ones
/// that land on the framebuffer are visited, so a segment reaching far off
/// screen costs no more than one crossing the screen.
fn rasterize_segment(
    fb: &mut Framebuffer,
    projection: &Projection,
    a: Vec3,
    b: Vec3,
    color: Color,
) -> usize {
    let (x1, y1) = projection.screen_position(a);
    let (x2, y2) = projection.screen_position(b);
    if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
        return 0;
    }

    let (x1, y1) = (x1.round() as f64, y1.round() as f64);
    let (x2, y2) = (x2.round() as f64, y2.round() as f64);
    let dx = x2 - x1;
    let dy = y2 - y1;
    let steps = dx.abs().max(dy.abs());

    // Short segments: one point, no loop
    if steps < 2.0 {
        return fb.set_pixel_with_depth(x1 as i32, y1 as i32, a.z, color) as usize;
    }

    let Some((t0, t1)) = clip_to_screen(x1, y1, dx, dy, fb.width as f64, fb.height as f64) else {
        return 0;
    };
    let first = (t0 * steps).floor().max(0.0) as u64;
    let last = (t1 * steps).ceil().min(steps) as u64;

    let x_inc = dx / steps;
    let y_inc = dy / steps;
    let z1_inv = 1.0 / a.z as f64;
    let z_inv_inc = (1.0 / b.z as f64 - z1_inv) / steps;
    let mut written = 0;

    for i in first..=last {
        let i = i as f64;
        let x = (x1 + x_inc * i).floor() as i32;
        let y = (y1 + y_inc * i).floor() as i32;
        let z = 1.0 / (z1_inv + z_inv_inc * i);
        if fb.set_pixel_with_depth(x, y, z as f32, color) {
            written += 1;
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::camera::Camera;

    const NEAR: f32 = 0.1;

    fn setup() -> (Framebuffer, ViewTransform, Projection) {
        let mut fb = Framebuffer::new(200, 100);
        fb.clear(Color::BLACK);
        let view = Camera::default().view();
        (fb, view, Projection::new(200, 100, NEAR, 100.0))
    }

    #[test]
    fn test_clip_one_endpoint_behind() {
        let a = Vec3::new(-2.0, 4.0, -5.0);
        let b = Vec3::new(6.0, -1.0, 5.0);
        let (ca, cb, clipped) = clip_to_near_plane(a, b, NEAR).unwrap();
        assert!(clipped);

        let t = (NEAR - a.z) / (b.z - a.z);
        assert!((ca.z - NEAR).abs() < 1e-6);
        assert!((ca.x - (a.x + (b.x - a.x) * t)).abs() < 1e-5);
        assert!((ca.y - (a.y + (b.y - a.y) * t)).abs() < 1e-5);
        assert_eq!(cb, b);
    }

    #[test]
    fn test_clip_is_symmetric_in_endpoint_order() {
        let a = Vec3::new(-2.0, 4.0, -5.0);
        let b = Vec3::new(6.0, -1.0, 5.0);
        let (fa, _, _) = clip_to_near_plane(a, b, NEAR).unwrap();
        let (_, rb, _) = clip_to_near_plane(b, a, NEAR).unwrap();
        assert!((fa.x - rb.x).abs() < 1e-5 && (fa.y - rb.y).abs() < 1e-5);
        assert_eq!(rb.z, NEAR);
    }

    #[test]
    fn test_clip_both_behind_or_both_in_front() {
        let behind = clip_to_near_plane(Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.05), NEAR);
        assert!(behind.is_none());
        let a = Vec3::new(0.0, 0.0, 1.0);
        let b = Vec3::new(1.0, 1.0, 2.0);
        assert_eq!(clip_to_near_plane(a, b, NEAR), Some((a, b, false)));
    }

    #[test]
    fn test_segment_behind_camera_draws_nothing() {
        let (mut fb, view, proj) = setup();
        let a = Vec3::new(-1.0, 0.0, -2.0);
        let b = Vec3::new(1.0, 0.0, -3.0);
        let outcome = draw_line(&mut fb, &view, &proj, a, b, Color::WHITE);
        assert_eq!(outcome, LineOutcome::Culled);
        assert!(fb.pixels.chunks(4).all(|p| p == Color::BLACK.to_bytes()));
    }

    #[test]
    fn test_zero_length_draws_single_point() {
        let (mut fb, view, proj) = setup();
        let p = Vec3::new(0.0, 0.0, 4.0);
        let outcome = draw_line(&mut fb, &view, &proj, p, p, Color::RED);
        assert_eq!(outcome.pixels(), 1);
        assert_eq!(fb.get_pixel(100, 50), Some(Color::RED));
        assert_eq!(fb.depth.get(100, 50), Some(4.0));
    }

    #[test]
    fn test_horizontal_line_covers_span() {
        let (mut fb, view, proj) = setup();
        // x = ±2 at z = 10 with fov 100 → screen x 80..=120
        let a = Vec3::new(-2.0, 0.0, 10.0);
        let b = Vec3::new(2.0, 0.0, 10.0);
        let outcome = draw_line(&mut fb, &view, &proj, a, b, Color::GREEN);
        assert_eq!(outcome, LineOutcome::Drawn { pixels: 41 });
        for x in 80..=120 {
            assert_eq!(fb.get_pixel(x, 50), Some(Color::GREEN), "x = {x}");
        }
        assert_eq!(fb.get_pixel(79, 50), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(121, 50), Some(Color::BLACK));
    }

    #[test]
    fn test_depth_along_receding_line_is_perspective_correct() {
        let (mut fb, view, proj) = setup();
        let a = Vec3::new(1.0, 0.0, 2.0);
        let b = Vec3::new(1.0, 0.0, 20.0);
        draw_line(&mut fb, &view, &proj, a, b, Color::WHITE);

        // The depth at any drawn pixel must match the ray through that column
        // hitting the segment, i.e. z = fov * x / (sx - cx).
        for sx in 110..=150 {
            if let Some(z) = fb.depth.get(sx, 50).filter(|z| z.is_finite()) {
                let expected = proj.fov * 1.0 / (sx as f32 - 100.0);
                assert!((z - expected).abs() / expected < 0.08, "sx {sx}: {z} vs {expected}");
            }
        }
        // Start and end depths are exact
        assert!((fb.depth.get(150, 50).unwrap() - 2.0).abs() < 1e-4);
        assert!((fb.depth.get(105, 50).unwrap() - 20.0).abs() < 0.5);
    }

    #[test]
    fn test_clipped_line_starts_at_near_depth() {
        let (mut fb, view, proj) = setup();
        // The near-plane crossing projects to x = 100 + 0.01 * 100 / 0.1 = 110,
        // the far end to x = 100
        let a = Vec3::new(0.01, 0.0, -5.0);
        let b = Vec3::new(0.01, 0.0, 5.0);
        let outcome = draw_line(&mut fb, &view, &proj, a, b, Color::WHITE);
        assert_eq!(outcome, LineOutcome::Clipped { pixels: 11 });
        assert!((fb.depth.get(110, 50).unwrap() - NEAR).abs() < 1e-6);
        assert!((fb.depth.get(100, 50).unwrap() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_wide_segment_draws_only_the_visible_row() {
        for half_width in [4.0e6f32, 2.0e7] {
            let (mut fb, view, proj) = setup();
            let a = Vec3::new(-half_width, 0.0, 1.0);
            let b = Vec3::new(half_width, 0.0, 1.0);
            let outcome = draw_line(&mut fb, &view, &proj, a, b, Color::RED);
            assert_eq!(outcome, LineOutcome::Drawn { pixels: 200 });
            for x in 0..200 {
                assert_eq!(fb.get_pixel(x, 50), Some(Color::RED), "x = {x}");
                assert_eq!(fb.depth.get(x as i32, 50), Some(1.0));
            }
            assert_eq!(fb.get_pixel(100, 49), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_segment_entering_from_offscreen_keeps_depth() {
        let (mut fb, view, proj) = setup();
        // Starts a million pixels to the left at depth 1, ends on screen at depth 4
        let a = Vec3::new(-1.0e4, 0.0, 1.0);
        let b = Vec3::new(0.0, 0.0, 4.0);
        let outcome = draw_line(&mut fb, &view, &proj, a, b, Color::GREEN);
        assert_eq!(outcome.pixels(), 101);
        assert_eq!(fb.depth.get(100, 50), Some(4.0));
        // 1/z at column 0 is 1 - 0.75 * 0.9999, so z is just under 4
        assert!((fb.depth.get(0, 50).unwrap() - 4.0).abs() < 0.01);
    }

    #[test]
    fn test_segment_passing_outside_screen_draws_nothing() {
        let (mut fb, view, proj) = setup();
        let a = Vec3::new(-1.0e6, 1.0e6, 1.0);
        let b = Vec3::new(1.0e6, 1.0e6, 2.0);
        let outcome = draw_line(&mut fb, &view, &proj, a, b, Color::WHITE);
        assert_eq!(outcome, LineOutcome::Drawn { pixels: 0 });
        assert!(fb.pixels.chunks(4).all(|p| p == Color::BLACK.to_bytes()));
    }
}
