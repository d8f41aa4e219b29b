//! Scanline triangle fill with perspective-correct depth
//!
//! Vertices arrive already projected. The triangle is split at the middle
//! vertex into an upper and lower half; each half walks its edges with
//! inverse slopes for both X and 1/z.

use super::framebuffer::Framebuffer;
use super::types::{Color, ProjectedPoint};

/// Order three points by screen Y with a fixed compare-and-swap chain
pub fn sort_by_y(
    mut v1: ProjectedPoint,
    mut v2: ProjectedPoint,
    mut v3: ProjectedPoint,
) -> (ProjectedPoint, ProjectedPoint, ProjectedPoint) {
    if v1.y > v2.y {
        std::mem::swap(&mut v1, &mut v2);
    }
    if v1.y > v3.y {
        std::mem::swap(&mut v1, &mut v3);
    }
    if v2.y > v3.y {
        std::mem::swap(&mut v2, &mut v3);
    }
    (v1, v2, v3)
}

/// One triangle edge walked scanline by scanline
#[derive(Clone, Copy)]
struct Edge {
    x: f32,
    z_inv: f32,
    x_step: f32,
    z_inv_step: f32,
}

impl Edge {
    fn new(top: ProjectedPoint, bottom: ProjectedPoint) -> Self {
        let (x_step, z_inv_step) = if bottom.y > top.y {
            let dy = bottom.y as f32 - top.y as f32;
            (
                (bottom.x as f32 - top.x as f32) / dy,
                (1.0 / bottom.depth - 1.0 / top.depth) / dy,
            )
        } else {
            (0.0, 0.0)
        };
        Self {
            x: top.x as f32,
            z_inv: 1.0 / top.depth,
            x_step,
            z_inv_step,
        }
    }

    /// Jump `rows` scanlines down the edge
    fn advanced(mut self, rows: f32) -> Self {
        self.x += self.x_step * rows;
        self.z_inv += self.z_inv_step * rows;
        self
    }

    fn step(&mut self) {
        self.x += self.x_step;
        self.z_inv += self.z_inv_step;
    }
}

/// Scanlines from `from` down to `to`, without i32 overflow
fn rows_between(from: i32, to: i32) -> f32 {
    (to as i64 - from as i64) as f32
}

/// Fill a projected triangle. Returns the number of pixels that passed the depth test.
///
/// Triangles with a hidden vertex or non-positive depth are skipped, as are
/// triangles with no vertical extent. Only on-screen scanlines are walked;
/// edges are advanced past the rows above the screen first.
pub fn fill_triangle(
    fb: &mut Framebuffer,
    p1: ProjectedPoint,
    p2: ProjectedPoint,
    p3: ProjectedPoint,
    color: Color,
) -> usize {
    if [p1, p2, p3].iter().any(|p| !p.is_visible() || !(p.depth > 0.0)) {
        return 0;
    }

    let (v1, v2, v3) = sort_by_y(p1, p2, p3);
    if v3.y == v1.y {
        return 0;
    }

    let height = fb.height as i32;
    let long_edge = Edge::new(v1, v3);
    let mut written = 0;

    // Upper half: scanlines [v1.y, v2.y)
    if v2.y > v1.y {
        let first = v1.y.max(0);
        let skipped = rows_between(v1.y, first);
        let mut short_edge = Edge::new(v1, v2).advanced(skipped);
        let mut long = long_edge.advanced(skipped);
        for y in first..v2.y.min(height) {
            written += fill_span(fb, y, &short_edge, &long, color);
            short_edge.step();
            long.step();
        }
    }

    // Lower half: scanlines [v2.y, v3.y]
    if v3.y > v2.y {
        let first = v2.y.max(0);
        let mut short_edge = Edge::new(v2, v3).advanced(rows_between(v2.y, first));
        let mut long = long_edge.advanced(rows_between(v1.y, first));
        for y in first..=v3.y.min(height - 1) {
            written += fill_span(fb, y, &short_edge, &long, color);
            short_edge.step();
            long.step();
        }
    }

    written
}

/// Pixel column of an edge crossing, kept within the i32 range
fn column(x: f32) -> i64 {
    (x.floor() as i64).clamp(i32::MIN as i64, i32::MAX as i64)
}

/// Fill pixels `[start, end)` of one scanline between two edges
fn fill_span(fb: &mut Framebuffer, y: i32, a: &Edge, b: &Edge, color: Color) -> usize {
    if y < 0 || y >= fb.height as i32 {
        return 0;
    }

    let (mut start_x, mut end_x) = (column(a.x), column(b.x));
    let (mut z_start, mut z_end) = (a.z_inv, b.z_inv);
    if start_x > end_x {
        std::mem::swap(&mut start_x, &mut end_x);
        std::mem::swap(&mut z_start, &mut z_end);
    }

    let z_span = if end_x > start_x {
        (z_end - z_start) / (end_x - start_x) as f32
    } else {
        0.0
    };

    // Only visit on-screen pixels; the interpolation still starts at start_x
    let first = start_x.max(0);
    let last = end_x.min(fb.width as i64);
    let mut written = 0;

    for x in first..last {
        let z_inv = z_start + (x - start_x) as f32 * z_span;
        if fb.set_pixel_with_depth(x as i32, y, 1.0 / z_inv, color) {
            written += 1;
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fb() -> Framebuffer {
        let mut fb = Framebuffer::new(320, 240);
        fb.clear(Color::BLACK);
        fb
    }

    /// Signed-area test: true when (px, py) is inside or on the triangle
    fn inside(px: f32, py: f32, tri: [(f32, f32); 3]) -> bool {
        let edge = |(ax, ay): (f32, f32), (bx, by): (f32, f32)| (bx - ax) * (py - ay) - (by - ay) * (px - ax);
        let d1 = edge(tri[0], tri[1]);
        let d2 = edge(tri[1], tri[2]);
        let d3 = edge(tri[2], tri[0]);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }

    /// Distance from a point to the nearest triangle edge line
    fn edge_distance(px: f32, py: f32, tri: [(f32, f32); 3]) -> f32 {
        (0..3)
            .map(|i| {
                let (ax, ay) = tri[i];
                let (bx, by) = tri[(i + 1) % 3];
                let len = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
                ((bx - ax) * (py - ay) - (by - ay) * (px - ax)).abs() / len
            })
            .fold(f32::MAX, f32::min)
    }

    #[test]
    fn test_fill_coverage() {
        let mut fb = fb();
        let a = ProjectedPoint::new(100, 100, 5.0);
        let b = ProjectedPoint::new(200, 100, 5.0);
        let c = ProjectedPoint::new(150, 200, 5.0);
        let written = fill_triangle(&mut fb, a, b, c, Color::RED);
        assert!(written > 0);

        let tri = [(100.0, 100.0), (200.0, 100.0), (150.0, 200.0)];
        for y in 90..=210 {
            for x in 90..=210 {
                let filled = fb.get_pixel(x, y) == Some(Color::RED);
                let (px, py) = (x as f32, y as f32);
                // Pixels on the boundary belong to whichever side the scanline rule
                // puts them; only check clear-cut cases.
                if edge_distance(px, py, tri) < 1.5 {
                    continue;
                }
                assert_eq!(filled, inside(px, py, tri), "pixel ({x}, {y})");
            }
        }

        // Edge samples the scanline walk itself defines: top row spans [100, 200)
        assert_eq!(fb.get_pixel(100, 100), Some(Color::RED));
        assert_eq!(fb.get_pixel(199, 100), Some(Color::RED));
        assert_eq!(fb.get_pixel(200, 100), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(150, 200), Some(Color::BLACK));
    }

    #[test]
    fn test_vertex_order_does_not_matter() {
        let a = ProjectedPoint::new(20, 30, 2.0);
        let b = ProjectedPoint::new(90, 60, 3.0);
        let c = ProjectedPoint::new(40, 110, 4.0);

        let mut first = fb();
        fill_triangle(&mut first, a, b, c, Color::GREEN);
        let mut second = fb();
        fill_triangle(&mut second, c, a, b, Color::GREEN);
        assert!(first.pixels == second.pixels);
    }

    #[test]
    fn test_flat_triangle_skipped() {
        let mut fb = fb();
        let n = fill_triangle(
            &mut fb,
            ProjectedPoint::new(10, 50, 1.0),
            ProjectedPoint::new(60, 50, 1.0),
            ProjectedPoint::new(90, 50, 1.0),
            Color::WHITE,
        );
        assert_eq!(n, 0);
    }

    #[test]
    fn test_hidden_or_bad_depth_skipped() {
        let mut fb = fb();
        let ok = ProjectedPoint::new(10, 10, 1.0);
        let other = ProjectedPoint::new(60, 80, 1.0);
        assert_eq!(fill_triangle(&mut fb, ok, other, ProjectedPoint::hidden(-1.0), Color::WHITE), 0);
        assert_eq!(fill_triangle(&mut fb, ok, other, ProjectedPoint::new(5, 70, 0.0), Color::WHITE), 0);
    }

    #[test]
    fn test_depth_is_reciprocal_interpolated() {
        let mut fb = fb();
        // Left edge at depth 1, right vertex at depth 4
        let a = ProjectedPoint::new(0, 0, 1.0);
        let b = ProjectedPoint::new(0, 100, 1.0);
        let c = ProjectedPoint::new(100, 50, 4.0);
        fill_triangle(&mut fb, a, b, c, Color::WHITE);

        // On row 50 the span runs x in [0, 100); 1/z goes 1 → 0.25 linearly
        let z = fb.depth.get(50, 50).unwrap();
        let expected = 1.0 / (1.0 + (0.25 - 1.0) * 0.5);
        assert!((z - expected).abs() < 0.02, "{z} vs {expected}");
        // Linear-in-z would have given 2.5 here
        assert!((z - 2.5).abs() > 0.5);
    }

    #[test]
    fn test_offscreen_parts_are_clipped_not_wrapped() {
        let mut fb = fb();
        let n = fill_triangle(
            &mut fb,
            ProjectedPoint::new(-500, -50, 2.0),
            ProjectedPoint::new(1000, 120, 2.0),
            ProjectedPoint::new(-300, 600, 2.0),
            Color::BLUE,
        );
        assert!(n > 0);
        assert!(n <= 320 * 240);
        assert_eq!(fb.get_pixel(0, 120), Some(Color::BLUE));
    }

    #[test]
    fn test_sort_by_y_swap_chain_reverses_tied_pair() {
        // The compare-and-swap chain is not stable: moving c to the top
        // swaps it with a, which then lands after b
        let a = ProjectedPoint::new(1, 5, 1.0);
        let b = ProjectedPoint::new(2, 5, 1.0);
        let c = ProjectedPoint::new(3, 0, 1.0);
        let (v1, v2, v3) = sort_by_y(a, b, c);
        assert_eq!((v1.x, v2.x, v3.x), (3, 2, 1));
    }

    #[test]
    fn test_saturated_vertices_fill_visible_rows() {
        let mut fb = fb();
        let left = ProjectedPoint::new(i32::MIN + 1, 0, 1.0);
        let right = ProjectedPoint::new(i32::MAX, 0, 1.0);
        let apex = ProjectedPoint::new(100, 99, 1.0);
        let n = fill_triangle(&mut fb, left, right, apex, Color::GREEN);
        assert!(n <= 320 * 240);

        // Far from the apex the edges are millions of pixels apart
        for y in [0, 50, 98] {
            for x in [0, 160, 319] {
                assert_eq!(fb.get_pixel(x, y), Some(Color::GREEN), "({x}, {y})");
                assert_eq!(fb.depth.get(x as i32, y as i32), Some(1.0));
            }
        }
        assert_eq!(fb.get_pixel(100, 100), Some(Color::BLACK));
    }

    #[test]
    fn test_rows_above_screen_are_skipped_not_walked() {
        // Same triangle drawn whole and with its top pushed far above the
        // screen along the same edges: the visible rows must match
        let mut near_top = fb();
        fill_triangle(
            &mut near_top,
            ProjectedPoint::new(100, -100, 2.0),
            ProjectedPoint::new(300, 100, 2.0),
            ProjectedPoint::new(100, 100, 2.0),
            Color::WHITE,
        );
        let mut far_top = fb();
        fill_triangle(
            &mut far_top,
            ProjectedPoint::new(100, -1_000_000_000, 2.0),
            ProjectedPoint::new(1_000_000_300, 100, 2.0),
            ProjectedPoint::new(100, 100, 2.0),
            Color::WHITE,
        );
        for y in 0..100 {
            assert_eq!(near_top.get_pixel(100, y), Some(Color::WHITE));
            assert_eq!(far_top.get_pixel(100, y), Some(Color::WHITE));
            assert_eq!(far_top.depth.get(150, y as i32), Some(2.0));
        }
    }
}
