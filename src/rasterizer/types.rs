//! Core types for the rasterizer

use serde::{Serialize, Deserialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply RGB by intensity (0.0-1.0)
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
            a: self.a,
        }
    }

    /// Add a flat amount to RGB, saturating at 255
    pub fn brighten(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
            a: self.a,
        }
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A vertex after projection: integer screen position plus camera-space depth.
///
/// `depth` is the camera-space Z (not 1/z). Points at or behind the near
/// plane carry the [`ProjectedPoint::OFFSCREEN`] coordinates and must not be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
}

impl ProjectedPoint {
    /// Sentinel screen coordinate for "behind the near plane"
    pub const OFFSCREEN: i32 = -9999;

    pub const fn new(x: i32, y: i32, depth: f32) -> Self {
        Self { x, y, depth }
    }

    /// The "do not draw" point, keeping the depth that was computed
    pub const fn hidden(depth: f32) -> Self {
        Self {
            x: Self::OFFSCREEN,
            y: Self::OFFSCREEN,
            depth,
        }
    }

    pub fn is_visible(&self) -> bool {
        !(self.x == Self::OFFSCREEN && self.y == Self::OFFSCREEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_and_brighten() {
        let c = Color::new(200, 100, 250);
        assert_eq!(c.shade(0.5), Color::new(100, 50, 125));
        assert_eq!(c.brighten(30), Color::new(230, 130, 255));
        assert_eq!(Color::with_alpha(1, 2, 3, 40).shade(2.0).a, 40);
    }

    #[test]
    fn test_hidden_point() {
        let p = ProjectedPoint::hidden(-3.0);
        assert!(!p.is_visible());
        assert_eq!(p.depth, -3.0);
        assert!(ProjectedPoint::new(-9999, 5, 1.0).is_visible());
    }
}
