//! Software rasterizer core
//!
//! World-space lines and projected triangles go through
//! transform → near-plane clip → project → rasterize, with every pixel
//! gated by a per-pixel depth buffer. No GPU involved.

mod camera;
mod cull;
mod depth;
mod framebuffer;
mod line;
mod math;
mod render;
mod triangle;
mod trig;
mod types;

pub use camera::*;
pub use cull::*;
pub use depth::*;
pub use framebuffer::*;
pub use line::*;
pub use math::*;
pub use render::*;
pub use triangle::*;
pub use trig::*;
pub use types::*;

/// Default framebuffer dimensions
pub const WIDTH: usize = 960;
pub const HEIGHT: usize = 540;

/// Minimum camera-space depth that is drawn
pub const NEAR_PLANE: f32 = 0.1;
