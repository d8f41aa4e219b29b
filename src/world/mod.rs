//! World module - boxes, primitive assembly and the demo scene
//!
//! Shapes are broken into world-space lines on a `DrawList`; the renderer
//! does the rest.

mod geometry;
mod scene;
mod shapes;

pub use geometry::*;
pub use scene::*;
pub use shapes::*;
