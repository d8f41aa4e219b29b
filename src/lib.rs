//! wirecore: a software rasterizer for depth-buffered wireframes
//!
//! - Lookup-table trigonometry
//! - Yaw/pitch pinhole camera with view bob
//! - Near-plane line clipping with perspective-correct depth
//! - Scanline triangle fill
//! - Per-pixel depth buffer, so draw order never matters
//! - Approximate view-cone culling

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod rasterizer;
pub mod world;
