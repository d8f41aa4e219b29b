//! Renderer configuration
//!
//! Stored as RON (Rusty Object Notation). Resolution and near plane are fixed
//! for the lifetime of a `Renderer`; fov can be changed between frames.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::rasterizer::{Color, CullSettings, HEIGHT, NEAR_PLANE, WIDTH};

/// Default focal multiplier
pub const DEFAULT_FOV: f32 = 200.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub near_plane: f32,
    /// Focal multiplier applied to X and Y, not an angle
    pub fov: f32,
    pub clear_color: Color,
    pub cull: CullSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            near_plane: NEAR_PLANE,
            fov: DEFAULT_FOV,
            clear_color: Color::new(20, 20, 30),
            cull: CullSettings::default(),
        }
    }
}

impl RenderConfig {
    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        // The viewer uploads the framebuffer as a texture with u16 sides
        if self.width > u16::MAX as usize || self.height > u16::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "resolution must fit in {}x{}, got {}x{}",
                u16::MAX, u16::MAX, self.width, self.height
            )));
        }
        if !(self.near_plane > 0.0) {
            return Err(ConfigError::Invalid(format!("near_plane must be positive, got {}", self.near_plane)));
        }
        if !(self.fov > 0.0) {
            return Err(ConfigError::Invalid(format!("fov must be positive, got {}", self.fov)));
        }
        if !(self.cull.range > 0.0) {
            return Err(ConfigError::Invalid(format!("cull range must be positive, got {}", self.cull.range)));
        }
        Ok(())
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents)?;
    log::info!("Loaded render config from {}", path.display());
    Ok(config)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &RenderConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Parse a config from a RON string; missing fields take their defaults
pub fn load_config_from_str(s: &str) -> Result<RenderConfig, ConfigError> {
    let config: RenderConfig = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}
