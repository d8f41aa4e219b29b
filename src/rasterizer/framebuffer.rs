//! Framebuffer for software rendering

use std::path::Path;
use super::depth::DepthBuffer;
use super::types::Color;

/// RGBA color target plus its depth buffer
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub depth: DepthBuffer,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            depth: DepthBuffer::new(width, height),
            width,
            height,
        }
    }

    /// Fill with `color` and reset depth to +infinity
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.depth.clear();
    }

    /// Unconditional write, ignores depth
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Bounds check, depth test, then write color and depth.
    /// Returns true if the pixel was written.
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, z: f32, color: Color) -> bool {
        match self.depth.test_and_set(x, y, z) {
            Some(idx) => {
                let pixel_idx = idx * 4;
                self.pixels[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_bytes());
                true
            }
            None => false,
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let p = &self.pixels[idx..idx + 4];
            Some(Color::with_alpha(p[0], p[1], p[2], p[3]))
        } else {
            None
        }
    }

    /// Copy the color plane into an `image` buffer
    pub fn to_image(&self) -> image::RgbaImage {
        let mut img = image::RgbaImage::new(self.width as u32, self.height as u32);
        img.copy_from_slice(&self.pixels);
        img
    }

    /// Write the current color plane as a PNG
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let path = path.as_ref();
        self.to_image().save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Saved {}x{} snapshot to {}", self.width, self.height, path.display());
        Ok(())
    }
}
