//! Per-pixel depth buffer
//!
//! Holds the camera-space Z of the nearest fragment written to each pixel
//! this frame. Cleared to +infinity at frame start; a write only lands when
//! the candidate is strictly nearer than what is stored.

pub struct DepthBuffer {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            values: vec![f32::INFINITY; width * height],
            width,
            height,
        }
    }

    /// Reset every entry to +infinity
    pub fn clear(&mut self) {
        self.values.fill(f32::INFINITY);
    }

    /// Stored depth, or `None` outside the buffer
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.values[i])
    }

    /// Depth test and update in one step.
    /// Returns the buffer index when the write was accepted.
    pub fn test_and_set(&mut self, x: i32, y: i32, z: f32) -> Option<usize> {
        let idx = self.index(x, y)?;
        if z < self.values[idx] {
            self.values[idx] = z;
            Some(idx)
        } else {
            None
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}
