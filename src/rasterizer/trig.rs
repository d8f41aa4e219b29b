//! Lookup-table sine and cosine
//!
//! Every projected vertex needs four trig calls, so the per-frame cost adds
//! up quickly. The tables trade a few KB of memory and ~0.1 degree of
//! precision for a plain array load.

use std::f32::consts::{PI, TAU};
use std::sync::LazyLock;

/// Default table size: one entry per 0.1 degree
pub const LUT_SIZE: usize = 3600;

const ANGLE_REDUCTION_SLACK: f32 = 1e-5;

static DEFAULT_TABLE: LazyLock<TrigTable> = LazyLock::new(|| TrigTable::new(LUT_SIZE));

/// Precomputed sine/cosine samples over one full turn
#[derive(Debug, Clone)]
pub struct TrigTable {
    sin: Vec<f32>,
    cos: Vec<f32>,
    /// Index units per radian
    scale: f32,
}

impl TrigTable {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let step = TAU / size as f32;
        let (sin, cos) = (0..size)
            .map(|i| (i as f32 * step).sin_cos())
            .unzip();

        Self {
            sin,
            cos,
            scale: size as f32 / TAU,
        }
    }

    pub fn len(&self) -> usize {
        self.sin.len()
    }

    /// Worst-case lookup error: half a table step, plus slack for reducing
    /// f32 angles of a few turns into `[0, 2π)`.
    pub fn error_bound(&self) -> f32 {
        PI / self.len() as f32 + ANGLE_REDUCTION_SLACK
    }

    fn index(&self, angle: f32) -> usize {
        if !angle.is_finite() {
            return 0;
        }
        let reduced = angle.rem_euclid(TAU);
        (reduced * self.scale).round() as usize % self.len()
    }

    pub fn sin(&self, angle: f32) -> f32 {
        self.sin[self.index(angle)]
    }

    pub fn cos(&self, angle: f32) -> f32 {
        self.cos[self.index(angle)]
    }

    /// Both values from a single index lookup
    pub fn sin_cos(&self, angle: f32) -> (f32, f32) {
        let i = self.index(angle);
        (self.sin[i], self.cos[i])
    }
}

/// Table sine using the shared default table
pub fn fast_sin(angle: f32) -> f32 {
    DEFAULT_TABLE.sin(angle)
}

/// Table cosine using the shared default table
pub fn fast_cos(angle: f32) -> f32 {
    DEFAULT_TABLE.cos(angle)
}

pub fn fast_sin_cos(angle: f32) -> (f32, f32) {
    DEFAULT_TABLE.sin_cos(angle)
}
