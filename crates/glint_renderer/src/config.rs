//! Render parameters.

use glint_math::{Color, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::error::{RenderError, Result};

/// Render configuration, immutable for the duration of a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Vertical field of view in degrees, in (0, 180)
    pub vfov: f32,
    /// Maximum number of surface interactions per ray; 0 renders background only
    pub max_depth: u32,
    /// Perturbed rays traced per pixel in addition to the primary ray
    pub sample_count: u32,
    /// Color returned by rays that escape the scene or run out of depth
    pub background: Color,
    /// Camera-to-world rotation applied to view-space directions
    pub orientation: Quat,
    /// Camera position in world space
    pub position: Vec3,
    /// Seed for the per-pixel sample generators
    pub seed: u64,
    /// Contiguous pixels rendered per parallel work item
    pub batch_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            vfov: 60.0,
            max_depth: 4,
            sample_count: 8,
            background: Color::new(0.8, 0.8, 0.8),
            orientation: Quat::IDENTITY,
            position: Vec3::ZERO,
            seed: 0,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, max_depth: u32, sample_count: u32) -> Self {
        self.max_depth = max_depth;
        self.sample_count = sample_count;
        self
    }

    /// Set background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set camera orientation.
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of pixels per parallel batch.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Total number of pixels, or `None` if it overflows `usize`.
    pub fn pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Reject configurations the kernel cannot render.
    ///
    /// Nothing is clamped: an out-of-range value is an error.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.pixel_count().is_none() {
            return Err(RenderError::BufferTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        // Written as a negated range check so NaN is rejected too
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::InvalidFov(self.vfov));
        }
        if self.batch_size == 0 {
            return Err(RenderError::InvalidBatchSize);
        }
        if !self.background.is_finite() {
            return Err(RenderError::InvalidParameter("background"));
        }
        if !self.position.is_finite() {
            return Err(RenderError::InvalidParameter("camera position"));
        }
        if !self.orientation.is_finite() || self.orientation.length_squared() < 1e-12 {
            return Err(RenderError::InvalidParameter("camera orientation"));
        }
        Ok(())
    }
}
