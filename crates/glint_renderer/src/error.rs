//! Error types for the renderer.

use thiserror::Error;

/// Errors that can occur while setting up or running a render pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Width or height is zero.
    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Field of view outside (0, 180) degrees.
    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    /// Batch size of zero.
    #[error("batch size must be positive")]
    InvalidBatchSize,

    /// A camera or background parameter is NaN, infinite or zero-length.
    #[error("invalid {0}: must be finite (and non-zero for orientations)")]
    InvalidParameter(&'static str),

    /// width * height does not fit in memory addressing.
    #[error("{width}x{height} image is too large to allocate")]
    BufferTooLarge { width: u32, height: u32 },

    /// The target buffer does not match the configured resolution.
    #[error("buffer is {actual_width}x{actual_height} but the render asks for {width}x{height}")]
    BufferMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// The pass was cancelled before every batch ran.
    #[error("render cancelled after {completed} of {total} batches")]
    Cancelled { completed: usize, total: usize },
}

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, RenderError>;
