//! Batched pixel rendering.
//!
//! A pass splits the row-major pixel buffer into contiguous index ranges
//! (batches) that rayon renders independently. Each batch writes only its
//! own slice of the buffer, so no locking is needed.

use glint_math::Color;

use crate::renderer::PixelKernel;
use crate::RenderStats;

/// Default batch size in pixels.
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// A contiguous range of pixel indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// Index of this batch in the pass
    pub index: usize,
    /// First pixel index covered
    pub start: usize,
    /// Number of pixels covered
    pub len: usize,
}

impl Batch {
    /// Create a new batch.
    pub fn new(index: usize, start: usize, len: usize) -> Self {
        Self { index, start, len }
    }

    /// One past the last pixel index covered.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Number of batches needed to cover `pixel_count` pixels.
pub fn batch_count(pixel_count: usize, batch_size: usize) -> usize {
    pixel_count.div_ceil(batch_size)
}

/// Split `pixel_count` pixels into batches of at most `batch_size`.
///
/// The last batch is short when the sizes do not divide evenly. This is the
/// same split `par_chunks_mut(batch_size)` produces over the pixel buffer.
pub fn generate_batches(pixel_count: usize, batch_size: usize) -> Vec<Batch> {
    (0..batch_count(pixel_count, batch_size))
        .map(|index| {
            let start = index * batch_size;
            Batch::new(index, start, batch_size.min(pixel_count - start))
        })
        .collect()
}

/// Render one batch into `pixels`, which holds exactly the batch's range.
pub fn render_batch(batch: &Batch, pixels: &mut [Color], kernel: &PixelKernel) -> RenderStats {
    debug_assert_eq!(pixels.len(), batch.len);

    let mut stats = RenderStats {
        batches: 1,
        ..Default::default()
    };

    for (offset, pixel) in pixels.iter_mut().enumerate() {
        *pixel = kernel.render_pixel(batch.start + offset, &mut stats);
    }
    stats.pixels = pixels.len();

    stats
}
