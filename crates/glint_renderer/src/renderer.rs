//! Render passes.
//!
//! A pass validates its configuration, builds one [`PixelKernel`] over a
//! scene snapshot, and fans the pixel buffer out to rayon in contiguous
//! batches. The caller blocks until every batch has finished.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use glint_core::{SceneSnapshot, Shape};
use glint_math::{orthonormal_basis, Color, Ray};
use rayon::prelude::*;

use crate::batch::{batch_count, render_batch, Batch};
use crate::error::{RenderError, Result};
use crate::sampling::{pixel_rng, sample_around};
use crate::{Camera, PixelBuffer, RenderConfig, RenderStats, Tracer};

/// Everything needed to compute one pixel, shared read-only by all batches.
#[derive(Debug, Clone, Copy)]
pub struct PixelKernel<'a> {
    camera: Camera,
    tracer: Tracer<'a>,
    config: &'a RenderConfig,
}

impl<'a> PixelKernel<'a> {
    /// Build a kernel over `objects`. `config` is expected to be validated.
    pub fn new(objects: &'a [Shape], config: &'a RenderConfig) -> Self {
        Self {
            camera: Camera::new(config),
            tracer: Tracer::new(objects, config.background),
            config,
        }
    }

    /// Compute the color of the pixel at row-major `index`.
    ///
    /// The primary ray and `sample_count` perturbed rays are traced and
    /// averaged. A non-finite average is replaced by the background so an
    /// anomaly stays confined to its own pixel.
    ///
    /// The average is kept as a running mean, so a pixel whose rays all
    /// return the same color is exactly that color for any sample count.
    pub fn render_pixel(&self, index: usize, stats: &mut RenderStats) -> Color {
        let width = self.config.width as usize;
        let x = (index % width) as u32;
        let y = (index / width) as u32;

        let primary = self.camera.primary_ray(x, y);
        let max_depth = self.config.max_depth;
        let mut color = self.tracer.trace_ray(primary, max_depth, stats);

        if self.config.sample_count > 0 {
            let direction = primary.direction();
            let basis = orthonormal_basis(direction);
            if basis.degenerate {
                stats.degenerate_events += 1;
            }

            let mut rng = pixel_rng(self.config.seed, index as u64);
            for taken in 1..=self.config.sample_count {
                let sample = sample_around(direction, &basis, &mut rng);
                let sample_color =
                    self.tracer
                        .trace_ray(Ray::new(primary.origin(), sample), max_depth, stats);
                color += (sample_color - color) / (taken as f32 + 1.0);
            }
        }

        if !color.is_finite() {
            stats.non_finite_pixels += 1;
            return self.tracer.background();
        }
        color
    }
}

/// Render a snapshot into a newly allocated buffer.
pub fn render(snapshot: &SceneSnapshot, config: &RenderConfig) -> Result<PixelBuffer> {
    config.validate()?;
    let mut buffer = PixelBuffer::new(config.width, config.height);
    run_pass(snapshot, config, &mut buffer, &AtomicBool::new(false))?;
    Ok(buffer)
}

/// Render a snapshot into an existing buffer of matching size.
///
/// Every pixel of the buffer is overwritten.
pub fn render_into(
    snapshot: &SceneSnapshot,
    config: &RenderConfig,
    buffer: &mut PixelBuffer,
) -> Result<RenderStats> {
    let never = AtomicBool::new(false);
    render_into_cancellable(snapshot, config, buffer, &never)
}

/// Render with cooperative cancellation.
///
/// `cancel` is checked before each batch starts, never in the middle of one.
/// Batches skipped after cancellation are filled with the background color
/// so the buffer never holds stale pixels from an earlier pass; the call then
/// returns [`RenderError::Cancelled`].
pub fn render_into_cancellable(
    snapshot: &SceneSnapshot,
    config: &RenderConfig,
    buffer: &mut PixelBuffer,
    cancel: &AtomicBool,
) -> Result<RenderStats> {
    config.validate()?;
    if buffer.width() != config.width || buffer.height() != config.height {
        return Err(RenderError::BufferMismatch {
            width: config.width,
            height: config.height,
            actual_width: buffer.width(),
            actual_height: buffer.height(),
        });
    }
    run_pass(snapshot, config, buffer, cancel)
}

// Runs one pass; `config` is validated and `buffer` sized by the caller.
fn run_pass(
    snapshot: &SceneSnapshot,
    config: &RenderConfig,
    buffer: &mut PixelBuffer,
    cancel: &AtomicBool,
) -> Result<RenderStats> {
    let objects = snapshot.objects();
    if objects.is_empty() {
        log::debug!("Rendering empty scene; output is background only");
    }

    let batch_size = config.batch_size;
    let total_batches = batch_count(buffer.len(), batch_size);
    log::info!(
        "Rendering {}x{} ({} objects, depth {}, {} extra samples) in {} batches on {} threads",
        config.width,
        config.height,
        objects.len(),
        config.max_depth,
        config.sample_count,
        total_batches,
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let kernel = PixelKernel::new(objects, config);

    let mut stats = buffer
        .pixels_mut()
        .par_chunks_mut(batch_size)
        .enumerate()
        .map(|(index, pixels)| {
            if cancel.load(Ordering::Relaxed) {
                pixels.fill(config.background);
                return RenderStats {
                    cancelled_batches: 1,
                    ..Default::default()
                };
            }
            let batch = Batch::new(index, index * batch_size, pixels.len());
            render_batch(&batch, pixels, &kernel)
        })
        .reduce(RenderStats::default, RenderStats::merge);
    stats.elapsed = start.elapsed();

    if stats.degenerate_events > 0 {
        log::warn!(
            "{} degenerate geometry events replaced by fallback frames or normals",
            stats.degenerate_events
        );
    }
    if stats.non_finite_pixels > 0 {
        log::warn!(
            "{} pixels produced non-finite colors and were set to background",
            stats.non_finite_pixels
        );
    }

    if stats.cancelled_batches > 0 {
        log::info!(
            "Render cancelled: {} of {} batches completed",
            stats.batches,
            total_batches
        );
        return Err(RenderError::Cancelled {
            completed: stats.batches,
            total: total_batches,
        });
    }

    log::info!(
        "Rendered {} pixels ({} rays) in {:.2?}",
        stats.pixels,
        stats.rays_traced,
        stats.elapsed
    );
    Ok(stats)
}

/// A render target that survives across passes.
///
/// The buffer is allocated on the first frame and reallocated only when the
/// configured resolution changes.
#[derive(Debug, Default)]
pub struct Renderer {
    buffer: PixelBuffer,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one frame into the owned buffer.
    pub fn render_frame(
        &mut self,
        snapshot: &SceneSnapshot,
        config: &RenderConfig,
    ) -> Result<(&PixelBuffer, RenderStats)> {
        config.validate()?;
        self.buffer.resize(config.width, config.height);
        let stats = run_pass(snapshot, config, &mut self.buffer, &AtomicBool::new(false))?;
        Ok((&self.buffer, stats))
    }

    /// The most recently rendered frame.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}
