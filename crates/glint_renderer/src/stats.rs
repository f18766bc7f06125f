//! Per-pass counters.

use std::time::Duration;

/// Counters gathered while rendering, merged across batches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// Pixels written by the kernel (cancelled batches excluded)
    pub pixels: usize,
    /// Ray segments intersected against the scene
    pub rays_traced: u64,
    /// Fallback frames or normals substituted for degenerate geometry
    pub degenerate_events: u64,
    /// Pixels whose averaged color was not finite and were replaced
    pub non_finite_pixels: usize,
    /// Batches that ran
    pub batches: usize,
    /// Batches skipped because the pass was cancelled
    pub cancelled_batches: usize,
    /// Wall-clock time of the whole pass
    pub elapsed: Duration,
}

impl RenderStats {
    /// Combine counters from two disjoint parts of a pass.
    pub fn merge(self, other: RenderStats) -> RenderStats {
        RenderStats {
            pixels: self.pixels + other.pixels,
            rays_traced: self.rays_traced + other.rays_traced,
            degenerate_events: self.degenerate_events + other.degenerate_events,
            non_finite_pixels: self.non_finite_pixels + other.non_finite_pixels,
            batches: self.batches + other.batches,
            cancelled_batches: self.cancelled_batches + other.cancelled_batches,
            elapsed: self.elapsed.max(other.elapsed),
        }
    }
}
