//! Glint Renderer - CPU reflection ray tracing.
//!
//! Casts one primary ray per pixel, follows mirror reflections up to a depth
//! bound, and averages extra jittered rays for soft reflections and
//! anti-aliasing. Shading is color-multiplicative against a background; there
//! are no lights, shadows or acceleration structures.
//!
//! Pixels are independent and rendered in parallel batches with rayon.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Scene, Sphere, Surface};
//! use glint_renderer::{render, RenderConfig};
//!
//! let mut scene = Scene::new("demo");
//! scene.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Surface::default()));
//!
//! let config = RenderConfig::default().with_resolution(320, 240);
//! let image = render(&scene.snapshot(), &config)?;
//! ```

mod batch;
mod buffer;
mod camera;
mod config;
mod error;
mod renderer;
mod sampling;
mod stats;
mod tracer;

pub use batch::{batch_count, generate_batches, render_batch, Batch, DEFAULT_BATCH_SIZE};
pub use buffer::{color_to_rgba, PixelBuffer};
pub use camera::{look_rotation, Camera};
pub use config::RenderConfig;
pub use error::{RenderError, Result};
pub use renderer::{render, render_into, render_into_cancellable, PixelKernel, Renderer};
pub use sampling::{gen_f32, pixel_rng, sample_around, sample_ray, Perturbed};
pub use stats::RenderStats;
pub use tracer::{closest_hit, Hit, Tracer, SURFACE_EPSILON};

/// Scene file with render settings, as loaded by hosts.
pub type SceneFile = glint_core::SceneDescription<RenderConfig>;

/// Re-export Color and common math types from glint_math
pub use glint_math::{Color, Quat, Ray, Vec3};
