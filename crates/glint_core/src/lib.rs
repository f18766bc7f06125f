//! Glint Core - scene objects for the Glint reflection tracer.
//!
//! This crate provides:
//!
//! - **Shapes**: `Sphere`, `Plane` and the closed `Shape` union the tracer
//!   dispatches on, all implementing [`Intersect`]
//! - **Scene**: an ordered, mutable object list with immutable
//!   [`SceneSnapshot`]s for render passes
//! - **Scene files**: JSON scene descriptions
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Scene, Shape, Sphere, Surface};
//! use glint_math::{Color, Vec3};
//!
//! let mut scene = Scene::new("demo");
//! scene.add(Shape::Sphere(Sphere::new(
//!     Vec3::new(0.0, 0.0, -3.0),
//!     1.0,
//!     Surface::Solid(Color::new(0.9, 0.2, 0.2)),
//! )));
//! let snapshot = scene.snapshot();
//! ```

pub mod description;
pub mod scene;
pub mod shape;

// Re-export commonly used types
pub use description::{load_scene_file, SceneDescription, SceneError};
pub use scene::{Scene, SceneSnapshot};
pub use shape::{InvalidShape, Intersect, Plane, Shape, Sphere, Surface};
