//! Intersectable scene objects.
//!
//! Every object answers three questions for the tracer: how far along a ray
//! its nearest surface point is, what the outward normal at a surface point
//! is, and what color the surface has there. The concrete shapes implement
//! [`Intersect`]; [`Shape`] is the closed union stored in scenes so the hot
//! loop dispatches with a `match` over a contiguous slice.

mod plane;
mod sphere;

pub use plane::Plane;
pub use sphere::Sphere;

use glint_math::{Color, Ray, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Shifts checker cell boundaries off the integer lattice so that surfaces
// lying on a lattice plane (e.g. a floor at y = 0) do not flicker.
const CHECKER_BIAS: f32 = 1e-4;

/// Capability set of an object the tracer can hit.
pub trait Intersect: Send + Sync {
    /// Nearest non-negative distance along `ray` to this object's surface,
    /// or `None` if the ray misses.
    fn intersect(&self, ray: &Ray) -> Option<f32>;

    /// Outward unit normal at `point`, assumed to lie on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Surface color at `point`, assumed to lie on the surface.
    fn color_at(&self, point: Vec3) -> Color;
}

/// Surface coloring of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Uniform color.
    Solid(Color),
    /// 3D checkerboard with cubic cells of edge `scale`.
    Checker { even: Color, odd: Color, scale: f32 },
}

impl Surface {
    /// Color of this surface at a world-space point.
    pub fn color_at(&self, point: Vec3) -> Color {
        match *self {
            Surface::Solid(color) => color,
            Surface::Checker { even, odd, scale } => {
                let cell = ((point + Vec3::splat(CHECKER_BIAS)) / scale).floor();
                let parity = (cell.x + cell.y + cell.z).rem_euclid(2.0);
                if parity < 0.5 {
                    even
                } else {
                    odd
                }
            }
        }
    }

    fn validate(&self) -> Result<(), InvalidShape> {
        match *self {
            Surface::Solid(color) => finite(color),
            Surface::Checker { even, odd, scale } => {
                finite(even)?;
                finite(odd)?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(InvalidShape::CheckerScale(scale));
                }
                Ok(())
            }
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Surface::Solid(Color::ONE)
    }
}

/// Reasons a shape definition is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidShape {
    #[error("sphere radius must be positive and finite, got {0}")]
    Radius(f32),

    #[error("plane normal must be non-zero")]
    ZeroNormal,

    #[error("checker scale must be positive and finite, got {0}")]
    CheckerScale(f32),

    #[error("shape contains a non-finite component")]
    NonFinite,
}

fn finite(v: Vec3) -> Result<(), InvalidShape> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(InvalidShape::NonFinite)
    }
}

/// Closed set of scene objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
}

impl Shape {
    /// Check the shape's parameters and return it in canonical form
    /// (plane normals normalized).
    pub fn validated(self) -> Result<Shape, InvalidShape> {
        match self {
            Shape::Sphere(sphere) => sphere.validated().map(Shape::Sphere),
            Shape::Plane(plane) => plane.validated().map(Shape::Plane),
        }
    }

    /// Short human-readable kind name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
        }
    }
}

impl Intersect for Shape {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Plane(p) => p.intersect(ray),
        }
    }

    #[inline]
    fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Plane(p) => p.normal_at(point),
        }
    }

    #[inline]
    fn color_at(&self, point: Vec3) -> Color {
        match self {
            Shape::Sphere(s) => s.color_at(point),
            Shape::Plane(p) => p.color_at(point),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_surface_is_uniform() {
        let surface = Surface::Solid(Color::new(0.2, 0.4, 0.6));
        assert_eq!(surface.color_at(Vec3::ZERO), Color::new(0.2, 0.4, 0.6));
        assert_eq!(surface.color_at(Vec3::splat(123.0)), Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_checker_alternates() {
        let surface = Surface::Checker {
            even: Color::ONE,
            odd: Color::ZERO,
            scale: 1.0,
        };

        assert_eq!(surface.color_at(Vec3::new(0.5, 0.0, 0.5)), Color::ONE);
        assert_eq!(surface.color_at(Vec3::new(1.5, 0.0, 0.5)), Color::ZERO);
        assert_eq!(surface.color_at(Vec3::new(-0.5, 0.0, 0.5)), Color::ZERO);
        assert_eq!(surface.color_at(Vec3::new(1.5, 0.0, 1.5)), Color::ONE);
    }

    #[test]
    fn test_checker_stable_on_lattice_plane() {
        let surface = Surface::Checker {
            even: Color::ONE,
            odd: Color::ZERO,
            scale: 1.0,
        };

        // Tiny noise around y = 0 must not flip the cell
        let above = surface.color_at(Vec3::new(0.5, 1e-6, 0.5));
        let below = surface.color_at(Vec3::new(0.5, -1e-6, 0.5));
        assert_eq!(above, below);
    }

    #[test]
    fn test_shape_dispatch() {
        let shape: Shape = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Surface::default()).into();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let t = shape.intersect(&ray).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!((shape.normal_at(ray.at(t)) - Vec3::Z).length() < 1e-5);
        assert_eq!(shape.color_at(ray.at(t)), Color::ONE);
        assert_eq!(shape.kind(), "sphere");
    }

    #[test]
    fn test_validated_rejects_bad_checker() {
        let shape: Shape = Plane::new(
            Vec3::ZERO,
            Vec3::Y,
            Surface::Checker {
                even: Color::ONE,
                odd: Color::ZERO,
                scale: 0.0,
            },
        )
        .into();

        assert_eq!(shape.validated(), Err(InvalidShape::CheckerScale(0.0)));
    }

    #[test]
    fn test_shape_json_tagging() {
        let json = r#"{ "type": "sphere", "center": [0, 1, -3], "radius": 0.5,
                        "surface": { "solid": [1, 0, 0] } }"#;
        let shape: Shape = serde_json::from_str(json).unwrap();

        assert_eq!(
            shape,
            Shape::Sphere(Sphere::new(
                Vec3::new(0.0, 1.0, -3.0),
                0.5,
                Surface::Solid(Color::new(1.0, 0.0, 0.0)),
            ))
        );
    }
}
