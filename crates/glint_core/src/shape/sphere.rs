//! Sphere primitive.

use glint_math::{Color, Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};

use super::{finite, Intersect, InvalidShape, Surface};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    #[serde(default)]
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, surface: Surface) -> Self {
        Self {
            center,
            radius,
            surface,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub(super) fn validated(self) -> Result<Self, InvalidShape> {
        finite(self.center)?;
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(InvalidShape::Radius(self.radius));
        }
        self.surface.validate()?;
        Ok(self)
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root first; the far root is the exit point when the ray
        // starts inside the sphere.
        let near = (h - sqrtd) / a;
        if Interval::FORWARD.contains(near) {
            return Some(near);
        }
        let far = (h + sqrtd) / a;
        if Interval::FORWARD.contains(far) {
            return Some(far);
        }
        None
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }

    fn color_at(&self, point: Vec3) -> Color {
        self.surface.color_at(point)
    }
}
