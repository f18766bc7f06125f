//! Infinite plane primitive.

use glint_math::{Color, Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};

use super::{finite, Intersect, InvalidShape, Surface};

// Rays closer than this to parallel with the plane are treated as misses.
const PARALLEL_EPSILON: f32 = 1e-8;

/// An infinite two-sided plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    #[serde(default)]
    surface: Surface,
}

impl Plane {
    /// Create a new plane. `normal` is normalized; a zero normal is kept as
    /// zero and rejected by validation.
    pub fn new(point: Vec3, normal: Vec3, surface: Surface) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
            surface,
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub(super) fn validated(self) -> Result<Self, InvalidShape> {
        finite(self.point)?;
        finite(self.normal)?;
        let normal = self.normal.normalize_or_zero();
        if normal == Vec3::ZERO {
            return Err(InvalidShape::ZeroNormal);
        }
        self.surface.validate()?;
        Ok(Self { normal, ..self })
    }
}

impl Intersect for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = self.normal.dot(self.point - ray.origin()) / denom;
        Interval::FORWARD.contains(t).then_some(t)
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn color_at(&self, point: Vec3) -> Color {
        self.surface.color_at(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Surface::default())
    }

    #[test]
    fn test_plane_hit_from_above() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Y);
        let t = floor().intersect(&ray).unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_hit_from_below() {
        let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::Y);
        let t = floor().intersect(&ray).unwrap();
        assert!((t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_normalizes_normal() {
        let plane = Plane::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Surface::default());
        assert_eq!(plane.normal_at(Vec3::ZERO), Vec3::Y);
    }

    #[test]
    fn test_plane_validation() {
        assert_eq!(
            Plane::new(Vec3::ZERO, Vec3::ZERO, Surface::default()).validated(),
            Err(InvalidShape::ZeroNormal)
        );

        // Deserialized planes may carry an unnormalized normal
        let plane: Plane =
            serde_json::from_str(r#"{ "point": [0, 0, 0], "normal": [0, 0, 2] }"#).unwrap();
        assert_eq!(plane.validated().unwrap().normal(), Vec3::Z);
    }
}
