//! Scene intersection and reflective shading.
//!
//! Shading is purely multiplicative: a surface tints whatever its mirror
//! reflection sees, and a ray that escapes the scene or runs out of depth
//! sees the background. A white surface passes its reflection through
//! unchanged; a black one absorbs everything.

use glint_core::{Intersect, Shape};
use glint_math::{reflect, Color, Ray, Vec3};

use crate::RenderStats;

/// Offset along the surface normal for reflected ray origins, keeping the
/// new ray from hitting the surface it leaves.
pub const SURFACE_EPSILON: f32 = 1e-3;

/// Nearest intersection found by a scene scan.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Position of the object in the scan order
    pub index: usize,
    pub object: &'a Shape,
    pub distance: f32,
}

/// Scan every object and return the nearest hit.
///
/// No early exit. Distances are compared with strict `<`, so among objects
/// at the same distance the first one scanned wins.
pub fn closest_hit<'a>(objects: &'a [Shape], ray: &Ray) -> Option<Hit<'a>> {
    let mut closest: Option<Hit<'a>> = None;

    for (index, object) in objects.iter().enumerate() {
        if let Some(distance) = object.intersect(ray) {
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(Hit {
                    index,
                    object,
                    distance,
                });
            }
        }
    }

    closest
}

/// Traces rays against one scene snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    objects: &'a [Shape],
    background: Color,
}

impl<'a> Tracer<'a> {
    pub fn new(objects: &'a [Shape], background: Color) -> Self {
        Self { objects, background }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Compute the color seen along `ray` with `depth` interactions left.
    ///
    /// Equivalent to the recursion
    /// `trace(r, 0) = background`,
    /// `trace(r, d) = background` on a miss, and
    /// `trace(r, d) = color(p) * trace(reflected, d - 1)` on a hit,
    /// unrolled into a loop that multiplies surface colors into a running
    /// throughput so stack usage does not grow with depth.
    pub fn trace_ray(&self, ray: Ray, depth: u32, stats: &mut RenderStats) -> Color {
        let mut ray = ray;
        let mut throughput = Color::ONE;

        for _ in 0..depth {
            stats.rays_traced += 1;

            let Some(hit) = closest_hit(self.objects, &ray) else {
                return throughput * self.background;
            };

            let point = ray.at(hit.distance);
            let normal = self.facing_normal(hit.object, point, ray.direction(), stats);

            throughput *= hit.object.color_at(point);
            if throughput == Color::ZERO {
                // Fully absorbed; nothing further can contribute
                return Color::ZERO;
            }

            ray = Ray::new(
                point + normal * SURFACE_EPSILON,
                reflect(ray.direction(), normal),
            );
        }

        throughput * self.background
    }

    // Outward normal flipped to face the incoming ray. A zero or non-finite
    // normal is replaced by the reversed ray direction.
    fn facing_normal(
        &self,
        object: &Shape,
        point: Vec3,
        direction: Vec3,
        stats: &mut RenderStats,
    ) -> Vec3 {
        let normal = object.normal_at(point);
        if !normal.is_finite() || normal.length_squared() < 1e-12 {
            stats.degenerate_events += 1;
            return -direction;
        }

        if normal.dot(direction) > 0.0 {
            -normal
        } else {
            normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{Plane, Sphere, Surface};

    const BACKGROUND: Color = Color::new(0.25, 0.5, 1.0);

    fn sphere(z: f32, radius: f32, color: Color) -> Shape {
        Sphere::new(Vec3::new(0.0, 0.0, z), radius, Surface::Solid(color)).into()
    }

    fn forward() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::NEG_Z)
    }

    #[test]
    fn test_closest_hit_prefers_nearer() {
        let objects = [sphere(-10.0, 1.0, Color::ONE), sphere(-5.0, 1.0, Color::ZERO)];
        let hit = closest_hit(&objects, &forward()).unwrap();

        assert_eq!(hit.index, 1);
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_closest_hit_tie_goes_to_first() {
        let objects = [
            sphere(-5.0, 1.0, Color::new(1.0, 0.0, 0.0)),
            sphere(-5.0, 1.0, Color::new(0.0, 1.0, 0.0)),
        ];
        let hit = closest_hit(&objects, &forward()).unwrap();
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_closest_hit_empty() {
        assert!(closest_hit(&[], &forward()).is_none());
    }

    #[test]
    fn test_depth_zero_is_background() {
        let objects = [sphere(-5.0, 1.0, Color::ZERO)];
        let tracer = Tracer::new(&objects, BACKGROUND);
        let mut stats = RenderStats::default();

        assert_eq!(tracer.trace_ray(forward(), 0, &mut stats), BACKGROUND);
        assert_eq!(stats.rays_traced, 0);
    }

    #[test]
    fn test_miss_is_background() {
        let objects = [sphere(5.0, 1.0, Color::ZERO)];
        let tracer = Tracer::new(&objects, BACKGROUND);
        let mut stats = RenderStats::default();

        assert_eq!(tracer.trace_ray(forward(), 5, &mut stats), BACKGROUND);
    }

    #[test]
    fn test_single_bounce_tints_background() {
        let surface = Color::new(0.5, 0.5, 0.25);
        let objects = [sphere(-5.0, 1.0, surface)];
        let tracer = Tracer::new(&objects, BACKGROUND);
        let mut stats = RenderStats::default();

        // Straight back out along +Z, which misses
        let color = tracer.trace_ray(forward(), 3, &mut stats);
        assert_eq!(color, surface * BACKGROUND);
        assert_eq!(stats.rays_traced, 2);
    }

    #[test]
    fn test_black_surface_absorbs() {
        let objects = [sphere(-5.0, 1.0, Color::ZERO)];
        let tracer = Tracer::new(&objects, BACKGROUND);
        let mut stats = RenderStats::default();

        assert_eq!(tracer.trace_ray(forward(), 10, &mut stats), Color::ZERO);
    }

    #[test]
    fn test_facing_mirrors_bounce_until_depth() {
        // Two parallel mirrors facing each other; the ray ping-pongs
        let grey = Color::splat(0.5);
        let objects: [Shape; 2] = [
            Plane::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z, Surface::Solid(grey)).into(),
            Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z, Surface::Solid(grey)).into(),
        ];
        let tracer = Tracer::new(&objects, Color::ONE);
        let mut stats = RenderStats::default();

        let color = tracer.trace_ray(forward(), 3, &mut stats);
        assert_eq!(color, Color::splat(0.125));
        assert_eq!(stats.rays_traced, 3);
    }

    #[test]
    fn test_degenerate_normal_falls_back_to_reversed_direction() {
        // Zero radius: hit at the center, where normal_at divides 0 by 0
        let surface = Color::new(0.5, 0.25, 1.0);
        let objects = [sphere(-5.0, 0.0, surface)];
        assert!(!objects[0].normal_at(Vec3::new(0.0, 0.0, -5.0)).is_finite());

        let tracer = Tracer::new(&objects, BACKGROUND);
        let mut stats = RenderStats::default();
        let color = tracer.trace_ray(forward(), 3, &mut stats);

        assert!(color.is_finite());
        assert_eq!(color, surface * BACKGROUND);
        assert_eq!(stats.degenerate_events, 1);
        assert_eq!(stats.rays_traced, 2);
    }

    #[test]
    fn test_back_face_plane_hit_reflects_back() {
        // Plane normal points away from the camera; the ray still bounces
        // back towards +Z instead of re-hitting the plane.
        let white = Color::ONE;
        let objects: [Shape; 1] =
            [Plane::new(Vec3::new(0.0, 0.0, -2.0), Vec3::NEG_Z, Surface::Solid(white)).into()];
        let tracer = Tracer::new(&objects, BACKGROUND);
        let mut stats = RenderStats::default();

        assert_eq!(tracer.trace_ray(forward(), 4, &mut stats), BACKGROUND);
        assert_eq!(stats.rays_traced, 2);
    }
}
