// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod basis;
mod interval;
mod ray;

pub use basis::{orthonormal_basis, reflect, Basis, BASIS_FALLBACK_AXIS, BASIS_REFERENCE_AXIS};
pub use interval::Interval;
pub use ray::Ray;

/// Linear RGB color, components nominally in [0, 1].
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_componentwise() {
        let surface = Color::new(1.0, 0.5, 0.0);
        let light = Color::new(0.5, 0.5, 0.5);
        assert_eq!(surface * light, Color::new(0.5, 0.25, 0.0));
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        let c = a + b;
        assert_eq!(c, Vec3::new(5.0, 7.0, 9.0));
    }
}
