//! Stochastic perturbation of primary rays.
//!
//! Each pixel owns its generator, seeded from the pass seed and the pixel
//! index, so sampled output does not depend on thread scheduling or batch
//! size.

use std::f32::consts::TAU;

use glint_math::{orthonormal_basis, Basis, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// A perturbed direction and whether its frame needed the fallback axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbed {
    pub direction: Vec3,
    pub degenerate: bool,
}

/// Generate a random f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Sample generator for one pixel.
pub fn pixel_rng(seed: u64, pixel_index: u64) -> SmallRng {
    SmallRng::seed_from_u64(mix(seed, pixel_index))
}

// SplitMix64 finalizer over the combined seed; neighbouring pixels get
// unrelated streams.
fn mix(seed: u64, index: u64) -> u64 {
    let mut z = seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Draw a direction jittered in a cone around the unit `direction`.
pub fn sample_ray(direction: Vec3, rng: &mut dyn RngCore) -> Perturbed {
    let basis = orthonormal_basis(direction);
    Perturbed {
        direction: sample_around(direction, &basis, rng),
        degenerate: basis.degenerate,
    }
}

/// Like [`sample_ray`], reusing a frame already built for `direction`.
///
/// `phi` is uniform in [0, 2pi) and `cos_theta` uniform in [0, 1). The offset
/// is added to `direction * (1 + cos_theta)`, which keeps every sample within
/// 45 degrees of the original direction.
pub fn sample_around(direction: Vec3, basis: &Basis, rng: &mut dyn RngCore) -> Vec3 {
    let phi = TAU * gen_f32(rng);
    let cos_theta = gen_f32(rng);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let offset = basis.u * (phi.cos() * sin_theta) + basis.v * (phi.sin() * sin_theta);
    (direction + offset + direction * cos_theta).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_samples_stay_near_direction() {
        let mut rng = StdRng::seed_from_u64(42);
        let direction = Vec3::new(0.2, -0.3, -1.0).normalize();

        for _ in 0..1000 {
            let sample = sample_ray(direction, &mut rng);
            assert!(!sample.degenerate);
            assert!((sample.direction.length() - 1.0).abs() < 1e-5);
            // cos(45 degrees) with a little slack
            assert!(sample.direction.dot(direction) > 0.707 - 1e-4);
        }
    }

    #[test]
    fn test_samples_spread() {
        let mut rng = StdRng::seed_from_u64(42);
        let direction = Vec3::NEG_Z;

        let first = sample_ray(direction, &mut rng).direction;
        let differs = (0..16).any(|_| (sample_ray(direction, &mut rng).direction - first).length() > 1e-3);
        assert!(differs);
    }

    #[test]
    fn test_vertical_direction_uses_fallback() {
        let mut rng = StdRng::seed_from_u64(42);

        for direction in [Vec3::Y, Vec3::NEG_Y] {
            let sample = sample_ray(direction, &mut rng);
            assert!(sample.degenerate);
            assert!(sample.direction.is_finite());
            assert!(sample.direction.dot(direction) > 0.7);
        }
    }

    #[test]
    fn test_pixel_rng_is_reproducible() {
        let mut a = pixel_rng(7, 123);
        let mut b = pixel_rng(7, 123);
        let mut c = pixel_rng(7, 124);

        let xa: [f32; 4] = std::array::from_fn(|_| gen_f32(&mut a));
        let xb: [f32; 4] = std::array::from_fn(|_| gen_f32(&mut b));
        let xc: [f32; 4] = std::array::from_fn(|_| gen_f32(&mut c));

        assert_eq!(xa, xb);
        assert_ne!(xa, xc);
    }
}
