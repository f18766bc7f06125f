//! Reflection and tangent-frame helpers.

use crate::Vec3;

/// Reference axis used to build a tangent frame around a direction.
pub const BASIS_REFERENCE_AXIS: Vec3 = Vec3::Y;

/// Reference axis used when the direction is (anti)parallel to
/// [`BASIS_REFERENCE_AXIS`].
pub const BASIS_FALLBACK_AXIS: Vec3 = Vec3::X;

// |dot(direction, up)| above this means the cross product is too short to
// normalize reliably.
const PARALLEL_THRESHOLD: f32 = 1.0 - 1e-6;

/// Two unit vectors perpendicular to a direction and to each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub u: Vec3,
    pub v: Vec3,
    /// True if the fallback reference axis had to be used.
    pub degenerate: bool,
}

/// Build an orthonormal frame `(u, v)` around a unit `direction`.
///
/// `u = normalize(direction x up)` and `v = direction x u`, with `up` the
/// world +Y axis. When `direction` is parallel to +Y the frame is built
/// against +X instead and the result is flagged as degenerate.
pub fn orthonormal_basis(direction: Vec3) -> Basis {
    let mut degenerate = direction.dot(BASIS_REFERENCE_AXIS).abs() > PARALLEL_THRESHOLD;

    let u = if degenerate {
        direction.cross(BASIS_FALLBACK_AXIS).normalize_or_zero()
    } else {
        let u = direction.cross(BASIS_REFERENCE_AXIS).normalize_or_zero();
        if u == Vec3::ZERO {
            degenerate = true;
            direction.cross(BASIS_FALLBACK_AXIS).normalize_or_zero()
        } else {
            u
        }
    };

    let v = direction.cross(u);
    Basis { u, v, degenerate }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
