//! Camera for primary ray generation.

use glint_math::{Mat3, Quat, Ray, Vec3};

use crate::RenderConfig;

/// Pinhole camera looking down its local -Z axis.
///
/// Built once per pass from a validated [`RenderConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Vec3,
    orientation: Quat,
    width: f32,
    height: f32,
    // tan(vfov / 2)
    half_height: f32,
    aspect: f32,
}

impl Camera {
    /// Create a camera from render settings.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            position: config.position,
            orientation: config.orientation.normalize(),
            width: config.width as f32,
            height: config.height as f32,
            half_height: (config.vfov.to_radians() / 2.0).tan(),
            aspect: config.aspect_ratio(),
        }
    }

    /// Camera position; the origin of every primary ray.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit world-space direction through the center of pixel (x, y).
    ///
    /// Pixel (0, 0) is the top-left corner of the image.
    pub fn primary_direction(&self, x: u32, y: u32) -> Vec3 {
        let screen_x = (2.0 * (x as f32 + 0.5) / self.width - 1.0) * self.half_height * self.aspect;
        let screen_y = (1.0 - 2.0 * (y as f32 + 0.5) / self.height) * self.half_height;

        (self.orientation * Vec3::new(screen_x, screen_y, -1.0)).normalize()
    }

    /// Primary ray through the center of pixel (x, y).
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        Ray::new(self.position, self.primary_direction(x, y))
    }
}

/// Orientation that points the camera along `forward` with `up` as the
/// approximate screen-up direction.
///
/// Returns `None` if `forward` is zero or parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let right = forward.cross(up).try_normalize()?;
    let true_up = right.cross(forward);

    // Camera space: +X right, +Y up, -Z forward
    Some(Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward)))
}
