//! Camera for ray generation and walk navigation.

use glint_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Active walk directions, one signed unit per axis.
///
/// External input handling sets these (e.g. key down = +1, opposite key = -1);
/// the frame driver keeps re-rendering while any axis is nonzero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkAxes {
    /// Along the view direction (+ forward, - back)
    pub dolly: i8,
    /// Along the right basis vector
    pub strafe: i8,
    /// Along the up basis vector
    pub rise: i8,
}

impl WalkAxes {
    /// True when any movement is requested.
    pub fn active(&self) -> bool {
        self.dolly != 0 || self.strafe != 0 || self.rise != 0
    }
}

/// Camera state: eye position, right/up basis, field of view.
///
/// The camera is owned by the surrounding application; the renderer only
/// reads it per frame. `right` and `up` are expected to be orthonormal; the
/// view direction is derived from them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Vec3,
    pub right: Vec3,
    pub up: Vec3,

    /// Horizontal field of view in radians
    pub fov_h: f32,
    /// Vertical field of view in radians
    pub fov_v: f32,

    /// Parallel projection instead of perspective
    pub orthographic: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            right: Vec3::X,
            up: Vec3::Y,
            fov_h: 60f32.to_radians(),
            fov_v: 45f32.to_radians(),
            orthographic: false,
        }
    }
}

impl Camera {
    /// Create a camera at `eye` looking down the direction implied by the basis.
    pub fn new(eye: Vec3, right: Vec3, up: Vec3) -> Self {
        Self {
            eye,
            right: right.normalize(),
            up: up.normalize(),
            ..Default::default()
        }
    }

    /// View direction: `up x right`, so the default basis looks down -Z.
    pub fn forward(&self) -> Vec3 {
        self.up.cross(self.right).normalize()
    }

    /// Generate the primary ray through pixel (x, y) of a width x height image.
    ///
    /// Samples the pixel center. Perspective rays share the eye as origin;
    /// orthographic rays share the view direction and offset the origin
    /// across the image plane.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        // NDC in [-1, 1], y up
        let sx = 2.0 * (x as f32 + 0.5) / width as f32 - 1.0;
        let sy = 1.0 - 2.0 * (y as f32 + 0.5) / height as f32;

        let half_w = (self.fov_h * 0.5).tan();
        let half_h = (self.fov_v * 0.5).tan();
        let forward = self.forward();

        if self.orthographic {
            let origin = self.eye + self.right * (sx * half_w) + self.up * (sy * half_h);
            Ray::new(origin, forward)
        } else {
            let dir = forward + self.right * (sx * half_w) + self.up * (sy * half_h);
            Ray::new(self.eye, dir.normalize())
        }
    }

    /// Integrate walk movement: `eye += direction * speed * dt`.
    pub fn integrate_walk(&mut self, axes: WalkAxes, speed: f32, dt: f32) {
        let dir = self.forward() * axes.dolly as f32
            + self.right * axes.strafe as f32
            + self.up * axes.rise as f32;
        self.eye += dir * speed * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_is_forward() {
        let cam = Camera::default();
        // Odd resolution puts a pixel center exactly on the axis
        let ray = cam.primary_ray(50, 50, 101, 101);
        assert!((ray.direction - cam.forward()).length() < 1e-3);
        assert_eq!(ray.origin, cam.eye);
    }

    #[test]
    fn test_orthographic_rays_parallel() {
        let cam = Camera {
            orthographic: true,
            ..Default::default()
        };
        let a = cam.primary_ray(0, 0, 64, 64);
        let b = cam.primary_ray(63, 63, 64, 64);
        assert_eq!(a.direction, b.direction);
        assert!(a.origin != b.origin);
    }

    #[test]
    fn test_walk_integration() {
        let mut cam = Camera::default();
        let axes = WalkAxes {
            dolly: 1,
            strafe: 0,
            rise: 0,
        };
        cam.integrate_walk(axes, 2.0, 0.5);
        // Default basis looks down -Z
        assert!((cam.eye - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_idle_axes() {
        assert!(!WalkAxes::default().active());
        assert!(WalkAxes { dolly: -1, ..Default::default() }.active());
    }
}
