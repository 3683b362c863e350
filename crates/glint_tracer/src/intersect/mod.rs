//! Geometry intersection library.
//!
//! Pure per-primitive ray tests. Every function takes a world-space ray, the
//! shape's literal parameters, the inverse of its accumulated transform, the
//! normal matrix (inverse-transpose of the linear part), and a material
//! index. It returns the smallest strictly-positive `t`, or [`NO_HIT`], and
//! writes the world-space hit point, unit normal, and material index into the
//! out-parameter only when the hit is real.
//!
//! Degenerate inputs (zero-length directions, near-zero denominators, rays
//! grazing their own surface at `t = 0`) all resolve to [`NO_HIT`]; they are
//! never errors and never produce NaN.

mod aabox;
mod cone;
mod cylinder;
mod plane;
mod sphere;
mod triangle;

pub use aabox::box_hit;
pub use cone::cone_hit;
pub use cylinder::cylinder_hit;
pub use plane::plane_hit;
pub use sphere::sphere_hit;
pub use triangle::triangle_hit;

use glint_math::{Mat4, Ray, Vec3};

/// Sentinel distance for "no intersection": a very large finite number
/// treated as +infinity by every comparison.
pub const NO_HIT: f32 = 1e30;

/// Denominator tolerance below which a quotient is treated as degenerate.
pub(crate) const DEGENERATE: f32 = 1e-8;

/// Surface data written by an intersection test when it returns a finite `t`.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceHit {
    /// Ray parameter of the hit; hit point is `origin + t * direction`.
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
    /// World-space unit normal (geometric, not yet flipped for back faces)
    pub normal: Vec3,
    /// Material index for the shading stage
    pub material: u32,
}

impl Default for SurfaceHit {
    fn default() -> Self {
        Self {
            t: NO_HIT,
            point: Vec3::ZERO,
            normal: Vec3::Y,
            material: 0,
        }
    }
}

/// Transform a world ray into a shape's local frame.
pub(crate) fn to_local(ray: &Ray, inverse: Mat4) -> (Vec3, Vec3) {
    (
        inverse.transform_point3(ray.origin),
        inverse.transform_vector3(ray.direction),
    )
}
