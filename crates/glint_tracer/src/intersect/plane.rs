//! Ray/plane intersection.

use glint_math::{Mat3, Mat4, Ray, Vec3};

use super::{to_local, SurfaceHit, DEGENERATE, NO_HIT};

/// Intersect a ray with an infinite plane through `point` with `normal`,
/// both in the shape's local frame.
pub fn plane_hit(
    ray: &Ray,
    point: Vec3,
    normal: Vec3,
    inverse: Mat4,
    normal_mat: Mat3,
    material: u32,
    hit: &mut SurfaceHit,
) -> f32 {
    let (lo, ld) = to_local(ray, inverse);

    // Parallel rays (and zero-length directions) never hit
    let denom = ld.dot(normal);
    if denom.abs() < DEGENERATE {
        return NO_HIT;
    }

    let t = (point - lo).dot(normal) / denom;
    if t <= 0.0 {
        return NO_HIT;
    }

    hit.t = t;
    hit.point = ray.at(t);
    hit.normal = (normal_mat * normal).normalize();
    hit.material = material;
    t
}
