//! Ray/triangle intersection.
//!
//! Mesh faces reduce entirely to this test at compile time: vertices arrive
//! already baked into world space, so no transform is applied here. The hit
//! is classified by the barycentric-area test: the three sub-triangle areas
//! must sum to the full area within tolerance.

use glint_math::{Ray, Vec3};

use super::{SurfaceHit, NO_HIT};

const AREA_TOLERANCE: f32 = 1e-4;

pub fn triangle_hit(
    ray: &Ray,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    material: u32,
    hit: &mut SurfaceHit,
) -> f32 {
    // Supporting plane normal; degenerate triangles have no area
    let n = (v1 - v0).cross(v2 - v0);
    let area = n.length();
    if area < 1e-12 {
        return NO_HIT;
    }

    let denom = ray.direction.dot(n);
    if denom.abs() < 1e-12 {
        return NO_HIT; // parallel to the supporting plane
    }

    let t = (v0 - ray.origin).dot(n) / denom;
    if t <= 0.0 {
        return NO_HIT;
    }

    // Inside test: sub-triangle areas against the hit point sum to the full
    // area exactly when the point lies inside
    let p = ray.at(t);
    let a0 = (v1 - p).cross(v2 - p).length();
    let a1 = (v2 - p).cross(v0 - p).length();
    let a2 = (v0 - p).cross(v1 - p).length();
    if (a0 + a1 + a2) / area > 1.0 + AREA_TOLERANCE {
        return NO_HIT;
    }

    hit.t = t;
    hit.point = p;
    hit.normal = n / area;
    hit.material = material;
    t
}
