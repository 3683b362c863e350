//! Ray/box intersection.
//!
//! The box is axis-aligned in its local frame: each of the six bounding
//! planes is tested, a candidate is accepted only when the hit point falls
//! within the box's extent on the other two axes, and the closest accepted
//! candidate wins. The normal is the face axis.

use glint_math::{Mat3, Mat4, Ray, Vec3};

use super::{to_local, SurfaceHit, DEGENERATE, NO_HIT};

/// Intersect a ray with a box around `center` with full extents `size`.
pub fn box_hit(
    ray: &Ray,
    center: Vec3,
    size: Vec3,
    inverse: Mat4,
    normal_mat: Mat3,
    material: u32,
    hit: &mut SurfaceHit,
) -> f32 {
    let (lo, ld) = to_local(ray, inverse);
    let o = lo - center;
    let half = size * 0.5;

    let mut best = NO_HIT;
    let mut best_normal = Vec3::Y;

    for axis in 0..3 {
        if ld[axis].abs() < DEGENERATE {
            continue; // parallel to this face pair
        }
        for sign in [-1.0f32, 1.0] {
            let t = (sign * half[axis] - o[axis]) / ld[axis];
            if t <= 0.0 || t >= best {
                continue;
            }
            let p = o + ld * t;
            let u = (axis + 1) % 3;
            let v = (axis + 2) % 3;
            if p[u].abs() <= half[u] && p[v].abs() <= half[v] {
                best = t;
                let mut n = Vec3::ZERO;
                n[axis] = sign;
                best_normal = n;
            }
        }
    }

    if best < NO_HIT {
        hit.t = best;
        hit.point = ray.at(best);
        hit.normal = (normal_mat * best_normal).normalize();
        hit.material = material;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_box_head_on() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut hit = SurfaceHit::default();
        let t = box_hit(
            &ray,
            Vec3::ZERO,
            Vec3::ONE,
            Mat4::IDENTITY,
            Mat3::IDENTITY,
            1,
            &mut hit,
        );
        assert!((t - 4.5).abs() < 1e-4);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_miss_past_edge() {
        let ray = Ray::new(Vec3::new(0.7, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut hit = SurfaceHit::default();
        assert_eq!(
            box_hit(&ray, Vec3::ZERO, Vec3::ONE, Mat4::IDENTITY, Mat3::IDENTITY, 0, &mut hit),
            NO_HIT
        );
    }

    #[test]
    fn test_offset_center() {
        let ray = Ray::new(Vec3::new(3.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut hit = SurfaceHit::default();
        let t = box_hit(
            &ray,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::splat(2.0),
            Mat4::IDENTITY,
            Mat3::IDENTITY,
            0,
            &mut hit,
        );
        assert!((t - 9.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_ray_parallel_to_faces_inside_slab() {
        // Travels parallel to X faces but outside the box
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::X);
        let mut hit = SurfaceHit::default();
        assert_eq!(
            box_hit(&ray, Vec3::ZERO, Vec3::ONE, Mat4::IDENTITY, Mat3::IDENTITY, 0, &mut hit),
            NO_HIT
        );
    }
}
