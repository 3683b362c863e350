//! Ray/cylinder intersection.
//!
//! The cylinder runs along local +Y from y=0 to y=height with caps at both
//! ends. The lateral quadratic and the two cap planes are tested separately;
//! the nearest valid candidate within the height bound wins.

use glint_math::{Mat3, Mat4, Ray, Vec3};

use super::{to_local, SurfaceHit, DEGENERATE, NO_HIT};

pub fn cylinder_hit(
    ray: &Ray,
    radius: f32,
    height: f32,
    inverse: Mat4,
    normal_mat: Mat3,
    material: u32,
    hit: &mut SurfaceHit,
) -> f32 {
    let (lo, ld) = to_local(ray, inverse);

    let mut best = NO_HIT;
    let mut best_normal = Vec3::Y;

    // Lateral surface: quadratic in the XZ projection
    let a = ld.x * ld.x + ld.z * ld.z;
    if a > 1e-12 {
        let half_b = lo.x * ld.x + lo.z * ld.z;
        let c = lo.x * lo.x + lo.z * lo.z - radius * radius;
        let disc = half_b * half_b - a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            let near = (-half_b - sq) / a;
            let far = (-half_b + sq) / a;
            // Each root gets its own height check
            for t in [near, far] {
                if t <= 0.0 {
                    continue;
                }
                let y = lo.y + ld.y * t;
                if (0.0..=height).contains(&y) {
                    let p = lo + ld * t;
                    best = t;
                    best_normal = Vec3::new(p.x, 0.0, p.z) / radius;
                    break;
                }
            }
        }
    }

    // Caps at y = 0 and y = height
    if ld.y.abs() > DEGENERATE {
        for (cap_y, n) in [(0.0, -Vec3::Y), (height, Vec3::Y)] {
            let t = (cap_y - lo.y) / ld.y;
            if t <= 0.0 || t >= best {
                continue;
            }
            let p = lo + ld * t;
            if p.x * p.x + p.z * p.z <= radius * radius {
                best = t;
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
    fn test_lateral_hit() {
        let ray = Ray::new(Vec3::new(5.0, 1.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let mut hit = SurfaceHit::default();
        let t = cylinder_hit(&ray, 1.0, 2.0, Mat4::IDENTITY, Mat3::IDENTITY, 0, &mut hit);
        assert!((t - 4.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_top_cap_hit() {
        let ray = Ray::new(Vec3::new(0.2, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut hit = SurfaceHit::default();
        let t = cylinder_hit(&ray, 1.0, 2.0, Mat4::IDENTITY, Mat3::IDENTITY, 0, &mut hit);
        assert!((t - 3.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_miss_above_height() {
        let ray = Ray::new(Vec3::new(5.0, 3.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let mut hit = SurfaceHit::default();
        assert_eq!(
            cylinder_hit(&ray, 1.0, 2.0, Mat4::IDENTITY, Mat3::IDENTITY, 0, &mut hit),
            NO_HIT
        );
    }

    #[test]
    fn test_axis_aligned_ray_hits_caps_only() {
        // Straight down the axis: the lateral quadratic degenerates (a = 0)
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut hit = SurfaceHit::default();
        let t = cylinder_hit(&ray, 1.0, 2.0, Mat4::IDENTITY, Mat3::IDENTITY, 0, &mut hit);
        assert!((t - 3.0).abs() < 1e-4);
    }
}
