//! Ray/sphere intersection.

use glint_math::{Mat3, Mat4, Ray, Vec3};

use super::{to_local, SurfaceHit, NO_HIT};

/// Intersect a ray with a sphere of `radius` around `center` (local frame).
///
/// Solves `|P0 + tV - C|^2 = r^2` in the shape's local frame, takes the
/// smaller positive root, and maps the local normal back through the normal
/// matrix.
pub fn sphere_hit(
    ray: &Ray,
    center: Vec3,
    radius: f32,
    inverse: Mat4,
    normal_mat: Mat3,
    material: u32,
    hit: &mut SurfaceHit,
) -> f32 {
    let (lo, ld) = to_local(ray, inverse);
    let oc = lo - center;

    let a = ld.length_squared();
    if a < 1e-12 {
        return NO_HIT; // zero-length direction
    }
    let half_b = oc.dot(ld);
    let c = oc.length_squared() - radius * radius;

    let disc = half_b * half_b - a * c;
    if disc < 0.0 {
        return NO_HIT;
    }

    // Smaller positive root wins; a tangent ray has one double root
    let sq = disc.sqrt();
    let mut t = (-half_b - sq) / a;
    if t <= 0.0 {
        t = (-half_b + sq) / a;
        if t <= 0.0 {
            return NO_HIT;
        }
    }

    let local_n = (oc + ld * t) / radius;
    hit.t = t;
    hit.point = ray.at(t);
    hit.normal = (normal_mat * local_n).normalize();
    hit.material = material;
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_sphere_head_on() {
        // r=1 at origin, ray from (0,0,5) toward -Z
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut hit = SurfaceHit::default();
        let t = sphere_hit(
            &ray,
            Vec3::ZERO,
            1.0,
            Mat4::IDENTITY,
            Mat3::IDENTITY,
            3,
            &mut hit,
        );
        assert!((t - 4.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
        assert_eq!(hit.material, 3);
    }

    #[test]
    fn test_tangent_ray_no_nan() {
        // Line at distance exactly r from the center: double root, no NaN
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
        let mut hit = SurfaceHit::default();
        let t = sphere_hit(
            &ray,
            Vec3::ZERO,
            1.0,
            Mat4::IDENTITY,
            Mat3::IDENTITY,
            0,
            &mut hit,
        );
        assert!(t.is_finite());
        if t < NO_HIT {
            assert!((t - 5.0).abs() < 1e-3);
            assert!(hit.normal.is_finite());
        }
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        let mut hit = SurfaceHit::default();
        assert_eq!(
            sphere_hit(&ray, Vec3::ZERO, 1.0, Mat4::IDENTITY, Mat3::IDENTITY, 0, &mut hit),
            NO_HIT
        );
    }

    #[test]
    fn test_ray_from_inside_hits_far_wall() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut hit = SurfaceHit::default();
        let t = sphere_hit(
            &ray,
            Vec3::ZERO,
            1.0,
            Mat4::IDENTITY,
            Mat3::IDENTITY,
            0,
            &mut hit,
        );
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scaled_sphere_normal_renormalized() {
        // Non-uniform scale: the normal matrix output must be re-normalized
        let m = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let inverse = m.inverse();
        let normal_mat = Mat3::from_mat4(m).inverse().transpose();

        let ray = Ray::new(Vec3::new(5.0, 0.3, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let mut hit = SurfaceHit::default();
        let t = sphere_hit(&ray, Vec3::ZERO, 1.0, inverse, normal_mat, 0, &mut hit);
        assert!(t < NO_HIT);
        assert!((hit.normal.length() - 1.0).abs() < 1e-5);
    }
}
