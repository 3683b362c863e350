//! Ray/cone intersection.
//!
//! The cone stands on local y=0 with base `radius`, tapering to an apex at
//! y=height. Lateral quadratic plus the base cap plane; nearest valid hit
//! within the height bound wins.

use glint_math::{Mat3, Mat4, Ray, Vec3};

use super::{to_local, SurfaceHit, DEGENERATE, NO_HIT};

pub fn cone_hit(
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

    // Lateral surface: x^2 + z^2 = k^2 (height - y)^2
    let k = radius / height;
    let oy = lo.y - height;
    let a = ld.x * ld.x + ld.z * ld.z - k * k * ld.y * ld.y;
    if a.abs() > 1e-12 {
        let half_b = lo.x * ld.x + lo.z * ld.z - k * k * oy * ld.y;
        let c = lo.x * lo.x + lo.z * lo.z - k * k * oy * oy;
        let disc = half_b * half_b - a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            // `a` can be negative here, so order the roots explicitly
            let r0 = (-half_b - sq) / a;
            let r1 = (-half_b + sq) / a;
            let (near, far) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };
            // Each root gets its own height check: the near one may lie on
            // the mirror nappe above the apex while the far one is real
            for t in [near, far] {
                if t <= 0.0 {
                    continue;
                }
                let y = lo.y + ld.y * t;
                if (0.0..=height).contains(&y) {
                    let p = lo + ld * t;
                    let lateral = (p.x * p.x + p.z * p.z).sqrt();
                    best = t;
                    // The surface normal degenerates at the apex itself
                    best_normal = if lateral > DEGENERATE {
                        Vec3::new(p.x, k * lateral, p.z)
                    } else {
                        Vec3::Y
                    };
                    break;
                }
            }
        }
    }

    // Base cap at y = 0
    if ld.y.abs() > DEGENERATE {
        let t = -lo.y / ld.y;
        if t > 0.0 && t < best {
            let p = lo + ld * t;
            if p.x * p.x + p.z * p.z <= radius * radius {
                best = t;
                best_normal = -Vec3::Y;
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
