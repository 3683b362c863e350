//! Execution of a compiled scene plan against a single ray.
//!
//! This is the CPU form of the specialized "intersect everything" routine:
//! every op in the plan is evaluated in traversal order and folded with a
//! strict `<` comparison, so the first op emitted at a given distance wins
//! exact ties deterministically.

use glint_compiler::{IntersectOp, ScenePlan};
use glint_math::Ray;
use log::warn;

use crate::intersect::{
    box_hit, cone_hit, cylinder_hit, plane_hit, sphere_hit, triangle_hit, SurfaceHit, NO_HIT,
};

/// Find the nearest intersection of `ray` with the whole compiled scene.
///
/// Returns the nearest strictly-positive `t`, or [`NO_HIT`]; `hit` holds the
/// surface data of the winning candidate when the return value is finite.
pub fn intersect_scene(plan: &ScenePlan, ray: &Ray, hit: &mut SurfaceHit) -> f32 {
    let mut best = NO_HIT;
    let mut cand = SurfaceHit::default();

    for op in &plan.ops {
        let t = match *op {
            IntersectOp::Plane {
                point,
                normal,
                inverse,
                normal_mat,
                material,
            } => plane_hit(ray, point, normal, inverse, normal_mat, material, &mut cand),
            IntersectOp::Sphere {
                center,
                radius,
                inverse,
                normal_mat,
                material,
            } => sphere_hit(ray, center, radius, inverse, normal_mat, material, &mut cand),
            IntersectOp::Box {
                center,
                size,
                inverse,
                normal_mat,
                material,
            } => box_hit(ray, center, size, inverse, normal_mat, material, &mut cand),
            IntersectOp::Cylinder {
                radius,
                height,
                inverse,
                normal_mat,
                material,
            } => cylinder_hit(ray, radius, height, inverse, normal_mat, material, &mut cand),
            IntersectOp::Cone {
                radius,
                height,
                inverse,
                normal_mat,
                material,
            } => cone_hit(ray, radius, height, inverse, normal_mat, material, &mut cand),
            IntersectOp::Triangle {
                block,
                indices,
                material,
            } => {
                // Compiler-produced plans always resolve; a hand-built plan
                // with dangling references is an authoring error, not a panic
                let verts = plan.mesh_blocks.get(block as usize).map(|b| {
                    indices.map(|i| b.vertices.get(i as usize).copied())
                });
                match verts {
                    Some([Some(v0), Some(v1), Some(v2)]) => {
                        triangle_hit(ray, v0, v1, v2, material, &mut cand)
                    }
                    _ => {
                        warn!("triangle op references a missing mesh block or vertex, skipping");
                        NO_HIT
                    }
                }
            }
        };

        // Strict comparison: ties keep the earlier candidate
        if t < best {
            best = t;
            *hit = cand;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::{Mat3, Mat4, Vec3};

    fn sphere_op(center: Vec3, radius: f32, material: u32) -> IntersectOp {
        IntersectOp::Sphere {
            center,
            radius,
            inverse: Mat4::IDENTITY,
            normal_mat: Mat3::IDENTITY,
            material,
        }
    }

    #[test]
    fn test_nearest_of_two_wins() {
        let plan = ScenePlan {
            ops: vec![
                sphere_op(Vec3::new(0.0, 0.0, -5.0), 1.0, 0),
                sphere_op(Vec3::new(0.0, 0.0, -2.0), 1.0, 1),
            ],
            mesh_blocks: Vec::new(),
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut hit = SurfaceHit::default();
        let t = intersect_scene(&plan, &ray, &mut hit);
        assert!((t - 1.0).abs() < 1e-4);
        assert_eq!(hit.material, 1);
    }

    #[test]
    fn test_coincident_primitives_tie_break_to_first() {
        // Two identical spheres with different materials: the first emitted
        // op must win, consistently
        let plan = ScenePlan {
            ops: vec![
                sphere_op(Vec3::new(0.0, 0.0, -3.0), 1.0, 7),
                sphere_op(Vec3::new(0.0, 0.0, -3.0), 1.0, 2),
            ],
            mesh_blocks: Vec::new(),
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        for _ in 0..3 {
            let mut hit = SurfaceHit::default();
            let t = intersect_scene(&plan, &ray, &mut hit);
            assert!(t < NO_HIT);
            assert_eq!(hit.material, 7);
        }
    }

    #[test]
    fn test_empty_plan_misses() {
        let plan = ScenePlan::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut hit = SurfaceHit::default();
        assert_eq!(intersect_scene(&plan, &ray, &mut hit), NO_HIT);
    }

    #[test]
    fn test_triangle_op_reads_mesh_block() {
        use glint_compiler::MeshBlock;
        let plan = ScenePlan {
            ops: vec![IntersectOp::Triangle {
                block: 0,
                indices: [0, 1, 2],
                material: 3,
            }],
            mesh_blocks: vec![MeshBlock {
                vertices: vec![
                    Vec3::new(-1.0, -1.0, -2.0),
                    Vec3::new(1.0, -1.0, -2.0),
                    Vec3::new(0.0, 1.0, -2.0),
                ],
            }],
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -0.2, -1.0).normalize());
        let mut hit = SurfaceHit::default();
        let t = intersect_scene(&plan, &ray, &mut hit);
        assert!(t < NO_HIT);
        assert_eq!(hit.material, 3);
    }

    #[test]
    fn test_dangling_triangle_references_miss() {
        use glint_compiler::MeshBlock;
        // Hand-built plans can break the block/vertex invariants; both
        // kinds of dangling reference must degrade to a miss
        let plan = ScenePlan {
            ops: vec![
                IntersectOp::Triangle {
                    block: 5,
                    indices: [0, 1, 2],
                    material: 0,
                },
                IntersectOp::Triangle {
                    block: 0,
                    indices: [0, 1, 9],
                    material: 0,
                },
            ],
            mesh_blocks: vec![MeshBlock {
                vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            }],
        };
        let ray = Ray::new(Vec3::new(0.2, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut hit = SurfaceHit::default();
        assert_eq!(intersect_scene(&plan, &ray, &mut hit), NO_HIT);
    }
}
