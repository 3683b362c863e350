//! The compiled scene plan: a flat list of intersection instructions.
//!
//! Every operand is a baked literal. Matrices are the *inverse* of the
//! instance's accumulated transform (world ray into the shape's local frame)
//! and the normal matrix (inverse-transpose of the linear part, local normal
//! back to world). Mesh faces do not survive into the plan: they are
//! fan-triangulated into `Triangle` ops referencing a shared block of
//! transform-baked world-space vertex constants.

use glint_math::{Mat3, Mat4, Vec3};

/// Baked vertex constants for one mesh under one accumulated transform.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBlock {
    /// World-space vertex positions
    pub vertices: Vec<Vec3>,
}

/// One specialized intersection test.
///
/// Op order is scene traversal order; the evaluator folds with a strict `<`
/// comparison, so the first op encountered wins exact distance ties.
#[derive(Clone, Debug, PartialEq)]
pub enum IntersectOp {
    Plane {
        point: Vec3,
        normal: Vec3,
        inverse: Mat4,
        normal_mat: Mat3,
        material: u32,
    },
    Sphere {
        center: Vec3,
        radius: f32,
        inverse: Mat4,
        normal_mat: Mat3,
        material: u32,
    },
    Box {
        center: Vec3,
        size: Vec3,
        inverse: Mat4,
        normal_mat: Mat3,
        material: u32,
    },
    Cylinder {
        radius: f32,
        height: f32,
        inverse: Mat4,
        normal_mat: Mat3,
        material: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        inverse: Mat4,
        normal_mat: Mat3,
        material: u32,
    },
    /// One fan triangle of a mesh face, indexing into a [`MeshBlock`].
    Triangle {
        block: u32,
        indices: [u32; 3],
        material: u32,
    },
}

impl IntersectOp {
    /// The material index this op shades with.
    pub fn material(&self) -> u32 {
        match *self {
            IntersectOp::Plane { material, .. }
            | IntersectOp::Sphere { material, .. }
            | IntersectOp::Box { material, .. }
            | IntersectOp::Cylinder { material, .. }
            | IntersectOp::Cone { material, .. }
            | IntersectOp::Triangle { material, .. } => material,
        }
    }

    /// All scalar literals baked into this op, for link-time validation.
    fn literals(&self) -> Vec<f32> {
        let mut out = Vec::new();
        let mut push_mats = |inverse: &Mat4, normal_mat: &Mat3, out: &mut Vec<f32>| {
            out.extend_from_slice(&inverse.to_cols_array());
            out.extend_from_slice(&normal_mat.to_cols_array());
        };
        match self {
            IntersectOp::Plane {
                point,
                normal,
                inverse,
                normal_mat,
                ..
            } => {
                out.extend_from_slice(&point.to_array());
                out.extend_from_slice(&normal.to_array());
                push_mats(inverse, normal_mat, &mut out);
            }
            IntersectOp::Sphere {
                center,
                radius,
                inverse,
                normal_mat,
                ..
            } => {
                out.extend_from_slice(&center.to_array());
                out.push(*radius);
                push_mats(inverse, normal_mat, &mut out);
            }
            IntersectOp::Box {
                center,
                size,
                inverse,
                normal_mat,
                ..
            } => {
                out.extend_from_slice(&center.to_array());
                out.extend_from_slice(&size.to_array());
                push_mats(inverse, normal_mat, &mut out);
            }
            IntersectOp::Cylinder {
                radius,
                height,
                inverse,
                normal_mat,
                ..
            }
            | IntersectOp::Cone {
                radius,
                height,
                inverse,
                normal_mat,
                ..
            } => {
                out.push(*radius);
                out.push(*height);
                push_mats(inverse, normal_mat, &mut out);
            }
            IntersectOp::Triangle { .. } => {}
        }
        out
    }
}

/// The language-neutral compiled form of a whole scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenePlan {
    pub ops: Vec<IntersectOp>,
    pub mesh_blocks: Vec<MeshBlock>,
}

impl ScenePlan {
    /// Link-time validation: every baked literal must be finite.
    ///
    /// A singular accumulated transform (zero scale) bakes non-finite matrix
    /// entries; catching it here is the CPU analog of a GPU link failure.
    pub fn validate(&self) -> Result<(), String> {
        for (i, op) in self.ops.iter().enumerate() {
            if op.literals().iter().any(|v| !v.is_finite()) {
                return Err(format!("intersection op {i}"));
            }
        }
        for (i, block) in self.mesh_blocks.iter().enumerate() {
            if block
                .vertices
                .iter()
                .any(|v| !v.to_array().iter().all(|c| c.is_finite()))
            {
                return Err(format!("mesh block {i}"));
            }
        }
        Ok(())
    }
}
