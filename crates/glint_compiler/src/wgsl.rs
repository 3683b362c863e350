//! Backend trait and the WGSL source emitter.
//!
//! The plan is language-neutral; a backend renders it into a target shading
//! language. The WGSL backend substitutes generated code into two fixed
//! placeholders of a base template: module-scope mesh vertex constants and
//! the body of the specialized `scene_intersect` routine. Emission is purely
//! textual and deterministic: the same plan always yields byte-identical
//! source.

use std::fmt::Write;

use glint_math::{Mat3, Mat4, Vec3};

use crate::{CompileError, IntersectOp, ScenePlan};

/// Renders a [`ScenePlan`] into target-language source text.
pub trait Backend {
    fn emit(&self, plan: &ScenePlan) -> Result<String, CompileError>;
}

const MESH_PLACEHOLDER: &str = "//@@MESH_CONSTANTS@@";
const OPS_PLACEHOLDER: &str = "//@@SCENE_OPS@@";

/// The built-in WGSL backend.
pub struct WgslBackend {
    template: String,
}

impl Default for WgslBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WgslBackend {
    /// Backend over the built-in shading template.
    pub fn new() -> Self {
        Self {
            template: include_str!("template.wgsl").to_string(),
        }
    }

    /// Backend over a caller-supplied template (same placeholders required).
    pub fn with_template(template: String) -> Self {
        Self { template }
    }

    fn emit_mesh_constants(plan: &ScenePlan) -> String {
        let mut out = String::new();
        for (i, block) in plan.mesh_blocks.iter().enumerate() {
            let _ = write!(
                out,
                "const mesh{i} = array<vec3<f32>, {}>(",
                block.vertices.len()
            );
            for (j, v) in block.vertices.iter().enumerate() {
                if j > 0 {
                    out.push_str(", ");
                }
                out.push_str(&vec3(*v));
            }
            out.push_str(");\n");
        }
        out
    }

    fn emit_op(op: &IntersectOp) -> String {
        match op {
            IntersectOp::Plane {
                point,
                normal,
                inverse,
                normal_mat,
                material,
            } => format!(
                "    cand = plane_hit(origin, dir, {}, {}, {}, {}, {material}u);\n",
                vec3(*point),
                vec3(*normal),
                mat4(*inverse),
                mat3(*normal_mat)
            ),
            IntersectOp::Sphere {
                center,
                radius,
                inverse,
                normal_mat,
                material,
            } => format!(
                "    cand = sphere_hit(origin, dir, {}, {}, {}, {}, {material}u);\n",
                vec3(*center),
                lit(*radius),
                mat4(*inverse),
                mat3(*normal_mat)
            ),
            IntersectOp::Box {
                center,
                size,
                inverse,
                normal_mat,
                material,
            } => format!(
                "    cand = box_hit(origin, dir, {}, {}, {}, {}, {material}u);\n",
                vec3(*center),
                vec3(*size),
                mat4(*inverse),
                mat3(*normal_mat)
            ),
            IntersectOp::Cylinder {
                radius,
                height,
                inverse,
                normal_mat,
                material,
            } => format!(
                "    cand = cylinder_hit(origin, dir, {}, {}, {}, {}, {material}u);\n",
                lit(*radius),
                lit(*height),
                mat4(*inverse),
                mat3(*normal_mat)
            ),
            IntersectOp::Cone {
                radius,
                height,
                inverse,
                normal_mat,
                material,
            } => format!(
                "    cand = cone_hit(origin, dir, {}, {}, {}, {}, {material}u);\n",
                lit(*radius),
                lit(*height),
                mat4(*inverse),
                mat3(*normal_mat)
            ),
            IntersectOp::Triangle {
                block,
                indices,
                material,
            } => format!(
                "    cand = triangle_hit(origin, dir, mesh{block}[{}u], mesh{block}[{}u], mesh{block}[{}u], {material}u);\n",
                indices[0], indices[1], indices[2]
            ),
        }
    }
}

impl Backend for WgslBackend {
    fn emit(&self, plan: &ScenePlan) -> Result<String, CompileError> {
        if !self.template.contains(MESH_PLACEHOLDER) {
            return Err(CompileError::MissingPlaceholder(MESH_PLACEHOLDER));
        }
        if !self.template.contains(OPS_PLACEHOLDER) {
            return Err(CompileError::MissingPlaceholder(OPS_PLACEHOLDER));
        }

        let mut ops = String::new();
        for op in &plan.ops {
            ops.push_str(&Self::emit_op(op));
            // Strict comparison: the first op at a given distance keeps the hit
            ops.push_str("    if (cand.t < best.t) { best = cand; }\n");
        }

        Ok(self
            .template
            .replacen(MESH_PLACEHOLDER, &Self::emit_mesh_constants(plan), 1)
            .replacen(OPS_PLACEHOLDER, ops.trim_end(), 1))
    }
}

/// Shortest-roundtrip float literal; WGSL accepts the same decimal and
/// exponent forms Rust's `{:?}` produces for finite values.
fn lit(v: f32) -> String {
    format!("{v:?}")
}

fn vec3(v: Vec3) -> String {
    format!("vec3<f32>({}, {}, {})", lit(v.x), lit(v.y), lit(v.z))
}

fn mat4(m: Mat4) -> String {
    let c = m.to_cols_array();
    let body: Vec<String> = c.iter().map(|&v| lit(v)).collect();
    format!("mat4x4<f32>({})", body.join(", "))
}

fn mat3(m: Mat3) -> String {
    let c = m.to_cols_array();
    let body: Vec<String> = c.iter().map(|&v| lit(v)).collect();
    format!("mat3x3<f32>({})", body.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeshBlock;

    fn sphere_plan() -> ScenePlan {
        ScenePlan {
            ops: vec![IntersectOp::Sphere {
                center: Vec3::new(0.0, 1.0, 0.0),
                radius: 0.5,
                inverse: Mat4::IDENTITY,
                normal_mat: Mat3::IDENTITY,
                material: 2,
            }],
            mesh_blocks: Vec::new(),
        }
    }

    #[test]
    fn test_emission_is_deterministic() {
        let backend = WgslBackend::new();
        let plan = sphere_plan();
        let a = backend.emit(&plan).unwrap();
        let b = backend.emit(&plan).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sphere_call_baked_with_literals() {
        let source = WgslBackend::new().emit(&sphere_plan()).unwrap();
        assert!(source.contains("sphere_hit(origin, dir, vec3<f32>(0.0, 1.0, 0.0), 0.5"));
        assert!(source.contains("2u);"));
        assert!(!source.contains(OPS_PLACEHOLDER));
    }

    #[test]
    fn test_mesh_constants_emitted_once() {
        let plan = ScenePlan {
            ops: vec![
                IntersectOp::Triangle {
                    block: 0,
                    indices: [0, 1, 2],
                    material: 0,
                },
                IntersectOp::Triangle {
                    block: 0,
                    indices: [0, 2, 3],
                    material: 0,
                },
            ],
            mesh_blocks: vec![MeshBlock {
                vertices: vec![Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y],
            }],
        };
        let source = WgslBackend::new().emit(&plan).unwrap();
        assert_eq!(source.matches("const mesh0 = array<vec3<f32>, 4>").count(), 1);
        assert_eq!(source.matches("triangle_hit(origin, dir, mesh0[").count(), 2);
    }

    #[test]
    fn test_attenuation_denominator_clamped() {
        // All-zero attenuation coefficients must not divide by zero
        let source = WgslBackend::new().emit(&ScenePlan::default()).unwrap();
        assert!(source.contains("max(att.x + att.y * dist + att.z * dist * dist, 1e-6)"));
    }

    #[test]
    fn test_missing_placeholder_is_an_error() {
        let backend = WgslBackend::with_template("fn scene_intersect() {}".to_string());
        let err = backend.emit(&ScenePlan::default()).unwrap_err();
        assert!(matches!(err, CompileError::MissingPlaceholder(_)));
    }
}
