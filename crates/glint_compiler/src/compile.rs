//! Depth-first scene traversal and plan construction.
//!
//! Traversal enters each node with the inherited accumulated transform,
//! composes the node's local transform onto it, emits one op per shape
//! instance (in declaration order), then recurses into the children. Sibling
//! and child op sequences concatenate in traversal order; order has no effect
//! on the nearest-hit result, only on emitted-source size.

use std::collections::HashMap;
use std::sync::Arc;

use glint_core::{Mesh, Scene, SceneNode, Shape, ShapeInstance, MAX_MATERIALS};
use glint_math::{Mat3, Mat4};
use log::{debug, error, warn};

use crate::{Backend, CompileError, IntersectOp, MeshBlock, ScenePlan};

/// A fully compiled scene: the plan plus the backend-rendered source text.
///
/// The plan is the executable form on the CPU; the source is what a GPU
/// collaborator would compile and link. A new `CompiledScene` wholly replaces
/// the previous one; nothing is patched incrementally.
#[derive(Clone, Debug)]
pub struct CompiledScene {
    pub plan: ScenePlan,
    pub source: String,
}

/// Mesh blocks are deduplicated by mesh identity (`Arc` pointer), not value,
/// and by the exact bit pattern of the accumulated transform.
type MeshKey = (usize, [u32; 16]);

struct Planner<'a> {
    scene: &'a Scene,
    plan: ScenePlan,
    baked_meshes: HashMap<MeshKey, u32>,
}

impl<'a> Planner<'a> {
    fn visit(&mut self, node: &SceneNode, inherited: Mat4) {
        let transform = inherited * node.transform;
        let inverse = transform.inverse();
        let normal_mat = Mat3::from_mat4(transform).inverse().transpose();

        for instance in &node.shapes {
            self.emit(instance, transform, inverse, normal_mat);
        }
        for child in &node.children {
            self.visit(child, transform);
        }
    }

    fn emit(&mut self, instance: &ShapeInstance, transform: Mat4, inverse: Mat4, normal_mat: Mat3) {
        let Some(material) = self.resolve_material(instance) else {
            return;
        };

        let op = match &instance.shape {
            Shape::Plane { point, normal } => IntersectOp::Plane {
                point: *point,
                normal: *normal,
                inverse,
                normal_mat,
                material,
            },
            Shape::Sphere { center, radius } => IntersectOp::Sphere {
                center: *center,
                radius: *radius,
                inverse,
                normal_mat,
                material,
            },
            Shape::Box { center, size } => IntersectOp::Box {
                center: *center,
                size: *size,
                inverse,
                normal_mat,
                material,
            },
            Shape::Cylinder { radius, height } => IntersectOp::Cylinder {
                radius: *radius,
                height: *height,
                inverse,
                normal_mat,
                material,
            },
            Shape::Cone { radius, height } => IntersectOp::Cone {
                radius: *radius,
                height: *height,
                inverse,
                normal_mat,
                material,
            },
            Shape::Mesh(mesh) => {
                self.emit_mesh(mesh, transform, material);
                return;
            }
        };
        self.plan.ops.push(op);
    }

    /// Bake a mesh's vertices under the accumulated transform (once per
    /// distinct mesh identity + transform) and emit one Triangle op per fan
    /// triangle of every face.
    fn emit_mesh(&mut self, mesh: &Arc<Mesh>, transform: Mat4, material: u32) {
        if mesh.positions.is_empty() || mesh.faces.is_empty() {
            warn!("mesh instance has no geometry, skipping");
            return;
        }

        let key = (
            Arc::as_ptr(mesh) as usize,
            transform.to_cols_array().map(f32::to_bits),
        );
        let block = match self.baked_meshes.get(&key) {
            Some(&b) => b,
            None => {
                let b = self.plan.mesh_blocks.len() as u32;
                self.plan.mesh_blocks.push(MeshBlock {
                    vertices: mesh
                        .positions
                        .iter()
                        .map(|&p| transform.transform_point3(p))
                        .collect(),
                });
                self.baked_meshes.insert(key, b);
                b
            }
        };

        let vertex_count = mesh.positions.len() as u32;
        for face in &mesh.faces {
            if face.len() < 3 {
                warn!("mesh face has fewer than 3 vertices, skipping face");
                continue;
            }
            if face.iter().any(|&i| i >= vertex_count) {
                warn!("mesh face references a missing vertex, skipping face");
                continue;
            }
            for indices in Mesh::fan_triangles(face) {
                self.plan.ops.push(IntersectOp::Triangle {
                    block,
                    indices,
                    material,
                });
            }
        }
    }

    /// Resolve an instance's material reference to a bindable index.
    ///
    /// Authoring errors degrade gracefully: the instance is skipped with a
    /// warning and traversal continues.
    fn resolve_material(&self, instance: &ShapeInstance) -> Option<u32> {
        match instance.material {
            None => {
                warn!("shape instance has no material, skipping");
                None
            }
            Some(i) if i >= self.scene.materials.len() => {
                warn!("material index {i} does not exist in the scene, skipping instance");
                None
            }
            Some(i) if i >= MAX_MATERIALS => {
                warn!(
                    "material index {i} is beyond the bound of {MAX_MATERIALS}, skipping instance"
                );
                None
            }
            Some(i) => Some(i as u32),
        }
    }
}

/// Walk the scene tree and produce its specialized plan.
pub fn plan_scene(scene: &Scene) -> ScenePlan {
    let mut planner = Planner {
        scene,
        plan: ScenePlan::default(),
        baked_meshes: HashMap::new(),
    };
    planner.visit(&scene.root, Mat4::IDENTITY);
    planner.plan
}

/// Compile a scene: plan it, render source through the backend, and link.
///
/// Linking validates every baked literal; a failure carries the generated
/// source for diagnosis and leaves the caller's previous program untouched.
pub fn compile<B: Backend>(scene: &Scene, backend: &B) -> Result<CompiledScene, CompileError> {
    let plan = plan_scene(scene);
    let source = backend.emit(&plan)?;

    if let Err(location) = plan.validate() {
        error!("scene '{}' failed to link: non-finite literal in {location}", scene.name);
        return Err(CompileError::NonFiniteLiteral {
            location,
            generated: source,
        });
    }

    debug!(
        "compiled scene '{}': {} ops, {} mesh blocks, {} bytes of source",
        scene.name,
        plan.ops.len(),
        plan.mesh_blocks.len(),
        source.len()
    );
    Ok(CompiledScene { plan, source })
}
