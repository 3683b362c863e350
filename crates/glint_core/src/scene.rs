//! Scene graph types for glint.
//!
//! A scene is a tree of nodes, each owning a local 4x4 affine transform, some
//! shape instances, and child nodes. The effective transform of a node is the
//! product of all ancestor transforms with its own, applied root-to-leaf.
//! Trees are constructed wholesale when a scene is (re)loaded and replaced
//! wholesale on reload; there is no partial mutation protocol.

use std::sync::Arc;

use glint_math::{Mat4, Vec3};

use crate::{Light, Material, Mesh};

/// An analytic or mesh shape, parameterized in the owning node's local frame.
#[derive(Clone, Debug)]
pub enum Shape {
    /// Infinite plane through `point` with the given (not necessarily unit) normal.
    Plane { point: Vec3, normal: Vec3 },
    /// Sphere of `radius` around `center`.
    Sphere { center: Vec3, radius: f32 },
    /// Axis-aligned box around `center` with full extents `size`.
    Box { center: Vec3, size: Vec3 },
    /// Cylinder along +Y from y=0 to y=height, capped at both ends.
    Cylinder { radius: f32, height: f32 },
    /// Cone along +Y with base radius at y=0 and apex at y=height, capped base.
    Cone { radius: f32, height: f32 },
    /// Shared polygonal mesh, fan-triangulated at compile time.
    Mesh(Arc<Mesh>),
}

/// One shape attached to a scene node, bound to a material by index.
///
/// Many instances may share one material. An instance whose material is
/// missing or out of range is an authoring error: the compiler logs a warning
/// and skips it, it never crashes.
#[derive(Clone, Debug)]
pub struct ShapeInstance {
    pub shape: Shape,
    /// Index into the scene's material table.
    pub material: Option<usize>,
}

impl ShapeInstance {
    pub fn new(shape: Shape, material: usize) -> Self {
        Self {
            shape,
            material: Some(material),
        }
    }
}

/// A node in the scene tree.
#[derive(Clone, Debug, Default)]
pub struct SceneNode {
    /// Local transform, composed onto the inherited one root-to-leaf.
    pub transform: Mat4,
    pub shapes: Vec<ShapeInstance>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create an empty node with the given local transform.
    pub fn new(transform: Mat4) -> Self {
        Self {
            transform,
            shapes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attach a shape instance to this node.
    pub fn with_shape(mut self, shape: Shape, material: usize) -> Self {
        self.shapes.push(ShapeInstance::new(shape, material));
        self
    }

    /// Attach a child node.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Count shape instances in this subtree.
    pub fn instance_count(&self) -> usize {
        self.shapes.len()
            + self
                .children
                .iter()
                .map(SceneNode::instance_count)
                .sum::<usize>()
    }
}

/// A complete scene: node tree plus the material and light tables.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub root: SceneNode,

    /// Ordered material table; position is the runtime material index.
    pub materials: Vec<Material>,

    /// Ordered light table, truncated to `MAX_LIGHTS` at bind time.
    pub lights: Vec<Light>,

    /// Scene name (usually from the source file)
    pub name: String,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a material to the table and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        let id = self.materials.len();
        self.materials.push(material);
        id
    }

    /// Add a light to the table and return its index.
    pub fn add_light(&mut self, light: Light) -> usize {
        let id = self.lights.len();
        self.lights.push(light);
        id
    }

    /// Get a material by index.
    pub fn material(&self, id: usize) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Total shape instance count across the tree.
    pub fn instance_count(&self) -> usize {
        self.root.instance_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Quat;

    #[test]
    fn test_scene_creation() {
        let mut scene = Scene::new("test");
        let grey = scene.add_material(Material::default());

        scene.root = SceneNode::new(Mat4::IDENTITY)
            .with_shape(
                Shape::Sphere {
                    center: Vec3::ZERO,
                    radius: 1.0,
                },
                grey,
            )
            .with_child(SceneNode::new(Mat4::from_translation(Vec3::X)).with_shape(
                Shape::Box {
                    center: Vec3::ZERO,
                    size: Vec3::ONE,
                },
                grey,
            ));

        assert_eq!(scene.instance_count(), 2);
        assert_eq!(scene.materials.len(), 1);
    }

    #[test]
    fn test_nested_transform_composition() {
        // Effective transform applies root-to-leaf: parent * child
        let parent = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let child = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let effective = parent * child;

        let p = effective.transform_point3(Vec3::Z);
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }
}
