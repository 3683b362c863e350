//! Glint Core - scene description for the specializing ray tracer.
//!
//! This crate provides:
//!
//! - **Scene graph types**: `Scene`, `SceneNode`, `ShapeInstance`, `Mesh`
//! - **Shading tables**: `Material`, `Light`, indexed by position
//! - **Camera**: per-pixel ray generation and walk integration
//!
//! The scene tree is a pure description: an external loader builds it, the
//! compiler in `glint_compiler` walks it and bakes it into a flat plan.
//! Materials and lights live in bounded ordered tables; their position in
//! the table is the integer index shading code uses at evaluation time.

pub mod camera;
pub mod light;
pub mod limits;
pub mod material;
pub mod mesh;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, WalkAxes};
pub use light::{Light, SpotCone};
pub use limits::{MAX_LIGHTS, MAX_MATERIALS};
pub use material::Material;
pub use mesh::Mesh;
pub use scene::{Scene, SceneNode, Shape, ShapeInstance};
