//! Glint Compiler - scene specialization.
//!
//! Walks the hierarchical scene description once per scene edit, accumulates
//! object-to-world transforms, and bakes every shape instance into a flat
//! plan of intersection instructions with literal operands: geometry
//! parameters, material index, inverse transform and normal matrix. The plan
//! is language-neutral; the CPU evaluator in `glint_tracer` executes it
//! directly, and a [`Backend`] renders it into shading-language source text
//! (WGSL here) for a GPU target.
//!
//! Compilation is triggered only by scene-content change, never per frame.
//! Camera, light and material *value* edits rebind uniforms without touching
//! the plan.

mod compile;
mod error;
mod plan;
mod wgsl;

pub use compile::{compile, plan_scene, CompiledScene};
pub use error::CompileError;
pub use plan::{IntersectOp, MeshBlock, ScenePlan};
pub use wgsl::{Backend, WgslBackend};
