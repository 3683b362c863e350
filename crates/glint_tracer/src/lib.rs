//! Glint Tracer - CPU execution of specialized scene plans.
//!
//! Executes the flat intersection plan produced by `glint_compiler` against
//! per-pixel rays, shades hits with a multi-light Phong model (attenuation,
//! spot cones, jittered soft shadows), follows mirror reflections with an
//! explicit bounded-depth loop, and drives the per-frame loop: recompile on
//! scene edit, rebind on value edit, continuous redraw while the camera
//! walks.
//!
//! Per-pixel traces are self-contained, so frames render in parallel across
//! row tiles with rayon; the compiled plan and the bound uniform state are
//! read-only for the duration of a frame.

pub mod driver;
pub mod exec;
pub mod intersect;
pub mod renderer;
pub mod shading;

pub use driver::FrameDriver;
pub use exec::intersect_scene;
pub use intersect::{SurfaceHit, NO_HIT};
pub use renderer::{render, render_pixel, trace, ImageBuffer, RenderConfig};
pub use shading::{FrameBindings, LightData, MaterialData};

/// Re-export math types used throughout the public API.
pub use glint_math::{Ray, Vec3};
