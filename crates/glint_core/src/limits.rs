//! Fixed capacities for the shading stage.
//!
//! These mirror GPU uniform-binding limits: the evaluator sees at most this
//! many lights and materials, as fixed-size arrays. Scenes may declare more;
//! entries past the bound are silently truncated at bind time. That is a
//! documented contract, not an error, and it is preserved even when the plan
//! is executed on the CPU.

/// Maximum number of lights visible to the shading stage.
pub const MAX_LIGHTS: usize = 8;

/// Maximum number of materials visible to the shading stage.
pub const MAX_MATERIALS: usize = 16;
