//! Point and spot light definitions.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// Cone restriction turning a point light into a spotlight.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SpotCone {
    /// Direction the light faces (need not be unit length)
    pub direction: Vec3,
    /// Half-angle of the cone in radians
    pub half_angle: f32,
}

/// A point light with distance attenuation and an optional spot cone.
///
/// Lights use the same indexing discipline as materials: position in the
/// scene's table is the runtime index, and only the first `MAX_LIGHTS`
/// entries are visible to shading.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,

    /// Light color / intensity (RGB)
    pub color: Vec3,

    /// Attenuation coefficients (constant, linear, quadratic); the light's
    /// contribution is divided by `c + l*d + q*d^2` at distance `d`.
    pub attenuation: Vec3,

    /// Optional cone restriction; `None` means omnidirectional.
    pub cone: Option<SpotCone>,
}

impl Light {
    /// Create an unattenuated omnidirectional point light.
    pub fn point(position: Vec3, color: Vec3) -> Self {
        Self {
            position,
            color,
            attenuation: Vec3::new(1.0, 0.0, 0.0),
            cone: None,
        }
    }

    /// Restrict the light to a cone.
    pub fn with_cone(mut self, direction: Vec3, half_angle: f32) -> Self {
        self.cone = Some(SpotCone {
            direction,
            half_angle,
        });
        self
    }

    /// Set the attenuation coefficients (constant, linear, quadratic).
    pub fn with_attenuation(mut self, attenuation: Vec3) -> Self {
        self.attenuation = attenuation;
        self
    }
}
