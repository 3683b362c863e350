//! Phong material definition.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// A Phong material.
///
/// Materials live in the scene's ordered table; their position in that table
/// is the runtime index baked into the compiled plan. Shading never looks a
/// material up by name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Material {
    /// Material name (authoring-side only, never used at evaluation time)
    pub name: String,

    /// Diffuse reflectance (RGB, 0-1)
    pub diffuse: Vec3,

    /// Specular reflectance (RGB, 0-1); also the per-bounce reflection weight
    pub specular: Vec3,

    /// Ambient reflectance (RGB, 0-1)
    pub ambient: Vec3,

    /// Phong shininess exponent
    pub shininess: f32,

    /// Index of refraction (reserved for transmission; carried, not yet shaded)
    pub ior: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse: Vec3::new(0.5, 0.5, 0.5), // Grey default
            specular: Vec3::ZERO,
            ambient: Vec3::new(0.05, 0.05, 0.05),
            shininess: 32.0,
            ior: 1.0,
        }
    }
}

impl Material {
    /// Create a new material with just a name and diffuse color.
    pub fn new(name: impl Into<String>, diffuse: Vec3) -> Self {
        Self {
            name: name.into(),
            diffuse,
            ..Default::default()
        }
    }

    /// Set the specular reflectance and shininess.
    pub fn with_specular(mut self, specular: Vec3, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    /// Set the ambient reflectance.
    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    /// Check if this material reflects anything into secondary bounces.
    pub fn is_reflective(&self) -> bool {
        self.specular.length_squared() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_reflective() {
        assert!(!Material::default().is_reflective());
    }

    #[test]
    fn test_builder() {
        let m = Material::new("mirror", Vec3::splat(0.1))
            .with_specular(Vec3::splat(0.9), 128.0);
        assert!(m.is_reflective());
        assert_eq!(m.shininess, 128.0);
    }
}
