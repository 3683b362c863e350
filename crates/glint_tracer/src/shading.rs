//! Illumination evaluator: Phong shading, soft shadows, uniform bindings.
//!
//! Lights and materials reach the shading stage as fixed-capacity Pod
//! arrays, mirroring GPU uniform binding: at most [`MAX_LIGHTS`] /
//! [`MAX_MATERIALS`] entries are visible and anything beyond the bound is
//! silently truncated. That contract is deliberate and preserved on the CPU.

use bytemuck::{Pod, Zeroable};
use glint_core::{Light, Material, Scene, MAX_LIGHTS, MAX_MATERIALS};
use glint_math::{Ray, Vec3};
use glint_compiler::ScenePlan;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::exec::intersect_scene;
use crate::intersect::SurfaceHit;
use crate::renderer::RenderConfig;

/// Cone sentinel: any cosine below -1 disables the spot restriction.
const NO_CONE: f32 = -2.0;

/// One light as bound for shading. `w` lanes carry the scalar extras so the
/// layout stays 16-byte aligned for GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightData {
    position: [f32; 4],
    color: [f32; 4],
    /// constant, linear, quadratic; w unused
    attenuation: [f32; 4],
    /// xyz = facing direction, w = cos(half angle) or NO_CONE
    cone: [f32; 4],
}

impl LightData {
    pub fn position(&self) -> Vec3 {
        Vec3::from_slice(&self.position[..3])
    }

    pub fn color(&self) -> Vec3 {
        Vec3::from_slice(&self.color[..3])
    }

    pub fn attenuation(&self) -> Vec3 {
        Vec3::from_slice(&self.attenuation[..3])
    }

    /// Spot restriction as (facing direction, cos of half angle), if any.
    pub fn cone(&self) -> Option<(Vec3, f32)> {
        if self.cone[3] < -1.0 {
            None
        } else {
            Some((Vec3::from_slice(&self.cone[..3]), self.cone[3]))
        }
    }
}

impl From<&Light> for LightData {
    fn from(light: &Light) -> Self {
        let (dir, cos) = match light.cone {
            Some(c) => (c.direction, c.half_angle.cos()),
            None => (Vec3::ZERO, NO_CONE),
        };
        Self {
            position: light.position.extend(0.0).to_array(),
            color: light.color.extend(0.0).to_array(),
            attenuation: light.attenuation.extend(0.0).to_array(),
            cone: dir.extend(cos).to_array(),
        }
    }
}

/// One material as bound for shading.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialData {
    /// xyz = diffuse, w = shininess
    diffuse: [f32; 4],
    specular: [f32; 4],
    ambient: [f32; 4],
}

impl MaterialData {
    pub fn diffuse(&self) -> Vec3 {
        Vec3::from_slice(&self.diffuse[..3])
    }

    pub fn specular(&self) -> Vec3 {
        Vec3::from_slice(&self.specular[..3])
    }

    pub fn ambient(&self) -> Vec3 {
        Vec3::from_slice(&self.ambient[..3])
    }

    pub fn shininess(&self) -> f32 {
        self.diffuse[3]
    }
}

impl From<&Material> for MaterialData {
    fn from(material: &Material) -> Self {
        Self {
            diffuse: material.diffuse.extend(material.shininess).to_array(),
            specular: material.specular.extend(0.0).to_array(),
            ambient: material.ambient.extend(0.0).to_array(),
        }
    }
}

impl Default for MaterialData {
    fn default() -> Self {
        Self::from(&Material::default())
    }
}

/// Fixed-capacity uniform state bound once per frame.
///
/// Rebinding is cheap and never triggers recompilation; only scene topology,
/// shape or transform edits do.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameBindings {
    lights: [LightData; MAX_LIGHTS],
    materials: [MaterialData; MAX_MATERIALS],
    light_count: u32,
    material_count: u32,
}

impl Default for FrameBindings {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl FrameBindings {
    /// Bind a scene's light and material tables, truncating silently at the
    /// capacity bounds.
    pub fn bind(scene: &Scene) -> Self {
        if scene.lights.len() > MAX_LIGHTS {
            debug!(
                "binding first {MAX_LIGHTS} of {} lights (capacity bound)",
                scene.lights.len()
            );
        }
        if scene.materials.len() > MAX_MATERIALS {
            debug!(
                "binding first {MAX_MATERIALS} of {} materials (capacity bound)",
                scene.materials.len()
            );
        }

        let mut bindings = Self::zeroed();
        for (slot, light) in bindings
            .lights
            .iter_mut()
            .zip(scene.lights.iter().take(MAX_LIGHTS))
        {
            *slot = LightData::from(light);
        }
        for (slot, material) in bindings
            .materials
            .iter_mut()
            .zip(scene.materials.iter().take(MAX_MATERIALS))
        {
            *slot = MaterialData::from(material);
        }
        bindings.light_count = scene.lights.len().min(MAX_LIGHTS) as u32;
        bindings.material_count = scene.materials.len().min(MAX_MATERIALS) as u32;
        bindings
    }

    /// The bound lights, in declaration order.
    pub fn lights(&self) -> &[LightData] {
        &self.lights[..self.light_count as usize]
    }

    /// Material lookup by baked index; unbound indices shade with the
    /// default grey rather than faulting.
    pub fn material(&self, index: u32) -> MaterialData {
        if (index as usize) < self.material_count as usize {
            self.materials[index as usize]
        } else {
            MaterialData::default()
        }
    }
}

/// Mirror reflection of `v` about unit normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Deterministic per-point seed for the soft-shadow jitter sequence.
fn jitter_seed(p: Vec3) -> u64 {
    (p.x.to_bits() as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (p.y.to_bits() as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
        ^ (p.z.to_bits() as u64).wrapping_mul(0x1656_67B1_9E37_79F9)
}

/// Fraction of shadow samples toward `light_pos` that reach it unoccluded.
///
/// The unjittered sample always runs; `config.shadow_samples` more run with
/// the light position jittered inside a fixed radius, using a sequence
/// seeded from the hit point so repeated frames agree. Shadow rays point
/// exactly at the (jittered) light, so any scene hit with `t` in (0, 1)
/// occludes.
pub fn shadow_factor(plan: &ScenePlan, point: Vec3, light_pos: Vec3, config: &RenderConfig) -> f32 {
    let mut rng = StdRng::seed_from_u64(jitter_seed(point));
    let mut unoccluded = 0u32;
    let samples = config.shadow_samples + 1;

    for sample in 0..samples {
        let target = if sample == 0 {
            light_pos
        } else {
            let jitter = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            light_pos + jitter * config.shadow_jitter
        };

        let to_light = target - point;
        let len = to_light.length();
        if len < 1e-6 {
            unoccluded += 1; // sitting on the light
            continue;
        }
        // Epsilon offset avoids immediate self-reintersection
        let shadow_ray = Ray::new(point + to_light / len * config.epsilon, to_light);
        let mut scratch = SurfaceHit::default();
        let t = intersect_scene(plan, &shadow_ray, &mut scratch);
        if t >= 1.0 {
            unoccluded += 1;
        }
    }

    unoccluded as f32 / samples as f32
}

/// Phong-shade one visible intersection against every bound light.
///
/// `view` points from the hit toward the viewer and must be unit length;
/// `hit.normal` must already be oriented against the incoming ray.
pub fn shade_point(
    plan: &ScenePlan,
    bindings: &FrameBindings,
    hit: &SurfaceHit,
    view: Vec3,
    config: &RenderConfig,
) -> Vec3 {
    let material = bindings.material(hit.material);
    let mut color = material.ambient();

    for light in bindings.lights() {
        let to_light = light.position() - hit.point;
        let dist = to_light.length();
        if dist < 1e-6 {
            continue;
        }
        let l = to_light / dist;

        // Spot cone: outside the half-angle contributes nothing
        if let Some((facing, cone_cos)) = light.cone() {
            if facing.normalize_or_zero().dot(-l) < cone_cos {
                continue;
            }
        }

        let att = light.attenuation();
        let attenuation = 1.0 / (att.x + att.y * dist + att.z * dist * dist).max(1e-6);

        let shadow = shadow_factor(plan, hit.point, light.position(), config);
        if shadow <= 0.0 {
            continue;
        }

        let diffuse = hit.normal.dot(l).max(0.0);
        let specular = reflect(-l, hit.normal)
            .dot(view)
            .max(0.0)
            .powf(material.shininess());

        color += light.color()
            * (attenuation * shadow)
            * (material.diffuse() * diffuse + material.specular() * specular);
    }
    color
}

/// Debug overlay: flat light color where the primary ray passes through a
/// small sphere around a light closer than the primary hit.
pub fn beacon_color(bindings: &FrameBindings, ray: &Ray, t_primary: f32, radius: f32) -> Option<Vec3> {
    for light in bindings.lights() {
        let oc = light.position() - ray.origin;
        let a = ray.direction.length_squared();
        if a < 1e-12 {
            continue;
        }
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = half_b * half_b - a * c;
        if disc < 0.0 {
            continue;
        }
        let t = (half_b - disc.sqrt()) / a;
        if t > 0.0 && t < t_primary {
            return Some(light.color());
        }
    }
    None
}
