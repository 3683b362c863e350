//! Frame rendering: iterative reflection tracing over a compiled plan.

use glint_compiler::ScenePlan;
use glint_core::Camera;
use glint_math::{Ray, Vec3};
use rayon::prelude::*;

use crate::exec::intersect_scene;
use crate::intersect::{SurfaceHit, NO_HIT};
use crate::shading::{beacon_color, reflect, shade_point, FrameBindings};

/// Knobs for one frame.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,

    /// Reflection bounce cap. Depth 0 shades primary hits only.
    pub max_depth: u32,

    /// Jittered shadow samples per light, on top of the one unjittered sample.
    pub shadow_samples: u32,

    /// Radius of the shadow jitter volume around each light, in world units.
    pub shadow_jitter: f32,

    /// Self-intersection offset for secondary rays.
    pub epsilon: f32,

    /// Color returned where a ray escapes the scene.
    pub background: Vec3,

    /// Draw small flat-colored spheres at light positions (debug overlay).
    pub beacons: bool,
    pub beacon_radius: f32,

    /// Dump the generated backend source when a compile fails.
    pub log_generated_source: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            max_depth: 4,
            shadow_samples: 0,
            shadow_jitter: 0.25,
            epsilon: 1e-3,
            background: Vec3::new(0.05, 0.05, 0.08),
            beacons: false,
            beacon_radius: 0.1,
            log_generated_source: false,
        }
    }
}

/// A linear-light RGB framebuffer.
#[derive(Clone, Debug)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Vec3>,
}

impl ImageBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; (width * height) as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to 8-bit RGBA with gamma 2.0.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            for c in [p.x, p.y, p.z] {
                out.push((c.max(0.0).sqrt().min(1.0) * 255.0) as u8);
            }
            out.push(255);
        }
        out
    }
}

/// Trace one ray through the plan, following mirror reflections iteratively.
///
/// The bounce loop carries an accumulated throughput weight instead of
/// recursing; it stops at `config.max_depth` bounces or once the weight's
/// largest channel drops below 1e-3, so facing mirrors terminate.
pub fn trace(
    plan: &ScenePlan,
    bindings: &FrameBindings,
    ray: &Ray,
    config: &RenderConfig,
) -> Vec3 {
    let mut color = Vec3::ZERO;
    let mut weight = Vec3::ONE;
    let mut current = *ray;

    for depth in 0..=config.max_depth {
        let mut hit = SurfaceHit::default();
        let t = intersect_scene(plan, &current, &mut hit);

        // Light beacons draw over the primary ray only
        if depth == 0 && config.beacons {
            if let Some(c) = beacon_color(bindings, &current, t, config.beacon_radius) {
                return c;
            }
        }

        if t >= NO_HIT {
            color += weight * config.background;
            break;
        }

        // Shade with the normal facing the incoming ray
        if current.direction.dot(hit.normal) > 0.0 {
            hit.normal = -hit.normal;
        }
        let view = -current.direction.normalize_or_zero();
        color += weight * shade_point(plan, bindings, &hit, view, config);

        let material = bindings.material(hit.material);
        weight *= material.specular();
        if weight.max_element() < 1e-3 {
            break;
        }

        let reflected = reflect(current.direction, hit.normal).normalize_or_zero();
        if reflected == Vec3::ZERO {
            break;
        }
        current = Ray::new(hit.point + reflected * config.epsilon, reflected);
    }
    color
}

/// Render the pixel at (x, y).
pub fn render_pixel(
    plan: &ScenePlan,
    bindings: &FrameBindings,
    camera: &Camera,
    config: &RenderConfig,
    x: u32,
    y: u32,
) -> Vec3 {
    let ray = camera.primary_ray(x, y, config.width, config.height);
    trace(plan, bindings, &ray, config)
}

/// Render a full frame, parallelized over rows.
pub fn render(
    plan: &ScenePlan,
    bindings: &FrameBindings,
    camera: &Camera,
    config: &RenderConfig,
) -> ImageBuffer {
    let width = config.width;
    let mut image = ImageBuffer::new(width, config.height);

    image
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(plan, bindings, camera, config, x as u32, y as u32);
            }
        });
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_compiler::{compile, WgslBackend};
    use glint_core::{Light, Material, Scene, SceneNode, Shape, MAX_LIGHTS};
    use glint_math::Mat4;

    fn flat_config() -> RenderConfig {
        RenderConfig {
            width: 8,
            height: 8,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_plan_renders_background() {
        let plan = ScenePlan::default();
        let bindings = FrameBindings::default();
        let config = flat_config();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(trace(&plan, &bindings, &ray, &config), config.background);
    }

    #[test]
    fn test_facing_mirrors_terminate() {
        // Two parallel fully-reflective planes; the bounce loop must stop at
        // max_depth instead of ping-ponging forever
        let mut scene = Scene::new("mirrors");
        let mirror = scene.add_material(
            Material::new("mirror", Vec3::ZERO).with_specular(Vec3::ONE, 32.0),
        );
        scene.root = SceneNode::new(Mat4::IDENTITY)
            .with_shape(
                Shape::Plane {
                    point: Vec3::new(0.0, 0.0, -5.0),
                    normal: Vec3::Z,
                },
                mirror,
            )
            .with_shape(
                Shape::Plane {
                    point: Vec3::new(0.0, 0.0, 5.0),
                    normal: -Vec3::Z,
                },
                mirror,
            );
        scene.add_light(Light::point(Vec3::new(0.0, 4.0, 0.0), Vec3::ONE));

        let compiled = compile(&scene, &WgslBackend::new()).unwrap();
        let bindings = FrameBindings::bind(&scene);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = trace(&compiled.plan, &bindings, &ray, &flat_config());
        assert!(color.is_finite());
    }

    #[test]
    fn test_light_overflow_renders_like_truncated_scene() {
        let mut scene = Scene::new("base");
        let grey = scene.add_material(Material::default());
        scene.root = SceneNode::new(Mat4::IDENTITY).with_shape(
            Shape::Sphere {
                center: Vec3::new(0.0, 0.0, -4.0),
                radius: 1.0,
            },
            grey,
        );
        for i in 0..MAX_LIGHTS {
            scene.add_light(Light::point(Vec3::new(i as f32, 5.0, 0.0), Vec3::ONE));
        }
        let mut overflowing = scene.clone();
        for _ in 0..2 {
            overflowing.add_light(Light::point(Vec3::new(0.0, -5.0, 0.0), Vec3::ONE));
        }

        let compiled = compile(&scene, &WgslBackend::new()).unwrap();
        let camera = Camera::default();
        let config = flat_config();
        let a = render(&compiled.plan, &FrameBindings::bind(&scene), &camera, &config);
        let b = render(
            &compiled.plan,
            &FrameBindings::bind(&overflowing),
            &camera,
            &config,
        );
        for y in 0..config.height {
            for x in 0..config.width {
                assert_eq!(a.get(x, y), b.get(x, y));
            }
        }
    }

    #[test]
    fn test_rgba_conversion_gamma() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Vec3::ONE);
        image.set(1, 0, Vec3::new(0.25, 0.25, 0.25));
        let rgba = image.to_rgba();
        assert_eq!(&rgba[..4], &[255, 255, 255, 255]);
        // sqrt(0.25) = 0.5
        assert_eq!(&rgba[4..8], &[127, 127, 127, 255]);
    }
}
