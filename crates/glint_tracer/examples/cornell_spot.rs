//! Cornell-style box with a spotlight and a mirror sphere.
//!
//! Compiles the scene, renders one frame through the driver, and saves a PNG.

use anyhow::{Context, Result};
use glint_core::{Camera, Light, Material, Scene, SceneNode, Shape};
use glint_math::{Mat4, Vec3};
use glint_tracer::{FrameDriver, RenderConfig};

fn main() -> Result<()> {
    env_logger::init();

    let scene = build_scene();
    println!(
        "Scene '{}': {} instances, {} lights",
        scene.name,
        scene.instance_count(),
        scene.lights.len()
    );

    let config = RenderConfig {
        width: 800,
        height: 600,
        shadow_samples: 16,
        shadow_jitter: 0.4,
        beacons: true,
        ..Default::default()
    };

    let mut driver = FrameDriver::new(config);
    driver.set_scene(&scene)?;
    driver.set_camera(Camera::new(Vec3::new(0.0, 2.5, 9.0), Vec3::X, Vec3::Y));

    let start = std::time::Instant::now();
    let frame = driver.tick(0.0).context("no frame produced")?;
    println!("Rendered {}x{} in {:?}", frame.width, frame.height, start.elapsed());

    let filename = "cornell_spot.png";
    image::save_buffer(
        filename,
        &frame.to_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
    )
    .context("failed to save image")?;
    println!("Saved to {filename}");
    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new("cornell_spot");

    let white = scene.add_material(Material::new("white", Vec3::splat(0.75)));
    let red = scene.add_material(Material::new("red", Vec3::new(0.75, 0.1, 0.1)));
    let green = scene.add_material(Material::new("green", Vec3::new(0.1, 0.75, 0.1)));
    let mirror = scene.add_material(
        Material::new("mirror", Vec3::splat(0.05)).with_specular(Vec3::splat(0.9), 256.0),
    );
    let glossy = scene.add_material(
        Material::new("glossy", Vec3::new(0.2, 0.3, 0.7)).with_specular(Vec3::splat(0.3), 64.0),
    );

    // Box walls: floor, ceiling, back, left (red), right (green)
    scene.root = SceneNode::new(Mat4::IDENTITY)
        .with_shape(
            Shape::Plane {
                point: Vec3::ZERO,
                normal: Vec3::Y,
            },
            white,
        )
        .with_shape(
            Shape::Plane {
                point: Vec3::new(0.0, 5.0, 0.0),
                normal: -Vec3::Y,
            },
            white,
        )
        .with_shape(
            Shape::Plane {
                point: Vec3::new(0.0, 0.0, -5.0),
                normal: Vec3::Z,
            },
            white,
        )
        .with_shape(
            Shape::Plane {
                point: Vec3::new(-4.0, 0.0, 0.0),
                normal: Vec3::X,
            },
            red,
        )
        .with_shape(
            Shape::Plane {
                point: Vec3::new(4.0, 0.0, 0.0),
                normal: -Vec3::X,
            },
            green,
        )
        .with_shape(
            Shape::Sphere {
                center: Vec3::new(-1.5, 1.2, -2.0),
                radius: 1.2,
            },
            mirror,
        )
        .with_child(
            // Cylinder pedestal with a cone on top, placed as a subtree
            SceneNode::new(Mat4::from_translation(Vec3::new(1.8, 0.0, -1.0)))
                .with_shape(
                    Shape::Cylinder {
                        radius: 0.6,
                        height: 1.0,
                    },
                    glossy,
                )
                .with_child(
                    SceneNode::new(Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0))).with_shape(
                        Shape::Cone {
                            radius: 0.5,
                            height: 1.2,
                        },
                        glossy,
                    ),
                ),
        );

    // Spotlight aimed down at the pedestal, plus a dim fill light
    scene.add_light(
        Light::point(Vec3::new(0.0, 4.8, 0.0), Vec3::splat(1.2))
            .with_cone(Vec3::new(0.35, -1.0, -0.2), 0.5)
            .with_attenuation(Vec3::new(1.0, 0.05, 0.01)),
    );
    scene.add_light(Light::point(Vec3::new(0.0, 3.0, 8.0), Vec3::splat(0.2)));

    scene
}
