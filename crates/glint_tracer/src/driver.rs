//! Frame driver: owns the compiled program and decides when to re-render.
//!
//! The driver separates the two update paths deliberately: editing scene
//! structure (shapes, transforms, the tree) goes through [`FrameDriver::set_scene`]
//! and recompiles; editing light or material values goes through
//! [`FrameDriver::rebind`] and only refreshes the uniform bindings. A failed
//! recompile never takes down an interactive session: the previous program
//! keeps rendering until a good scene arrives.

use glint_compiler::{compile, CompileError, CompiledScene, WgslBackend};
use glint_core::{Camera, Scene, WalkAxes};
use log::{debug, error};

use crate::renderer::{render, ImageBuffer, RenderConfig};
use crate::shading::FrameBindings;

/// Idle/walking frame loop over a compiled scene program.
pub struct FrameDriver {
    backend: WgslBackend,
    program: Option<CompiledScene>,
    bindings: FrameBindings,
    camera: Camera,
    config: RenderConfig,
    walk: WalkAxes,
    walk_speed: f32,
    needs_redraw: bool,
}

impl FrameDriver {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            backend: WgslBackend::new(),
            program: None,
            bindings: FrameBindings::default(),
            camera: Camera::default(),
            config,
            walk: WalkAxes::default(),
            walk_speed: 3.0,
            needs_redraw: false,
        }
    }

    /// Compile and install a scene, replacing the current program wholesale.
    ///
    /// On failure the previous program (if any) stays installed and keeps
    /// rendering; the error, which carries the generated source, is returned
    /// for diagnosis.
    pub fn set_scene(&mut self, scene: &Scene) -> Result<(), CompileError> {
        match compile(scene, &self.backend) {
            Ok(program) => {
                debug!("installed program for scene '{}'", scene.name);
                self.program = Some(program);
                self.bindings = FrameBindings::bind(scene);
                self.needs_redraw = true;
                Ok(())
            }
            Err(err) => {
                error!("scene '{}' failed to compile: {err}", scene.name);
                if self.config.log_generated_source {
                    if let Some(source) = err.generated_source() {
                        error!("generated source of the failed compile:\n{source}");
                    }
                }
                Err(err)
            }
        }
    }

    /// Refresh light and material bindings without recompiling.
    ///
    /// Value edits (colors, positions, attenuation, shininess) only need
    /// this; shape and transform edits need [`Self::set_scene`].
    pub fn rebind(&mut self, scene: &Scene) {
        self.bindings = FrameBindings::bind(scene);
        self.needs_redraw = true;
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
        self.needs_redraw = true;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Update the active walk axes; walking keeps frames coming until the
    /// axes return to rest.
    pub fn set_walk(&mut self, walk: WalkAxes) {
        if walk.active() && !self.walk.active() {
            self.needs_redraw = true;
        }
        self.walk = walk;
    }

    pub fn set_walk_speed(&mut self, speed: f32) {
        self.walk_speed = speed;
    }

    /// Force a render on the next tick.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// The source text of the installed program, if one is installed.
    pub fn generated_source(&self) -> Option<&str> {
        self.program.as_ref().map(|p| p.source.as_str())
    }

    /// Advance one frame interval.
    ///
    /// Integrates walk movement over `dt` seconds and renders if anything
    /// changed since the last tick. Returns `None` while idle or while no
    /// program is installed.
    pub fn tick(&mut self, dt: f32) -> Option<ImageBuffer> {
        if self.walk.active() {
            self.camera.integrate_walk(self.walk, self.walk_speed, dt);
            self.needs_redraw = true;
        }
        if !self.needs_redraw {
            return None;
        }
        let program = self.program.as_ref()?;

        // Walking re-arms the redraw on the next tick
        self.needs_redraw = self.walk.active();
        Some(render(&program.plan, &self.bindings, &self.camera, &self.config))
    }
}
