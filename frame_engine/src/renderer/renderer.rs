//! Frame renderer.
//!
//! Owns the resource store and drives the graphics device: at startup it
//! resolves the render order for the default output texture, then each
//! frame executes the passes in that order. A pass binds the program's
//! output textures as color attachments and either walks the scene tree
//! or draws one full-screen quad.

use std::sync::{Arc, Mutex};
use glam::{Mat4, Vec3};
use crate::config::RendererConfig;
use crate::error::{Error, Result};
use crate::graphics_device::{AttachmentTarget, ClearFlags, GraphicsDevice, Viewport};
use crate::log::Logger;
use crate::render_graph::{PassAction, RenderGraph};
use crate::resource::{
    create_cube_static_mesh, create_quad_static_mesh, EntityId, ResourceManager,
};
use crate::scene::{traverse, NodeVisitor};
use crate::{engine_debug, engine_error, engine_info, engine_warn};
use super::{DrawRequest, Drawer, ForwardDrawer, FrameUniforms};

const LOG_SOURCE: &str = "frame::Renderer";

/// (target, up) of each cube-map face, in +X, -X, +Y, -Y, +Z, -Z order
const CUBE_FACE_DIRECTIONS: [(Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Y),
    (Vec3::NEG_X, Vec3::NEG_Y),
    (Vec3::Y, Vec3::Z),
    (Vec3::NEG_Y, Vec3::NEG_Z),
    (Vec3::Z, Vec3::NEG_Y),
    (Vec3::NEG_Z, Vec3::NEG_Y),
];

/// View matrix of cube-map face `face` (camera at the origin)
pub fn cube_face_view(face: usize) -> Mat4 {
    let (target, up) = CUBE_FACE_DIRECTIONS[face % 6];
    Mat4::look_at_rh(Vec3::ZERO, target, up)
}

/// Projection shared by all cube-map faces: 90° square frustum
pub fn cube_face_projection() -> Mat4 {
    Mat4::perspective_rh(90f32.to_radians(), 1.0, 0.1, 10.0)
}

/// Executes the render graph every frame
pub struct Renderer {
    resources: ResourceManager,
    device: Arc<Mutex<dyn GraphicsDevice>>,
    logger: Arc<dyn Logger>,
    drawer: Box<dyn Drawer>,
    config: RendererConfig,
    graph: Option<RenderGraph>,
    elapsed_s: f64,
}

impl Renderer {
    /// Create a renderer over a populated store
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `config` is invalid.
    pub fn new(
        resources: ResourceManager,
        device: Arc<Mutex<dyn GraphicsDevice>>,
        logger: Arc<dyn Logger>,
        config: RendererConfig,
    ) -> Result<Self> {
        if let Err(err) = config.validate() {
            engine_error!(logger, LOG_SOURCE, "Invalid renderer configuration: {}", err);
            return Err(err);
        }
        Ok(Self {
            resources,
            device,
            logger,
            drawer: Box::new(ForwardDrawer::new()),
            config,
            graph: None,
            elapsed_s: 0.0,
        })
    }

    /// Replace the drawing strategy
    pub fn with_drawer(mut self, drawer: Box<dyn Drawer>) -> Self {
        self.drawer = drawer;
        self
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    /// Mutable store, for scene updates between frames
    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Resolved render order, once built
    pub fn render_graph(&self) -> Option<&RenderGraph> {
        self.graph.as_ref()
    }

    /// Seconds accumulated by successful `render_frame` calls
    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    // ===== LIFECYCLE =====

    /// Prepare the first frame
    ///
    /// Checks that the default root node and camera exist, checks every
    /// material fits in the device's texture units, creates the default
    /// quad and cube meshes, resolves the render order for the default
    /// output texture and applies the depth test setting.
    pub fn startup(&mut self) -> Result<()> {
        let result = self.try_startup();
        match &result {
            Ok(()) => engine_info!(self.logger, LOG_SOURCE,
                "Startup complete: {} pass(es)", self.graph.as_ref().map_or(0, RenderGraph::len)),
            Err(err) => engine_error!(self.logger, LOG_SOURCE, "Startup failed: {}", err),
        }
        result
    }

    fn try_startup(&mut self) -> Result<()> {
        self.resources.default_root_id().map_err(|err| Error::ConfigurationError(format!(
            "no default root scene node ({})", err)))?;
        self.resources.default_camera_id().map_err(|err| Error::ConfigurationError(format!(
            "no default camera ({})", err)))?;

        for (id, material) in self.resources.materials() {
            // Slots are handed out lowest first and drained after every draw
            let needed = material.texture_count().min(material.slot_capacity());
            if needed > self.config.texture_slot_capacity {
                return Err(Error::ConfigurationError(format!(
                    "material {} binds up to {} textures, device exposes {} units",
                    self.resources.display_name(id),
                    needed,
                    self.config.texture_slot_capacity)));
            }
        }

        if self.resources.default_quad_id().is_err() {
            let quad = create_quad_static_mesh(&mut self.resources)?;
            self.resources.set_default_quad_id(quad)?;
        }
        if self.resources.default_cube_id().is_err() {
            let cube = create_cube_static_mesh(&mut self.resources)?;
            self.resources.set_default_cube_id(cube)?;
        }

        let output = self.resources.default_output_texture_id()?;
        self.build_render_order(output)?;

        lock_device(&self.device)?.set_depth_test(self.config.depth_test)
    }

    /// Resolve and keep the render order producing `output_texture`
    pub fn build_render_order(&mut self, output_texture: EntityId) -> Result<&RenderGraph> {
        let graph = RenderGraph::build(&self.resources, output_texture, &*self.logger)?;
        Ok(self.graph.insert(graph))
    }

    /// Drop the render order; `startup` must run again before rendering
    pub fn cleanup(&mut self) {
        if self.graph.take().is_some() {
            engine_info!(self.logger, LOG_SOURCE, "Render order released");
        }
        self.elapsed_s = 0.0;
    }

    // ===== FRAME =====

    /// Execute every pass of the render order
    ///
    /// # Errors
    ///
    /// Any error aborts the frame. Texture slots of the material being
    /// drawn are released before the error is returned, and an aborted
    /// frame does not advance `elapsed_s`.
    pub fn render_frame(&mut self, delta_time_s: f64) -> Result<()> {
        let result = self.try_render_frame(delta_time_s);
        if let Err(err) = &result {
            engine_error!(self.logger, LOG_SOURCE, "Frame aborted: {}", err);
        }
        result
    }

    fn try_render_frame(&mut self, delta_time_s: f64) -> Result<()> {
        let passes = self.graph
            .as_ref()
            .ok_or_else(|| Error::ConfigurationError(
                "render order not built, call startup first".to_string()))?
            .passes()
            .to_vec();

        // Committed to `elapsed_s` only once every pass succeeded
        let elapsed_s = self.elapsed_s + delta_time_s;
        let camera = self.resources.default_camera()?;
        let projection = camera.compute_projection(self.config.size);
        let view = camera.compute_view();
        let globals = FrameUniforms::new(
            camera, projection, view, elapsed_s as f32, delta_time_s as f32);

        let device = Arc::clone(&self.device);
        let mut device = lock_device(&device)?;
        let mut frame = FramePass {
            resources: &mut self.resources,
            device: &mut *device,
            drawer: &*self.drawer,
            logger: &*self.logger,
            clear_color: self.config.clear_color,
            globals,
        };
        for program_id in passes {
            frame.render_program(program_id)?;
        }
        self.elapsed_s = elapsed_s;
        Ok(())
    }
}

fn lock_device(
    device: &Arc<Mutex<dyn GraphicsDevice>>,
) -> Result<std::sync::MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device
        .lock()
        .map_err(|_| Error::BackendError("graphics device mutex poisoned".to_string()))
}

// ===== PASS EXECUTION =====

/// Borrowed state of one frame
struct FramePass<'a> {
    resources: &'a mut ResourceManager,
    device: &'a mut dyn GraphicsDevice,
    drawer: &'a dyn Drawer,
    logger: &'a dyn Logger,
    clear_color: [f32; 4],
    globals: FrameUniforms,
}

impl FramePass<'_> {
    fn render_program(&mut self, program_id: EntityId) -> Result<()> {
        let program = self.resources.program(program_id)?;
        let outputs = program.outputs().to_vec();
        let action = program.pass();
        let material_id = program.material_id();

        let mut cube_outputs = Vec::with_capacity(outputs.len());
        for &output in &outputs {
            cube_outputs.push(self.resources.texture(output)?.is_cube_map());
        }
        let first = outputs.first().copied().ok_or_else(|| Error::ConfigurationError(format!(
            "program {} has no output", self.resources.display_name(program_id))))?;
        let size = self.resources.texture(first)?.size();

        engine_debug!(self.logger, LOG_SOURCE, "Display program {}", self.resources.display_name(program_id));

        let is_cube_pass = cube_outputs.iter().any(|&cube| cube);
        let faces = if is_cube_pass { 6 } else { 1 };
        for face in 0..faces {
            let globals = if is_cube_pass {
                self.globals.with_projection_view(cube_face_projection(), cube_face_view(face))
            } else {
                self.globals
            };

            self.device.bind_frame_target()?;
            let executed = self.bind_outputs(&outputs, &cube_outputs, face as u32, size)
                .and_then(|()| self.execute(program_id, action, material_id, globals));
            let unbound = self.device.unbind_frame_target();
            executed.and(unbound)?;
        }
        Ok(())
    }

    fn bind_outputs(&mut self, outputs: &[EntityId], cube: &[bool], face: u32, size: (u32, u32)) -> Result<()> {
        for (attachment, (&texture, &is_cube)) in outputs.iter().zip(cube).enumerate() {
            let target = if is_cube {
                AttachmentTarget::CubeMapFace(face)
            } else {
                AttachmentTarget::Texture2D
            };
            self.device.attach_texture(attachment as u32, texture, target, 0)?;
        }
        self.device.set_draw_buffers(outputs.len() as u32)?;
        self.device.set_viewport(Viewport::full(size))
    }

    fn execute(
        &mut self,
        program_id: EntityId,
        action: PassAction,
        material_id: Option<EntityId>,
        globals: FrameUniforms,
    ) -> Result<()> {
        match action {
            PassAction::Fullscreen => {
                let material_id = material_id.ok_or_else(|| Error::NoMaterial(format!(
                    "full-screen program {} declares no material",
                    self.resources.display_name(program_id))))?;
                let quad = self.resources.default_quad_id()?;
                self.drawer.draw(self.resources, self.device, &DrawRequest {
                    program_id,
                    mesh_id: quad,
                    material_id,
                    uniforms: globals,
                })
            }
            PassAction::SceneTree { root } => {
                let root = match root {
                    Some(root) => root,
                    None => self.resources.default_root_id()?,
                };
                let mut recorder = ScenePassRecorder {
                    resources: self.resources,
                    program_id,
                    commands: Vec::new(),
                    skipped: 0,
                };
                traverse(self.resources, root, &mut recorder)?;
                let (commands, skipped) = (recorder.commands, recorder.skipped);
                if skipped > 0 {
                    engine_debug!(self.logger, LOG_SOURCE,
                        "{} mesh node(s) belong to another program", skipped);
                }
                if commands.is_empty() {
                    engine_warn!(self.logger, LOG_SOURCE,
                        "Scene pass {} issued nothing", self.resources.display_name(program_id));
                }

                for command in commands {
                    match command {
                        SceneCommand::Clear(flags) => self.device.clear(flags, self.clear_color)?,
                        SceneCommand::Draw { mesh_id, material_id, model } => {
                            self.drawer.draw(self.resources, self.device, &DrawRequest {
                                program_id,
                                mesh_id,
                                material_id,
                                uniforms: globals.with_model(model),
                            })?
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

/// Device work produced by walking the scene for one program
#[derive(Debug, Clone, Copy)]
enum SceneCommand {
    Clear(ClearFlags),
    Draw { mesh_id: EntityId, material_id: EntityId, model: Mat4 },
}

/// Collects the clears and draws of a scene pass
///
/// Meshes whose material belongs to another program are skipped.
struct ScenePassRecorder<'a> {
    resources: &'a ResourceManager,
    program_id: EntityId,
    commands: Vec<SceneCommand>,
    skipped: usize,
}

impl NodeVisitor for ScenePassRecorder<'_> {
    fn clear(&mut self, _node: EntityId, flags: ClearFlags) -> Result<()> {
        self.commands.push(SceneCommand::Clear(flags));
        Ok(())
    }

    fn draw_mesh(&mut self, _node: EntityId, mesh_id: EntityId, material_id: EntityId, model: Mat4) -> Result<()> {
        if !self.resources.material(material_id)?.accepts_program(self.program_id) {
            self.skipped += 1;
            return Ok(());
        }
        self.commands.push(SceneCommand::Draw { mesh_id, material_id, model });
        Ok(())
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
