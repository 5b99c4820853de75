//! Drawing strategies.
//!
//! A Drawer issues one indexed draw of a static mesh with a program and a
//! material, binding the material's textures to texture units for the
//! duration of the draw.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::graphics_device::{ClearFlags, GraphicsDevice, UniformValue};
use crate::resource::{EntityId, ResourceManager, TextureBinder, TextureKind};
use super::FrameUniforms;

/// One draw to issue
#[derive(Debug, Clone, Copy)]
pub struct DrawRequest {
    pub program_id: EntityId,
    pub mesh_id: EntityId,
    pub material_id: EntityId,
    pub uniforms: FrameUniforms,
}

/// Strategy for drawing one mesh
///
/// Called with the frame target already bound. Implementations must leave
/// the material's slot table empty and no program in use when they return,
/// whether the draw succeeded or not.
pub trait Drawer: Send + Sync {
    fn draw(
        &self,
        resources: &mut ResourceManager,
        device: &mut dyn GraphicsDevice,
        request: &DrawRequest,
    ) -> Result<()>;
}

/// Forward drawer: bind, draw, release, one mesh at a time
#[derive(Debug, Default)]
pub struct ForwardDrawer;

impl ForwardDrawer {
    pub fn new() -> Self {
        Self
    }
}

/// Binds material textures through the graphics device
struct DeviceBinder<'a> {
    device: &'a mut dyn GraphicsDevice,
    kinds: &'a FxHashMap<EntityId, TextureKind>,
}

impl DeviceBinder<'_> {
    fn kind(&self, texture: EntityId) -> Result<TextureKind> {
        self.kinds
            .get(&texture)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("no texture with id {}", texture)))
    }
}

impl TextureBinder for DeviceBinder<'_> {
    fn bind_texture(&mut self, texture: EntityId, slot: u32) -> Result<()> {
        let kind = self.kind(texture)?;
        self.device.bind_texture(slot, texture, kind)
    }

    fn unbind_texture(&mut self, texture: EntityId, slot: u32) -> Result<()> {
        let kind = self.kind(texture)?;
        self.device.unbind_texture(slot, texture, kind)
    }
}

impl Drawer for ForwardDrawer {
    fn draw(
        &self,
        resources: &mut ResourceManager,
        device: &mut dyn GraphicsDevice,
        request: &DrawRequest,
    ) -> Result<()> {
        // Everything is looked up before the program is activated so a
        // missing resource leaves the device untouched
        let program = resources.program(request.program_id)?;
        let program_uniforms = program.uniforms().to_vec();
        let mesh = resources.static_mesh(request.mesh_id)?;
        let vertex_buffers = mesh.vertex_buffer_ids().to_vec();
        let index_buffer = mesh.index_buffer_id();
        let index_count = mesh.index_count();
        let clear_depth = mesh.clear_depth_after_draw();

        let material = resources.material(request.material_id)?;
        let texture_ids: Vec<EntityId> = material.texture_ids().collect();
        let params = material.params().to_vec();
        let mut kinds = FxHashMap::default();
        for &texture in &texture_ids {
            kinds.insert(texture, resources.texture(texture)?.kind());
        }

        let material = resources.material_mut(request.material_id)?;
        device.use_program(request.program_id)?;

        let drawn = (|| -> Result<()> {
            let mut binder = DeviceBinder { device: &mut *device, kinds: &kinds };
            for &texture in &texture_ids {
                let (uniform, slot) = material.enable_texture_id(texture, &mut binder)?;
                binder.device.set_uniform(&uniform, &UniformValue::Int(slot as i32))?;
            }
            for (name, value) in request.uniforms.named_values() {
                device.set_uniform(name, &value)?;
            }
            for (name, value) in program_uniforms.iter().chain(params.iter()) {
                device.set_uniform(name, value)?;
            }
            device.bind_mesh(&vertex_buffers, index_buffer)?;
            device.draw_indexed(index_count)
        })();

        let released = material.disable_all(&mut DeviceBinder { device: &mut *device, kinds: &kinds });
        let unused = device.unuse_program();
        drawn.and(released).and(unused)?;

        if clear_depth {
            device.clear(ClearFlags::DEPTH, [0.0; 4])?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "drawer_tests.rs"]
mod tests;
