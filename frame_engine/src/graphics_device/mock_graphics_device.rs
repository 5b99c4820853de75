//! Mock graphics device for tests (no GPU required)
//!
//! Records every call as a `DeviceCommand` so tests can assert the exact
//! sequence the engine emits. Draw failures can be injected to exercise
//! error paths.

use crate::error::{Error, Result};
use crate::resource::{EntityId, TextureKind};
use super::{AttachmentTarget, ClearFlags, GraphicsDevice, UniformValue, Viewport};

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    BindFrameTarget,
    UnbindFrameTarget,
    AttachTexture { attachment: u32, texture: EntityId, target: AttachmentTarget, mip_level: u32 },
    SetDrawBuffers(u32),
    SetViewport(Viewport),
    Clear { flags: ClearFlags, color: [f32; 4] },
    SetDepthTest(bool),
    UseProgram(EntityId),
    UnuseProgram,
    SetUniform { name: String, value: UniformValue },
    BindTexture { slot: u32, texture: EntityId, kind: TextureKind },
    UnbindTexture { slot: u32, texture: EntityId, kind: TextureKind },
    BindMesh { vertex_buffers: Vec<EntityId>, index_buffer: EntityId },
    DrawIndexed(u32),
}

/// Recording device
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    commands: Vec<DeviceCommand>,
    fail_draws: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `draw_indexed` fail with `BackendError`
    pub fn with_failing_draws(mut self) -> Self {
        self.fail_draws = true;
        self
    }

    pub fn set_fail_draws(&mut self, fail: bool) {
        self.fail_draws = fail;
    }

    /// All recorded calls, oldest first
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Forget recorded calls
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of `draw_indexed` calls recorded
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DeviceCommand::DrawIndexed(_)))
            .count()
    }

    /// Last value set for uniform `name`
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            DeviceCommand::SetUniform { name: n, value } if n == name => Some(*value),
            _ => None,
        })
    }

    fn record(&mut self, command: DeviceCommand) -> Result<()> {
        self.commands.push(command);
        Ok(())
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn bind_frame_target(&mut self) -> Result<()> {
        self.record(DeviceCommand::BindFrameTarget)
    }

    fn unbind_frame_target(&mut self) -> Result<()> {
        self.record(DeviceCommand::UnbindFrameTarget)
    }

    fn attach_texture(
        &mut self,
        attachment: u32,
        texture: EntityId,
        target: AttachmentTarget,
        mip_level: u32,
    ) -> Result<()> {
        self.record(DeviceCommand::AttachTexture { attachment, texture, target, mip_level })
    }

    fn set_draw_buffers(&mut self, count: u32) -> Result<()> {
        self.record(DeviceCommand::SetDrawBuffers(count))
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.record(DeviceCommand::SetViewport(viewport))
    }

    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]) -> Result<()> {
        self.record(DeviceCommand::Clear { flags, color })
    }

    fn set_depth_test(&mut self, enabled: bool) -> Result<()> {
        self.record(DeviceCommand::SetDepthTest(enabled))
    }

    fn use_program(&mut self, program: EntityId) -> Result<()> {
        self.record(DeviceCommand::UseProgram(program))
    }

    fn unuse_program(&mut self) -> Result<()> {
        self.record(DeviceCommand::UnuseProgram)
    }

    fn set_uniform(&mut self, name: &str, value: &UniformValue) -> Result<()> {
        self.record(DeviceCommand::SetUniform { name: name.to_string(), value: *value })
    }

    fn bind_texture(&mut self, slot: u32, texture: EntityId, kind: TextureKind) -> Result<()> {
        self.record(DeviceCommand::BindTexture { slot, texture, kind })
    }

    fn unbind_texture(&mut self, slot: u32, texture: EntityId, kind: TextureKind) -> Result<()> {
        self.record(DeviceCommand::UnbindTexture { slot, texture, kind })
    }

    fn bind_mesh(&mut self, vertex_buffers: &[EntityId], index_buffer: EntityId) -> Result<()> {
        self.record(DeviceCommand::BindMesh {
            vertex_buffers: vertex_buffers.to_vec(),
            index_buffer,
        })
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<()> {
        if self.fail_draws {
            return Err(Error::BackendError(format!(
                "mock draw of {} indices rejected", index_count)));
        }
        self.record(DeviceCommand::DrawIndexed(index_count))
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
