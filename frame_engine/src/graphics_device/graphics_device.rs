//! Graphics-API boundary.
//!
//! The engine never talks to a graphics API directly: every bind, clear and
//! draw goes through a `GraphicsDevice`. Backends (OpenGL, Vulkan, ...) live
//! outside this crate; `MockGraphicsDevice` records calls for tests.

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::resource::{EntityId, TextureKind};

bitflags! {
    /// Which buffers of the bound target a clear touches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const COLOR = 0b01;
        const DEPTH = 0b10;
    }
}

/// Value of a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Mat4(Mat4),
}

/// Viewport rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport covering a whole target of `size`
    pub fn full(size: (u32, u32)) -> Self {
        Self { x: 0, y: 0, width: size.0, height: size.1 }
    }
}

/// Where a texture is attached in the frame target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentTarget {
    Texture2D,
    /// Cube-map face index, 0..6 in +X, -X, +Y, -Y, +Z, -Z order
    CubeMapFace(u32),
}

/// Graphics-API binding layer
///
/// Identifies GPU objects by the engine's `EntityId`s; backends keep their
/// own mapping to native handles.
pub trait GraphicsDevice: Send {
    // ===== FRAME TARGET =====

    /// Bind the offscreen frame target
    fn bind_frame_target(&mut self) -> Result<()>;

    /// Restore the default (window) target
    fn unbind_frame_target(&mut self) -> Result<()>;

    /// Attach `texture` as color attachment `attachment`
    fn attach_texture(
        &mut self,
        attachment: u32,
        texture: EntityId,
        target: AttachmentTarget,
        mip_level: u32,
    ) -> Result<()>;

    /// Enable the first `count` color attachments for drawing
    fn set_draw_buffers(&mut self, count: u32) -> Result<()>;

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Clear the bound target
    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]) -> Result<()>;

    fn set_depth_test(&mut self, enabled: bool) -> Result<()>;

    // ===== PROGRAMS & UNIFORMS =====

    fn use_program(&mut self, program: EntityId) -> Result<()>;

    fn unuse_program(&mut self) -> Result<()>;

    /// Set a named uniform of the program in use
    fn set_uniform(&mut self, name: &str, value: &UniformValue) -> Result<()>;

    // ===== TEXTURES =====

    /// Bind `texture` to texture unit `slot`
    fn bind_texture(&mut self, slot: u32, texture: EntityId, kind: TextureKind) -> Result<()>;

    /// Clear texture unit `slot`
    fn unbind_texture(&mut self, slot: u32, texture: EntityId, kind: TextureKind) -> Result<()>;

    // ===== DRAW =====

    /// Bind the vertex buffers and the index buffer of a mesh
    fn bind_mesh(&mut self, vertex_buffers: &[EntityId], index_buffer: EntityId) -> Result<()>;

    /// Draw `index_count` indices (triangles) from the bound mesh
    fn draw_indexed(&mut self, index_count: u32) -> Result<()>;
}
