//! Resource-level static mesh.
//!
//! A StaticMesh references its vertex and index buffers by id and carries
//! the draw parameters: index count, default material, and whether the
//! depth buffer is cleared once it has been drawn (used by sky boxes and
//! overlays).

use bytemuck::{Pod, Zeroable};
use crate::error::Result;
use super::{Buffer, BufferKind, EntityId, ResourceManager};

// ===== VERTEX =====

/// Vertex layout of the built-in primitives
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }
}

// ===== STATIC MESH =====

/// Indexed triangle mesh
#[derive(Debug, Clone)]
pub struct StaticMesh {
    name: String,
    vertex_buffer_ids: Vec<EntityId>,
    index_buffer_id: EntityId,
    index_count: u32,
    material_id: Option<EntityId>,
    clear_depth_after_draw: bool,
}

impl StaticMesh {
    pub fn new(
        name: &str,
        vertex_buffer_ids: Vec<EntityId>,
        index_buffer_id: EntityId,
        index_count: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            vertex_buffer_ids,
            index_buffer_id,
            index_count,
            material_id: None,
            clear_depth_after_draw: false,
        }
    }

    /// Set the default material
    pub fn with_material(mut self, material_id: EntityId) -> Self {
        self.material_id = Some(material_id);
        self
    }

    pub fn with_clear_depth_after_draw(mut self, clear: bool) -> Self {
        self.clear_depth_after_draw = clear;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_buffer_ids(&self) -> &[EntityId] {
        &self.vertex_buffer_ids
    }

    pub fn index_buffer_id(&self) -> EntityId {
        self.index_buffer_id
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Default material, used when the scene node has no override
    pub fn material_id(&self) -> Option<EntityId> {
        self.material_id
    }

    pub fn set_material_id(&mut self, material_id: Option<EntityId>) {
        self.material_id = material_id;
    }

    pub fn clear_depth_after_draw(&self) -> bool {
        self.clear_depth_after_draw
    }

    /// Whether the mesh draws from `buffer`
    pub fn references_buffer(&self, buffer: EntityId) -> bool {
        self.index_buffer_id == buffer || self.vertex_buffer_ids.contains(&buffer)
    }
}

// ===== BUILT-IN PRIMITIVES =====

const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new([-1.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
    Vertex::new([1.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
    Vertex::new([-1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
    Vertex::new([1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
];

const QUAD_INDICES: [u32; 6] = [0, 2, 1, 1, 2, 3];

/// Create the full-screen quad (two triangles covering clip space)
pub fn create_quad_static_mesh(resources: &mut ResourceManager) -> Result<EntityId> {
    create_static_mesh(resources, "quad", &QUAD_VERTICES, &QUAD_INDICES)
}

/// Create a unit cube (-1..1) with per-face normals
pub fn create_cube_static_mesh(resources: &mut ResourceManager) -> Result<EntityId> {
    // (normal, u axis, v axis) per face
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = [
                normal[0] + su * u[0] + sv * v[0],
                normal[1] + su * u[1] + sv * v[1],
                normal[2] + su * u[2] + sv * v[2],
            ];
            vertices.push(Vertex::new(position, normal, [(su + 1.0) / 2.0, (sv + 1.0) / 2.0]));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    create_static_mesh(resources, "cube", &vertices, &indices)
}

fn create_static_mesh(
    resources: &mut ResourceManager,
    name: &str,
    vertices: &[Vertex],
    indices: &[u32],
) -> Result<EntityId> {
    let vertex_id = resources.add_buffer(
        Buffer::from_slice(&format!("{}.vertices", name), BufferKind::Vertex, vertices)?);
    let index_id = resources.add_buffer(
        Buffer::from_slice(&format!("{}.indices", name), BufferKind::Index, indices)?);
    let mesh = StaticMesh::new(name, vec![vertex_id], index_id, indices.len() as u32);
    Ok(resources.add_static_mesh(mesh))
}

#[cfg(test)]
#[path = "static_mesh_tests.rs"]
mod tests;
