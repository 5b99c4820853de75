//! Scene tree traversal.
//!
//! Depth-first, pre-order, children in declared order. World matrices are
//! composed on the way down (parent × local). Transform nodes with clear
//! flags report a clear before any of their descendants; mesh nodes report
//! one draw with their resolved material.

use glam::Mat4;
use crate::error::{Error, Result};
use crate::graphics_device::ClearFlags;
use crate::resource::{EntityId, ResourceManager};
use super::NodeKind;

/// Receives the per-node actions of a traversal
pub trait NodeVisitor {
    /// Clear the bound target
    fn clear(&mut self, node: EntityId, flags: ClearFlags) -> Result<()>;

    /// Draw `mesh_id` with `material_id` at world transform `model`
    fn draw_mesh(
        &mut self,
        node: EntityId,
        mesh_id: EntityId,
        material_id: EntityId,
        model: Mat4,
    ) -> Result<()>;
}

/// Material a mesh node draws with: node override, else mesh default
///
/// # Errors
///
/// - `NotFound` if `mesh_id` is not a static mesh
/// - `NoMaterial` if neither the node nor the mesh names a material
pub fn resolve_material(
    resources: &ResourceManager,
    mesh_id: EntityId,
    override_id: Option<EntityId>,
) -> Result<EntityId> {
    let mesh = resources.static_mesh(mesh_id)?;
    override_id
        .or(mesh.material_id())
        .ok_or_else(|| Error::NoMaterial(format!(
            "mesh {} has no material and no override", resources.display_name(mesh_id))))
}

/// Walk the tree under `root` (included)
///
/// Stops at the first error, from the store or from the visitor.
pub fn traverse(
    resources: &ResourceManager,
    root: EntityId,
    visitor: &mut dyn NodeVisitor,
) -> Result<()> {
    let mut stack = vec![(root, Mat4::IDENTITY)];
    while let Some((id, parent_world)) = stack.pop() {
        let node = resources.scene_node(id)?;
        let world = parent_world * node.local_matrix();

        match node.kind() {
            NodeKind::Transform { clear_flags } => {
                if !clear_flags.is_empty() {
                    visitor.clear(id, *clear_flags)?;
                }
            }
            NodeKind::Mesh { mesh_id, material_id } => {
                let material = resolve_material(resources, *mesh_id, *material_id)?;
                visitor.draw_mesh(id, *mesh_id, material, world)?;
            }
        }

        stack.extend(node.children().iter().rev().map(|&child| (child, world)));
    }
    Ok(())
}

#[cfg(test)]
#[path = "traversal_tests.rs"]
mod tests;
