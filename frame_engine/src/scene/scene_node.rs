//! Scene graph node.
//!
//! Nodes form a rooted tree through parent ids and ordered child lists;
//! the tree edges are maintained by the resource manager when a node is
//! added. Behavior is selected by `NodeKind`.

use glam::Mat4;
use crate::graphics_device::ClearFlags;
use crate::resource::EntityId;

/// Per-node behavior
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Grouping/transform node, optionally clearing the bound target
    /// before its descendants render
    Transform { clear_flags: ClearFlags },
    /// Draws a static mesh, optionally with a material override
    Mesh {
        mesh_id: EntityId,
        material_id: Option<EntityId>,
    },
}

/// One node of the scene tree
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local_matrix: Mat4,
    kind: NodeKind,
}

impl SceneNode {
    /// Transform node without clear, identity matrix
    pub fn transform(name: &str) -> Self {
        Self::new(name, NodeKind::Transform { clear_flags: ClearFlags::empty() })
    }

    /// Mesh node drawing `mesh_id` with its default material
    pub fn mesh(name: &str, mesh_id: EntityId) -> Self {
        Self::new(name, NodeKind::Mesh { mesh_id, material_id: None })
    }

    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            local_matrix: Mat4::IDENTITY,
            kind,
        }
    }

    /// Attach under `parent` once added to the resource manager
    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_local_matrix(mut self, matrix: Mat4) -> Self {
        self.local_matrix = matrix;
        self
    }

    /// Clear flags of a transform node (ignored for mesh nodes)
    pub fn with_clear_flags(mut self, flags: ClearFlags) -> Self {
        if let NodeKind::Transform { clear_flags } = &mut self.kind {
            *clear_flags = flags;
        }
        self
    }

    /// Material override of a mesh node (ignored for transform nodes)
    pub fn with_material(mut self, material: EntityId) -> Self {
        if let NodeKind::Mesh { material_id, .. } = &mut self.kind {
            *material_id = Some(material);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: EntityId) {
        self.children.push(child);
    }

    pub fn local_matrix(&self) -> Mat4 {
        self.local_matrix
    }

    pub fn set_local_matrix(&mut self, matrix: Mat4) {
        self.local_matrix = matrix;
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}
