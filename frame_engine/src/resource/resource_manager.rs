//! Central resource store.
//!
//! Owns every renderable resource behind a generational `EntityId`. The
//! store is one arena partitioned by kind: looking an id up in the wrong
//! partition is `NotFound`, the same as a stale or unknown id.
//!
//! Names are optional and bidirectional (at most one name per id and one
//! id per name). Three names are well known: the default root scene node,
//! the default camera, and the output texture the render graph resolves
//! from.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::scene::SceneNode;
use super::{Buffer, EntityId, EntityKind, Material, Program, StaticMesh, Texture};

pub const DEFAULT_ROOT_NAME: &str = "root";
pub const DEFAULT_CAMERA_NAME: &str = "camera";
pub const DEFAULT_OUTPUT_TEXTURE_NAME: &str = "final";

/// One stored resource
#[derive(Debug)]
enum Entity {
    Texture(Texture),
    Program(Program),
    Material(Material),
    Buffer(Buffer),
    StaticMesh(StaticMesh),
    SceneNode(SceneNode),
    Camera(Camera),
}

impl Entity {
    fn kind(&self) -> EntityKind {
        match self {
            Entity::Texture(_) => EntityKind::Texture,
            Entity::Program(_) => EntityKind::Program,
            Entity::Material(_) => EntityKind::Material,
            Entity::Buffer(_) => EntityKind::Buffer,
            Entity::StaticMesh(_) => EntityKind::StaticMesh,
            Entity::SceneNode(_) => EntityKind::SceneNode,
            Entity::Camera(_) => EntityKind::Camera,
        }
    }
}

/// Generates the shared and mutable typed getters of one partition
macro_rules! typed_access {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self, id: EntityId) -> Result<&$ty> {
            match self.entities.get(id) {
                Some(Entity::$variant(value)) => Ok(value),
                other => Err(Self::not_found(id, EntityKind::$variant, other.map(Entity::kind))),
            }
        }

        pub fn $get_mut(&mut self, id: EntityId) -> Result<&mut $ty> {
            match self.entities.get_mut(id) {
                Some(Entity::$variant(value)) => Ok(value),
                other => Err(Self::not_found(id, EntityKind::$variant, other.map(|e| e.kind()))),
            }
        }
    };
}

/// Resource store
#[derive(Debug)]
pub struct ResourceManager {
    entities: SlotMap<EntityId, Entity>,
    /// Program ids in registration order (render graph enumeration order)
    program_ids: Vec<EntityId>,
    name_to_id: FxHashMap<String, EntityId>,
    id_to_name: FxHashMap<EntityId, String>,
    default_quad_id: Option<EntityId>,
    default_cube_id: Option<EntityId>,
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceManager {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            program_ids: Vec::new(),
            name_to_id: FxHashMap::default(),
            id_to_name: FxHashMap::default(),
            default_quad_id: None,
            default_cube_id: None,
        }
    }

    // ===== INSERTION =====

    pub fn add_texture(&mut self, texture: Texture) -> EntityId {
        self.entities.insert(Entity::Texture(texture))
    }

    /// Add a program; programs are enumerated in the order they are added
    pub fn add_program(&mut self, program: Program) -> EntityId {
        let id = self.entities.insert(Entity::Program(program));
        self.program_ids.push(id);
        id
    }

    pub fn add_material(&mut self, material: Material) -> EntityId {
        self.entities.insert(Entity::Material(material))
    }

    pub fn add_buffer(&mut self, buffer: Buffer) -> EntityId {
        self.entities.insert(Entity::Buffer(buffer))
    }

    pub fn add_static_mesh(&mut self, mesh: StaticMesh) -> EntityId {
        self.entities.insert(Entity::StaticMesh(mesh))
    }

    pub fn add_camera(&mut self, camera: Camera) -> EntityId {
        self.entities.insert(Entity::Camera(camera))
    }

    /// Add a scene node and append it to its parent's children
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the node declares a parent that is not a
    /// scene node of this store.
    pub fn add_scene_node(&mut self, node: SceneNode) -> Result<EntityId> {
        if let Some(parent) = node.parent() {
            self.scene_node(parent)?;
        }
        let parent = node.parent();
        let id = self.entities.insert(Entity::SceneNode(node));
        if let Some(parent) = parent {
            self.scene_node_mut(parent)?.push_child(id);
        }
        Ok(id)
    }

    // ===== TYPED ACCESS =====

    typed_access!(texture, texture_mut, Texture, Texture);
    typed_access!(program, program_mut, Program, Program);
    typed_access!(material, material_mut, Material, Material);
    typed_access!(buffer, buffer_mut, Buffer, Buffer);
    typed_access!(static_mesh, static_mesh_mut, StaticMesh, StaticMesh);
    typed_access!(scene_node, scene_node_mut, SceneNode, SceneNode);
    typed_access!(camera, camera_mut, Camera, Camera);

    /// Whether `id` designates a live resource
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Partition of `id`, if live
    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        self.entities.get(id).map(Entity::kind)
    }

    /// Number of stored resources (all kinds)
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Program ids, in registration order
    pub fn program_ids(&self) -> &[EntityId] {
        &self.program_ids
    }

    /// Programs with their ids, in registration order
    pub fn programs(&self) -> impl Iterator<Item = (EntityId, &Program)> + '_ {
        self.program_ids.iter().filter_map(move |&id| match self.entities.get(id) {
            Some(Entity::Program(program)) => Some((id, program)),
            _ => None,
        })
    }

    /// Materials with their ids (arena order)
    pub fn materials(&self) -> impl Iterator<Item = (EntityId, &Material)> + '_ {
        self.entities.iter().filter_map(|(id, entity)| match entity {
            Entity::Material(material) => Some((id, material)),
            _ => None,
        })
    }

    /// Static meshes with their ids (arena order)
    pub fn static_meshes(&self) -> impl Iterator<Item = (EntityId, &StaticMesh)> + '_ {
        self.entities.iter().filter_map(|(id, entity)| match entity {
            Entity::StaticMesh(mesh) => Some((id, mesh)),
            _ => None,
        })
    }

    // ===== SCENE TREE =====

    /// Ordered children of a scene node
    pub fn child_list(&self, id: EntityId) -> Result<&[EntityId]> {
        Ok(self.scene_node(id)?.children())
    }

    /// Parent of a scene node (`None` for a root)
    pub fn parent_id(&self, id: EntityId) -> Result<Option<EntityId>> {
        Ok(self.scene_node(id)?.parent())
    }

    // ===== NAMES =====

    /// Give `id` the unique name `name`
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` is not live
    /// - `ConfigurationError` if the name is taken or `id` is already named
    pub fn register_name(&mut self, id: EntityId, name: &str) -> Result<()> {
        if !self.entities.contains_key(id) {
            return Err(Error::NotFound(format!("cannot name unknown entity {} '{}'", id, name)));
        }
        if let Some(existing) = self.name_to_id.get(name) {
            return Err(Error::ConfigurationError(format!(
                "name '{}' already registered for entity {}", name, existing)));
        }
        if let Some(existing) = self.id_to_name.get(&id) {
            return Err(Error::ConfigurationError(format!(
                "entity {} already named '{}'", id, existing)));
        }
        self.name_to_id.insert(name.to_string(), id);
        self.id_to_name.insert(id, name.to_string());
        Ok(())
    }

    pub fn id_from_name(&self, name: &str) -> Result<EntityId> {
        self.name_to_id
            .get(name)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("no entity named '{}'", name)))
    }

    pub fn name_from_id(&self, id: EntityId) -> Option<&str> {
        self.id_to_name.get(&id).map(String::as_str)
    }

    /// Registered name, or the id itself, for log messages
    pub fn display_name(&self, id: EntityId) -> String {
        match self.name_from_id(id) {
            Some(name) => format!("{}[{}]", name, id),
            None => format!("[{}]", id),
        }
    }

    // ===== DEFAULTS =====

    /// Scene node registered as `DEFAULT_ROOT_NAME`
    pub fn default_root_id(&self) -> Result<EntityId> {
        self.named_of_kind(DEFAULT_ROOT_NAME, EntityKind::SceneNode)
    }

    /// Camera registered as `DEFAULT_CAMERA_NAME`
    pub fn default_camera_id(&self) -> Result<EntityId> {
        self.named_of_kind(DEFAULT_CAMERA_NAME, EntityKind::Camera)
    }

    /// Texture registered as `DEFAULT_OUTPUT_TEXTURE_NAME`
    pub fn default_output_texture_id(&self) -> Result<EntityId> {
        self.named_of_kind(DEFAULT_OUTPUT_TEXTURE_NAME, EntityKind::Texture)
    }

    pub fn default_camera(&self) -> Result<&Camera> {
        self.camera(self.default_camera_id()?)
    }

    pub fn default_quad_id(&self) -> Result<EntityId> {
        self.default_quad_id
            .ok_or_else(|| Error::NotFound("default quad mesh not created".to_string()))
    }

    pub fn default_cube_id(&self) -> Result<EntityId> {
        self.default_cube_id
            .ok_or_else(|| Error::NotFound("default cube mesh not created".to_string()))
    }

    pub fn set_default_quad_id(&mut self, id: EntityId) -> Result<()> {
        self.static_mesh(id)?;
        self.default_quad_id = Some(id);
        Ok(())
    }

    pub fn set_default_cube_id(&mut self, id: EntityId) -> Result<()> {
        self.static_mesh(id)?;
        self.default_cube_id = Some(id);
        Ok(())
    }

    // ===== REMOVAL =====

    /// Move a texture out of the store
    ///
    /// The id and its name become invalid for every later lookup.
    pub fn extract_texture(&mut self, id: EntityId) -> Result<Texture> {
        self.texture(id)?;
        match self.entities.remove(id) {
            Some(Entity::Texture(texture)) => {
                self.forget_name(id);
                Ok(texture)
            }
            other => Err(Self::not_found(id, EntityKind::Texture, other.map(|e| e.kind()))),
        }
    }

    /// Remove a buffer no mesh draws from anymore
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` is not a buffer
    /// - `ConfigurationError` if a static mesh still references it
    pub fn remove_buffer(&mut self, id: EntityId) -> Result<Buffer> {
        self.buffer(id)?;
        if let Some((mesh_id, _)) = self.static_meshes().find(|(_, mesh)| mesh.references_buffer(id)) {
            return Err(Error::ConfigurationError(format!(
                "buffer {} still used by static mesh {}",
                self.display_name(id), self.display_name(mesh_id))));
        }
        match self.entities.remove(id) {
            Some(Entity::Buffer(buffer)) => {
                self.forget_name(id);
                Ok(buffer)
            }
            other => Err(Self::not_found(id, EntityKind::Buffer, other.map(|e| e.kind()))),
        }
    }

    // ===== HELPERS =====

    fn named_of_kind(&self, name: &str, kind: EntityKind) -> Result<EntityId> {
        let id = self.id_from_name(name)?;
        match self.kind_of(id) {
            Some(actual) if actual == kind => Ok(id),
            actual => Err(Self::not_found(id, kind, actual)),
        }
    }

    fn forget_name(&mut self, id: EntityId) {
        if let Some(name) = self.id_to_name.remove(&id) {
            self.name_to_id.remove(&name);
        }
    }

    fn not_found(id: EntityId, expected: EntityKind, actual: Option<EntityKind>) -> Error {
        match actual {
            Some(actual) => Error::NotFound(format!("entity {} is a {}, not a {}", id, actual, expected)),
            None => Error::NotFound(format!("no {} with id {}", expected, id)),
        }
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
