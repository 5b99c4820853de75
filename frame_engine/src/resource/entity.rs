//! Entity identifiers shared by every resource kind.

use std::fmt;
use slotmap::{new_key_type, Key};

new_key_type! {
    /// Opaque identifier of one resource in a `ResourceManager`.
    ///
    /// Generational: index + version. Once its resource is removed (or
    /// extracted) an id stays invalid forever, even if the slot is reused.
    /// `EntityId::null()` means "no entity".
    pub struct EntityId;
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else {
            write!(f, "{:?}", self.data())
        }
    }
}

/// Partition of the store an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Texture,
    Program,
    Material,
    Buffer,
    StaticMesh,
    SceneNode,
    Camera,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Texture => "texture",
            EntityKind::Program => "program",
            EntityKind::Material => "material",
            EntityKind::Buffer => "buffer",
            EntityKind::StaticMesh => "static mesh",
            EntityKind::SceneNode => "scene node",
            EntityKind::Camera => "camera",
        };
        f.write_str(name)
    }
}
