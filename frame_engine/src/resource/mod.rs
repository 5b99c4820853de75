//! Resource module - resource store and the resources it owns

pub mod entity;
pub mod texture;
pub mod buffer;
pub mod program;
pub mod material;
pub mod static_mesh;
pub mod resource_manager;

pub use entity::{EntityId, EntityKind};
pub use texture::{PixelFormat, Texture, TextureData, TextureDesc, TextureKind};
pub use buffer::{Buffer, BufferKind};
pub use program::{Program, ProgramDesc};
pub use material::{Material, TextureBinder};
pub use static_mesh::{create_cube_static_mesh, create_quad_static_mesh, StaticMesh, Vertex};
pub use resource_manager::{
    ResourceManager, DEFAULT_CAMERA_NAME, DEFAULT_OUTPUT_TEXTURE_NAME, DEFAULT_ROOT_NAME,
};
