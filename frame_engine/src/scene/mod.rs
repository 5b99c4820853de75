//! Scene module - scene tree nodes and their traversal

pub mod scene_node;
pub mod traversal;

pub use scene_node::{NodeKind, SceneNode};
pub use traversal::{resolve_material, traverse, NodeVisitor};
