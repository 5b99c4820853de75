//! Pass action: what a program draws once its target is bound.

use crate::resource::EntityId;

/// Action executed by a render pass
///
/// Determines which draws are issued between binding and unbinding the
/// frame target of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassAction {
    /// Walk a scene tree and draw every mesh node
    ///
    /// `root: None` starts from the scene's default root node.
    SceneTree { root: Option<EntityId> },
    /// Draw one full-screen quad with the program's own material
    /// (post-processing: blur, tone mapping, environment filtering, ...)
    #[default]
    Fullscreen,
}

impl PassAction {
    /// Scene pass from the default root node
    pub fn scene() -> Self {
        PassAction::SceneTree { root: None }
    }

    /// Scene pass from an explicit root node
    pub fn scene_from(root: EntityId) -> Self {
        PassAction::SceneTree { root: Some(root) }
    }

    pub fn renders_scene(&self) -> bool {
        matches!(self, PassAction::SceneTree { .. })
    }
}
