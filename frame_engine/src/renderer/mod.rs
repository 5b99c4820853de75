//! Renderer module - per-frame execution of the render graph

pub mod drawer;
pub mod frame_uniforms;
pub mod renderer;

pub use drawer::{DrawRequest, Drawer, ForwardDrawer};
pub use frame_uniforms::FrameUniforms;
pub use renderer::{cube_face_projection, cube_face_view, Renderer};
