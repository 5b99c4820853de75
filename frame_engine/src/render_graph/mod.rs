//! Render graph module
//!
//! Resolves the order in which programs execute from the textures they
//! read and write, and describes what each pass draws.

mod pass_action;
mod render_graph;

pub use pass_action::PassAction;
pub use render_graph::{check_unique_producers, find_producer, RenderGraph};
