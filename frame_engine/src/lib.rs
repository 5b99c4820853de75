/*!
# Frame Engine

Graphics-API independent core of the Frame renderer.

The engine decides *what* to render, *in what order* and *into which
targets*; the actual API calls go through the `GraphicsDevice` trait.

## Architecture

- **ResourceManager**: owns textures, buffers, programs, materials, meshes,
  scene nodes and cameras behind generational ids
- **RenderGraph**: orders programs so every texture is produced before it is
  sampled
- **Scene traversal**: walks the scene tree, clearing and drawing per node
- **Material**: binds its textures to a bounded set of texture units per draw
- **Renderer**: executes the render order every frame

A `MockGraphicsDevice` records device calls so everything above can run
without a GPU.
*/

mod error;
mod config;
pub mod log;
pub mod utils;
pub mod camera;
pub mod graphics_device;
pub mod resource;
pub mod scene;
pub mod render_graph;
pub mod renderer;

// Main frame namespace module
pub mod frame {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::{RendererConfig, MAX_TEXTURE_SLOTS};

    // Frame renderer
    pub use crate::renderer::Renderer;

    // Logging sub-module (types only; the engine_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger, NullLogger};
    }

    // Graphics device boundary and its mock
    pub mod device {
        pub use crate::graphics_device::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod render_graph {
        pub use crate::render_graph::*;
    }

    pub mod render {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;
