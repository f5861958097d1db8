/*!
# Orrery 3D

Scene-graph core for small real-time 3D scenes.

This crate provides the library-independent part of a 3D application:
the hierarchical transform model, camera auto-framing ("zoom-fit"), the
per-frame animation update and the host-facing application context.
Rasterization, shading and file-format parsing stay behind the
[`Renderer`](orrery3d::Renderer) and [`AssetLoader`](orrery3d::AssetLoader)
traits.

## Architecture

- **SceneGraph**: tree of transform nodes under a World root, lazy world matrices
- **CameraRig**: focus camera plus orbit pivot, always looking at the pivot
- **zoom_fit**: frames a subtree's bounding box in the camera's field of view
- **Animator**: time-pure animations and follow trackers
- **App**: single owning context with `on_resize` / `on_frame` callbacks
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod scene;
pub mod camera;
pub mod animation;
pub mod asset;
pub mod renderer;
pub mod app;

// Main orrery3d namespace module
pub mod orrery3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine logger facade
    pub use crate::engine::Engine;

    // Host context
    pub use crate::app::{App, AppConfig, AppEvent};

    // Collaborator traits
    pub use crate::renderer::Renderer;
    pub use crate::asset::AssetLoader;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Animation sub-module
    pub mod animation {
        pub use crate::animation::*;
    }

    // Asset sub-module
    pub mod asset {
        pub use crate::asset::*;
    }

    // Render sub-module
    pub mod render {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;
