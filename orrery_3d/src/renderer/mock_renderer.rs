/// Mock Renderer for tests and headless runs (no GPU required)
///
/// Records every frame it is asked to draw into a shared state, so a test
/// can hand the renderer to `App` and still inspect what was rendered.

use std::sync::{Arc, Mutex};
use glam::Vec3;
use crate::camera::FocusCamera;
use crate::error::Result;
use crate::scene::SceneGraph;
use crate::engine_bail;
use super::draw_list::DrawList;
use super::renderer::Renderer;

const SOURCE: &str = "orrery3d::MockRenderer";

/// Summary of one rendered frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub draw_count: usize,
    pub light_count: usize,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// Everything the mock has seen
#[derive(Debug, Clone, Default)]
pub struct MockRenderState {
    pub frames: Vec<RenderedFrame>,
    pub resizes: Vec<(u32, u32)>,
    /// When set, the next `render` fails with this message (then clears)
    pub fail_next: Option<String>,
    /// When set, the next `resize` fails with this message (then clears)
    pub fail_next_resize: Option<String>,
}

/// Renderer that records frames instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct MockRenderer {
    state: Arc<Mutex<MockRenderState>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded state
    pub fn state(&self) -> Arc<Mutex<MockRenderState>> {
        Arc::clone(&self.state)
    }
}

impl Renderer for MockRenderer {
    fn render(&mut self, graph: &SceneGraph, camera: &FocusCamera) -> Result<()> {
        let Ok(mut state) = self.state.lock() else {
            engine_bail!(SOURCE, Backend, "render state lock poisoned");
        };
        if let Some(message) = state.fail_next.take() {
            engine_bail!(SOURCE, Backend, "{}", message);
        }

        let list = DrawList::collect(graph);
        state.frames.push(RenderedFrame {
            draw_count: list.items.len(),
            light_count: list.lights.len(),
            camera_position: camera.position(),
            camera_target: camera.target(),
            aspect: camera.aspect(),
            near: camera.near(),
            far: camera.far(),
        });
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let Ok(mut state) = self.state.lock() else {
            engine_bail!(SOURCE, Backend, "render state lock poisoned");
        };
        if let Some(message) = state.fail_next_resize.take() {
            engine_bail!(SOURCE, Backend, "{}", message);
        }
        state.resizes.push((width, height));
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_renderer_tests.rs"]
mod tests;
