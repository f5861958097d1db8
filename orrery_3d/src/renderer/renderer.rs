/// Renderer trait - outbound interface to the rendering collaborator

use crate::camera::FocusCamera;
use crate::error::Result;
use crate::scene::SceneGraph;

/// Rendering collaborator driven once per frame by `App`.
///
/// When `render` is called the graph is acyclic and every world transform
/// is current; implementations only read it.
pub trait Renderer {
    /// Draw the attached tree of `graph` from `camera`
    ///
    /// # Errors
    ///
    /// `Backend` if the collaborator fails; the frame loop surfaces it to
    /// the host.
    fn render(&mut self, graph: &SceneGraph, camera: &FocusCamera) -> Result<()>;

    /// Output surface size changed (already validated: both > 0)
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;
}
