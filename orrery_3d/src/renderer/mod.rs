/// Renderer module - outbound rendering interface and helpers

pub mod renderer;
pub mod draw_list;
pub mod mock_renderer;

pub use renderer::Renderer;
pub use draw_list::{DrawItem, DrawList, LightItem};
pub use mock_renderer::{MockRenderState, MockRenderer, RenderedFrame};
