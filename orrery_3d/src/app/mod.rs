//! Application context module
//!
//! `App` owns the scene graph, camera rig, animator and collaborators and
//! exposes the two host callbacks (`on_resize`, `on_frame`).

mod app;
mod config;

pub use app::{App, AppEvent};
pub use config::AppConfig;
