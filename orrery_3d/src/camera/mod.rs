//! Camera module - focus camera, orbit pivot, rig and zoom-fit framing.
//!
//! The camera and its orbit pivot are always driven through a
//! `CameraRig`, which keeps the look-at target and the pivot equal.

mod camera;
mod orbit;
mod rig;
mod zoom_fit;

pub use camera::{FocusCamera, validate_fov};
pub use orbit::{OrbitControls, OrbitSettings};
pub use rig::CameraRig;
pub use zoom_fit::{fit_distance, zoom_fit, FitResult, FitView, ViewAxis, MIN_FIT_SIZE};
