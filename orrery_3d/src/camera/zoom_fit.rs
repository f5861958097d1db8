/// Zoom-fit - frame a subtree so it fills the camera's vertical field of view.
///
/// The subtree's world-space bounding box gives a center and a size (the
/// box diagonal). The camera is placed at the distance where a sphere of
/// that diameter exactly fills the field of view, the clip planes are
/// scaled to the model, and the rig looks at the center.

use glam::Vec3;
use crate::error::Result;
use crate::scene::{NodeKey, SceneGraph, AABB};
use crate::{engine_bail, engine_debug};
use super::camera::validate_fov;
use super::rig::CameraRig;

const SOURCE: &str = "orrery3d::ZoomFit";

/// Smallest size used for framing; degenerate boxes are floored to this
pub const MIN_FIT_SIZE: f32 = 1e-4;

/// World axis the camera is placed along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewAxis {
    X,
    Y,
    Z,
}

impl ViewAxis {
    /// Unit offset from the model center.
    ///
    /// Back-facing views negate the Y and Z components; X stays positive.
    pub fn offset(self, front_facing: bool) -> Vec3 {
        let offset = match self {
            ViewAxis::X => Vec3::X,
            ViewAxis::Y => Vec3::Y,
            ViewAxis::Z => Vec3::Z,
        };
        if front_facing {
            offset
        } else {
            offset * Vec3::new(1.0, -1.0, -1.0)
        }
    }
}

/// Where the camera ends up relative to the framed center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitView {
    /// Keep the current viewing direction, only adjust the distance
    #[default]
    KeepDirection,
    /// Re-orient the camera to a canonical side of the model
    Axis { axis: ViewAxis, front_facing: bool },
}

/// Outcome of a zoom-fit, for logging and inspection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    /// Framed point (camera target and orbit pivot)
    pub center: Vec3,
    /// Diagonal of the bounding box, floored at `MIN_FIT_SIZE`
    pub size: f32,
    /// Camera distance from `center`
    pub distance: f32,
}

/// Distance at which a sphere of diameter `size` fills a vertical field of view.
///
/// `distance = (size / 2) / tan(fov / 2)`, with `size` floored at
/// `MIN_FIT_SIZE`.
///
/// # Errors
///
/// `InvalidConfig` if `fov_degrees` is outside (0, 180).
pub fn fit_distance(size: f32, fov_degrees: f32) -> Result<f32> {
    validate_fov(fov_degrees)?;
    let size = floor_size(size);
    let half_fov = (fov_degrees * 0.5).to_radians();
    Ok((size * 0.5) / half_fov.tan())
}

/// Frame `subtree_root` with the rig's camera.
///
/// A subtree without renderables is framed as a zero-size box at the
/// root's world position.
///
/// # Errors
///
/// * `InvalidNode` - `subtree_root` does not exist
/// * `InvalidConfig` - the camera field of view is out of range
pub fn zoom_fit(
    graph: &SceneGraph,
    subtree_root: NodeKey,
    rig: &mut CameraRig,
    view: FitView,
) -> Result<FitResult> {
    let Some(root_position) = graph.world_position(subtree_root) else {
        engine_bail!(SOURCE, InvalidNode, "zoom_fit: node {:?} does not exist", subtree_root);
    };
    let bounds = graph
        .bounding_volume(subtree_root)
        .unwrap_or_else(|| AABB::from_point(root_position));

    let center = bounds.center();
    let size = floor_size(bounds.diagonal_length());
    let distance = fit_distance(size, rig.camera().fov_degrees())?;

    let direction = match view {
        FitView::KeepDirection => (rig.position() - center).try_normalize().unwrap_or(Vec3::Z),
        FitView::Axis { axis, front_facing } => axis.offset(front_facing),
    };

    rig.set_clip_planes(size / 100.0, size * 100.0)?;
    rig.set_position(center + direction * distance);
    rig.look_at(center);

    engine_debug!(SOURCE, "framed center {:?} size {:.4} at distance {:.4}", center, size, distance);
    Ok(FitResult { center, size, distance })
}

fn floor_size(size: f32) -> f32 {
    if size.is_finite() {
        size.max(MIN_FIT_SIZE)
    } else {
        MIN_FIT_SIZE
    }
}

#[cfg(test)]
#[path = "zoom_fit_tests.rs"]
mod tests;
