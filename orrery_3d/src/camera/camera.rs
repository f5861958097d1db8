/// FocusCamera - perspective camera looking at a target point.
///
/// Holds the high-level parameters (position, target, vertical field of
/// view, aspect ratio, clip planes) and derives the view and projection
/// matrices from them. Every parameter is validated when it is set, so a
/// `FocusCamera` never holds a configuration that would produce NaN
/// matrices.
///
/// The target is only writable from inside the crate: `CameraRig` moves
/// it together with the orbit pivot.

use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::engine_bail;

const SOURCE: &str = "orrery3d::FocusCamera";

/// Perspective camera with a look-at target
#[derive(Debug, Clone, PartialEq)]
pub struct FocusCamera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    fov_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl FocusCamera {
    /// Create a camera at the origin looking down -Z.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the field of view, aspect ratio or clip planes
    /// are out of range.
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Result<Self> {
        validate_fov(fov_degrees)?;
        validate_aspect(aspect)?;
        validate_clip_planes(near, far)?;
        Ok(Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_degrees,
            aspect,
            near,
            far,
        })
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Look-at point
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Vertical field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Unit vector from the position toward the target (-Z if they coincide)
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub(crate) fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_fov(&mut self, fov_degrees: f32) -> Result<()> {
        validate_fov(fov_degrees)?;
        self.fov_degrees = fov_degrees;
        Ok(())
    }

    pub fn set_aspect(&mut self, aspect: f32) -> Result<()> {
        validate_aspect(aspect)?;
        self.aspect = aspect;
        Ok(())
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) -> Result<()> {
        validate_clip_planes(near, far)?;
        self.near = near;
        self.far = far;
        Ok(())
    }

    // ===== DERIVED MATRICES =====

    /// Right-handed view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up)
    }

    /// Right-handed perspective projection (depth 0..1)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix (projection * view)
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Field of view must lie in the open interval (0, 180) degrees
pub fn validate_fov(fov_degrees: f32) -> Result<()> {
    if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
        engine_bail!(SOURCE, InvalidConfig,
            "field of view must be in (0, 180) degrees, got {}", fov_degrees);
    }
    Ok(())
}

fn validate_aspect(aspect: f32) -> Result<()> {
    if !(aspect.is_finite() && aspect > 0.0) {
        engine_bail!(SOURCE, InvalidConfig, "aspect ratio must be finite and > 0, got {}", aspect);
    }
    Ok(())
}

fn validate_clip_planes(near: f32, far: f32) -> Result<()> {
    if !(near > 0.0 && far > near && far.is_finite()) {
        engine_bail!(SOURCE, InvalidConfig,
            "clip planes must satisfy 0 < near < far, got near={} far={}", near, far);
    }
    Ok(())
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
