/// Application configuration
///
/// Camera parameters, initial surface size and orbit behaviour. Defaults
/// match the solar-system scene: 75° vertical field of view, clip range
/// 0.1..100, camera at (0, 0, 25) looking at the origin.

use glam::Vec3;
use crate::camera::{validate_fov, OrbitSettings};
use crate::error::Result;
use crate::engine_bail;

const SOURCE: &str = "orrery3d::AppConfig";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Vertical field of view in degrees, in (0, 180)
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    /// Initial surface width in pixels
    pub width: u32,
    /// Initial surface height in pixels
    pub height: u32,
    pub orbit: OrbitSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            camera_position: Vec3::new(0.0, 0.0, 25.0),
            camera_target: Vec3::ZERO,
            width: 1280,
            height: 720,
            orbit: OrbitSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }

    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_camera_position(mut self, position: Vec3) -> Self {
        self.camera_position = position;
        self
    }

    pub fn with_camera_target(mut self, target: Vec3) -> Self {
        self.camera_target = target;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_orbit(mut self, orbit: OrbitSettings) -> Self {
        self.orbit = orbit;
        self
    }

    /// Aspect ratio of the initial surface
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Check every value before it reaches the camera
    pub fn validate(&self) -> Result<()> {
        validate_fov(self.fov_degrees)?;
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            engine_bail!(SOURCE, InvalidConfig,
                "clip planes must satisfy 0 < near < far, got near={} far={}", self.near, self.far);
        }
        if self.width == 0 || self.height == 0 {
            engine_bail!(SOURCE, InvalidConfig,
                "surface size must be non-zero, got {}x{}", self.width, self.height);
        }
        if !(self.camera_position.is_finite() && self.camera_target.is_finite()) {
            engine_bail!(SOURCE, InvalidConfig, "camera position and target must be finite");
        }
        self.orbit.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
