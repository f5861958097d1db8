/// CameraRig - a FocusCamera paired with its orbit pivot.
///
/// The rig is the only place where the camera look-at target and the
/// orbit pivot can change, and it always writes both: after any rig
/// operation `camera().target() == orbit().target()`.

use glam::Vec3;
use crate::error::Result;
use crate::engine_trace;
use super::camera::FocusCamera;
use super::orbit::{OrbitControls, OrbitSettings};

const SOURCE: &str = "orrery3d::CameraRig";

/// Camera plus orbit pivot, mutated together
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    camera: FocusCamera,
    orbit: OrbitControls,
}

impl CameraRig {
    /// Pair a camera with orbit controls; the pivot takes the camera's target
    pub fn new(camera: FocusCamera, settings: OrbitSettings) -> Self {
        let mut rig = Self {
            camera,
            orbit: OrbitControls::new(settings),
        };
        let target = rig.camera.target();
        rig.look_at(target);
        rig
    }

    pub fn camera(&self) -> &FocusCamera {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    /// Shared look-at point and orbit pivot
    pub fn target(&self) -> Vec3 {
        self.orbit.target()
    }

    pub fn position(&self) -> Vec3 {
        self.camera.position()
    }

    /// Point the camera at `point` and move the orbit pivot there
    pub fn look_at(&mut self, point: Vec3) {
        self.camera.set_target(point);
        self.orbit.set_target(point);
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.camera.set_position(position);
    }

    pub fn set_fov(&mut self, fov_degrees: f32) -> Result<()> {
        self.camera.set_fov(fov_degrees)
    }

    pub fn set_aspect(&mut self, aspect: f32) -> Result<()> {
        self.camera.set_aspect(aspect)
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) -> Result<()> {
        self.camera.set_clip_planes(near, far)
    }

    pub fn set_orbit_settings(&mut self, settings: OrbitSettings) -> Result<()> {
        self.orbit.set_settings(settings)
    }

    pub fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit.set_enabled(enabled);
    }

    /// Rotate the camera around the pivot. Ignored while controls are disabled.
    pub fn orbit_by(&mut self, delta_azimuth: f32, delta_polar: f32) {
        if !self.orbit.is_enabled() {
            return;
        }
        let position = self.orbit.orbit_position(self.camera.position(), delta_azimuth, delta_polar);
        self.camera.set_position(position);
        engine_trace!(SOURCE, "orbit to {:?}", position);
    }

    /// Move toward (scale < 1) or away from (scale > 1) the pivot.
    /// Ignored while controls are disabled.
    pub fn dolly(&mut self, scale: f32) {
        if !self.orbit.is_enabled() {
            return;
        }
        let position = self.orbit.dolly_position(self.camera.position(), scale);
        self.camera.set_position(position);
    }

    /// Dolly by mouse-wheel notches (positive zooms in)
    pub fn zoom(&mut self, steps: f32) {
        let scale = self.orbit.zoom_scale(steps);
        self.dolly(scale);
    }
}

#[cfg(test)]
#[path = "rig_tests.rs"]
mod tests;
