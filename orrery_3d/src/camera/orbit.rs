/// OrbitControls - orbit pivot and user-driven orbit/dolly.
///
/// The camera position is expressed in spherical coordinates around the
/// pivot: azimuth around +Y, polar angle from +Y, radius. Orbiting edits
/// the angles, dollying scales the radius. The controls never touch the
/// camera directly; `CameraRig` applies the positions they compute.

use std::f32::consts::PI;
use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;

const SOURCE: &str = "orrery3d::OrbitControls";

/// Keeps the polar angle away from the poles where the up vector degenerates
const POLAR_EPSILON: f32 = 1e-3;

/// Tunable orbit behaviour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// Radians of rotation per unit of input
    pub rotate_speed: f32,
    /// Dolly factor per unit of wheel input (scale = zoom_speed^steps)
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Disabled controls ignore user input
    pub enabled: bool,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.95,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enabled: true,
        }
    }
}

impl OrbitSettings {
    /// Distances must satisfy `0 <= min <= max`, zoom speed must be finite and > 0
    pub fn validate(&self) -> Result<()> {
        if !(self.min_distance >= 0.0 && self.max_distance >= self.min_distance) {
            engine_bail!(SOURCE, InvalidConfig,
                "orbit distances must satisfy 0 <= min <= max, got min={} max={}",
                self.min_distance, self.max_distance);
        }
        if !(self.zoom_speed > 0.0 && self.zoom_speed.is_finite()) {
            engine_bail!(SOURCE, InvalidConfig, "orbit zoom speed must be > 0, got {}", self.zoom_speed);
        }
        if !self.rotate_speed.is_finite() {
            engine_bail!(SOURCE, InvalidConfig, "orbit rotate speed must be finite, got {}", self.rotate_speed);
        }
        Ok(())
    }
}

/// Orbit pivot plus spherical-coordinate helpers
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    target: Vec3,
    settings: OrbitSettings,
}

impl OrbitControls {
    pub fn new(settings: OrbitSettings) -> Self {
        Self { target: Vec3::ZERO, settings }
    }

    /// Pivot point
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub(crate) fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    /// Replace the settings; rejected settings leave the current ones in place
    pub fn set_settings(&mut self, settings: OrbitSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }

    /// Position after rotating `position` around the pivot.
    ///
    /// `delta_azimuth` turns around +Y, `delta_polar` tilts toward (+) or
    /// away from (-) the top pole. Both are scaled by `rotate_speed`.
    pub fn orbit_position(&self, position: Vec3, delta_azimuth: f32, delta_polar: f32) -> Vec3 {
        let offset = position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return position;
        }

        let azimuth = offset.x.atan2(offset.z) + delta_azimuth * self.settings.rotate_speed;
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos() - delta_polar * self.settings.rotate_speed;
        let polar = polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        self.target + spherical_to_cartesian(radius, azimuth, polar)
    }

    /// Position after scaling the camera distance by `scale`, clamped to
    /// `[min_distance, max_distance]`. Direction is preserved.
    pub fn dolly_position(&self, position: Vec3, scale: f32) -> Vec3 {
        let offset = position - self.target;
        let Some(direction) = offset.try_normalize() else {
            return position;
        };
        // Never panics, even for unvalidated settings (min > max, NaN)
        let distance = (offset.length() * scale)
            .max(self.settings.min_distance)
            .min(self.settings.max_distance);
        self.target + direction * distance
    }

    /// Dolly scale for `steps` wheel notches (positive zooms in)
    pub fn zoom_scale(&self, steps: f32) -> f32 {
        self.settings.zoom_speed.powf(steps)
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(OrbitSettings::default())
    }
}

fn spherical_to_cartesian(radius: f32, azimuth: f32, polar: f32) -> Vec3 {
    let sin_polar = polar.sin();
    Vec3::new(
        radius * sin_polar * azimuth.sin(),
        radius * polar.cos(),
        radius * sin_polar * azimuth.cos(),
    )
}

#[cfg(test)]
#[path = "orbit_tests.rs"]
mod tests;
