/// Local transform of a scene node.
///
/// Translation, rotation (quaternion) and scale, composed in TRS order:
/// a point is scaled first, then rotated, then translated.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, rotation and scale relative to the parent node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Offset from the parent origin
    pub translation: Vec3,
    /// Orientation relative to the parent
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity transform (same as `Transform::IDENTITY`)
    pub fn new() -> Self {
        Self::IDENTITY
    }

    /// Transform with only a translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Self::IDENTITY }
    }

    /// Transform with only a rotation
    pub fn from_rotation(rotation: Quat) -> Self {
        Self { rotation, ..Self::IDENTITY }
    }

    /// Transform with only a scale
    pub fn from_scale(scale: Vec3) -> Self {
        Self { scale, ..Self::IDENTITY }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the rotation from XYZ Euler angles in radians
    pub fn with_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Uniform scale on all three axes
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Local matrix in TRS order (`T * R * S`)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Decompose an affine matrix back into a transform.
    ///
    /// Shear is not representable and is lost.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self { translation, rotation, scale }
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * point)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
