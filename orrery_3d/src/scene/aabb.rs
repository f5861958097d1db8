/// Axis-aligned bounding box.
///
/// Renderables carry an AABB in local space (supplied by the geometry
/// collaborator); the scene graph transforms it by the node's world matrix
/// and merges the results to frame a subtree.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Box from two corners, in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Zero-extent box at a single point
    pub fn from_point(point: Vec3) -> Self {
        Self { min: point, max: point }
    }

    /// Box centered on `center` with half extents `half`
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        let half = half.abs();
        Self { min: center - half, max: center + half }
    }

    /// Smallest box enclosing all points, or None for an empty iterator
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::from_point(first);
        for p in iter {
            aabb.expand_to_include(p);
        }
        Some(aabb)
    }

    /// Midpoint of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent on each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the diagonal, used as the "size" of a model when framing it
    pub fn diagonal_length(&self) -> f32 {
        self.size().length()
    }

    /// Grow the box to include a point
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Union of two boxes
    pub fn merge(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Transform this box by an affine matrix, returning the enclosing AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the box extents
    /// for a tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Whether the point lies inside or on the box
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
