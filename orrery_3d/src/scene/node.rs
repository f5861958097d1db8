/// Scene-graph node - local transform, hierarchy links and node kind.
///
/// Nodes live in the `SceneGraph`'s slot map and are addressed by
/// `NodeKey`. Hierarchy links are keys, never references.

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use slotmap::new_key_type;
use super::aabb::AABB;
use super::transform::Transform;

new_key_type! {
    /// Stable key for a node in a `SceneGraph`
    pub struct NodeKey;
}

bitflags! {
    /// Per-node capability flags consumed by the renderer collaborator
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// Node (and its renderable) is drawn
        const VISIBLE        = 1 << 0;
        /// Node casts shadows
        const CAST_SHADOW    = 1 << 1;
        /// Node receives shadows
        const RECEIVE_SHADOW = 1 << 2;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        NodeFlags::VISIBLE
    }
}

/// Geometry handle with a local-space bounding volume
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    /// Name of the mesh in the rendering collaborator
    pub mesh: String,
    /// Bounding box in local space
    pub bounds: AABB,
}

impl Renderable {
    pub fn new(mesh: impl Into<String>, bounds: AABB) -> Self {
        Self { mesh: mesh.into(), bounds }
    }

    /// Sphere of the given radius centered on the local origin
    pub fn sphere(mesh: impl Into<String>, radius: f32) -> Self {
        Self::new(mesh, AABB::from_center_half_extents(Vec3::ZERO, Vec3::splat(radius)))
    }
}

/// Light type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Directional,
    Point { distance: f32 },
    Spot { angle: f32, penumbra: f32 },
}

/// Light description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDesc {
    pub kind: LightKind,
    /// Linear RGB color
    pub color: Vec3,
    pub intensity: f32,
}

impl LightDesc {
    pub fn directional(color: Vec3, intensity: f32) -> Self {
        Self { kind: LightKind::Directional, color, intensity }
    }

    pub fn point(color: Vec3, intensity: f32, distance: f32) -> Self {
        Self { kind: LightKind::Point { distance }, color, intensity }
    }

    pub fn spot(color: Vec3, intensity: f32, angle: f32, penumbra: f32) -> Self {
        Self { kind: LightKind::Spot { angle, penumbra }, color, intensity }
    }
}

/// What a node contributes to the scene
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure transform node
    Group,
    /// Drawable geometry
    Renderable(Renderable),
    /// Light source
    Light(LightDesc),
    /// Camera mount point
    Camera,
}

impl NodeKind {
    /// Local bounding box, only for renderables
    pub fn bounds(&self) -> Option<&AABB> {
        match self {
            NodeKind::Renderable(r) => Some(&r.bounds),
            _ => None,
        }
    }
}

/// A node of the scene graph
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: Option<String>,
    transform: Transform,
    kind: NodeKind,
    flags: NodeFlags,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    /// Last computed world matrix, valid unless the node is dirty
    world: Mat4,
}

impl SceneNode {
    pub(crate) fn new(name: Option<String>, kind: NodeKind) -> Self {
        Self {
            name,
            transform: Transform::IDENTITY,
            kind,
            flags: NodeFlags::default(),
            parent: None,
            children: Vec::new(),
            world: Mat4::IDENTITY,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    // ===== CRATE-INTERNAL MUTATORS (SceneGraph keeps dirty state in sync) =====

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub(crate) fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    pub(crate) fn set_flags(&mut self, flags: NodeFlags) {
        self.flags = flags;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeKey>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeKey> {
        &mut self.children
    }

    pub(crate) fn cached_world(&self) -> Mat4 {
        self.world
    }

    pub(crate) fn set_cached_world(&mut self, world: Mat4) {
        self.world = world;
    }
}
