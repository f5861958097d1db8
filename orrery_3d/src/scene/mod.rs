//! Scene module
//!
//! Provides the transform hierarchy (scene graph), node kinds and flags,
//! bounding volumes, and detached fragments for atomic attachment.

mod aabb;
mod node;
mod scene_graph;
mod subtree;
mod transform;

pub use aabb::AABB;
pub use node::{
    LightDesc, LightKind, NodeFlags, NodeKey, NodeKind, Renderable, SceneNode,
};
pub use scene_graph::{SceneGraph, WORLD_NAME};
pub use subtree::{Subtree, SubtreeIndex, SubtreeNode};
pub use transform::Transform;
