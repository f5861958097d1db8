//! Per-frame animation update
//!
//! Animations are pure functions of the elapsed time since the loop
//! started: each frame re-derives local transforms from the absolute
//! time, so updating twice with the same time gives identical results.
//!
//! Follow trackers are consumers: they read a node's world position after
//! every animation of the frame has been applied and world transforms
//! have been refreshed, then move the camera rig or another node.

use std::f64::consts::TAU;
use glam::{Quat, Vec3};
use crate::camera::CameraRig;
use crate::error::Result;
use crate::scene::{NodeKey, SceneGraph};
use crate::engine_trace;

const SOURCE: &str = "orrery3d::Animator";

/// Node reference resolved every frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    /// First node with this name in the attached tree (depth-first)
    Name(String),
    /// Direct key (skipped once the node is removed)
    Key(NodeKey),
}

impl NodeRef {
    pub fn name(name: impl Into<String>) -> Self {
        NodeRef::Name(name.into())
    }

    /// Resolve to a live key, or None if the node cannot be found
    pub fn resolve(&self, graph: &SceneGraph) -> Option<NodeKey> {
        match self {
            NodeRef::Name(name) => graph.find(name),
            NodeRef::Key(key) => graph.contains(*key).then_some(*key),
        }
    }
}

impl From<NodeKey> for NodeRef {
    fn from(key: NodeKey) -> Self {
        NodeRef::Key(key)
    }
}

impl From<&str> for NodeRef {
    fn from(name: &str) -> Self {
        NodeRef::Name(name.to_string())
    }
}

/// Time-driven local transform of one node
#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    /// Local rotation = `axis` by `phase + radians_per_second * t`
    Spin {
        node: NodeRef,
        axis: Vec3,
        radians_per_second: f32,
        phase: f32,
    },
    /// Local translation on a circle of `radius` around the parent's Y axis,
    /// raised by `height`
    Orbit {
        node: NodeRef,
        radius: f32,
        height: f32,
        radians_per_second: f32,
        phase: f32,
    },
}

impl Animation {
    pub fn spin(node: impl Into<NodeRef>, axis: Vec3, radians_per_second: f32) -> Self {
        Animation::Spin { node: node.into(), axis, radians_per_second, phase: 0.0 }
    }

    pub fn orbit(node: impl Into<NodeRef>, radius: f32, height: f32, radians_per_second: f32) -> Self {
        Animation::Orbit { node: node.into(), radius, height, radians_per_second, phase: 0.0 }
    }

    /// Angle offset at t = 0
    pub fn with_phase(mut self, value: f32) -> Self {
        match &mut self {
            Animation::Spin { phase, .. } | Animation::Orbit { phase, .. } => *phase = value,
        }
        self
    }

    pub fn node(&self) -> &NodeRef {
        match self {
            Animation::Spin { node, .. } | Animation::Orbit { node, .. } => node,
        }
    }

    /// Angle in radians at `seconds`, wrapped to one turn
    pub fn angle_at(&self, seconds: f64) -> f32 {
        let (rate, phase) = match self {
            Animation::Spin { radians_per_second, phase, .. }
            | Animation::Orbit { radians_per_second, phase, .. } => (*radians_per_second, *phase),
        };
        (f64::from(phase) + f64::from(rate) * seconds).rem_euclid(TAU) as f32
    }

    /// Write this animation's local transform for time `seconds`.
    ///
    /// Returns false if the node could not be resolved this frame.
    pub fn apply(&self, graph: &mut SceneGraph, seconds: f64) -> Result<bool> {
        let Some(key) = self.node().resolve(graph) else {
            return Ok(false);
        };
        let angle = self.angle_at(seconds);

        match self {
            Animation::Spin { axis, .. } => {
                let axis = axis.try_normalize().unwrap_or(Vec3::Y);
                graph.set_rotation(key, Quat::from_axis_angle(axis, angle))?;
            }
            Animation::Orbit { radius, height, .. } => {
                let position = Quat::from_rotation_y(angle) * Vec3::new(*radius, 0.0, 0.0);
                graph.set_translation(key, position + Vec3::Y * *height)?;
            }
        }
        Ok(true)
    }
}

/// What a follow tracker moves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowTarget {
    /// Camera position
    CameraPosition,
    /// Camera look-at target and orbit pivot
    CameraLookAt,
    /// Local translation of a node, so its world position matches the source
    NodeTranslation(NodeRef),
}

/// Copies the world position of `source` onto `target` each frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub source: NodeRef,
    pub target: FollowTarget,
}

impl Follow {
    pub fn new(source: impl Into<NodeRef>, target: FollowTarget) -> Self {
        Self { source: source.into(), target }
    }

    /// Apply the tracker. Returns false if the source or the follower node
    /// could not be resolved, or the follower's parent space is singular.
    pub fn apply(&self, graph: &mut SceneGraph, rig: &mut CameraRig) -> Result<bool> {
        let Some(position) = self.source.resolve(graph).and_then(|k| graph.world_position(k)) else {
            return Ok(false);
        };

        match &self.target {
            FollowTarget::CameraPosition => rig.set_position(position),
            FollowTarget::CameraLookAt => rig.look_at(position),
            FollowTarget::NodeTranslation(follower) => {
                let Some(key) = follower.resolve(graph) else {
                    return Ok(false);
                };
                let local = match graph.parent(key).and_then(|p| graph.world_transform(p)) {
                    Some(parent_world) => {
                        if parent_world.determinant().abs() <= f32::EPSILON {
                            return Ok(false);
                        }
                        parent_world.inverse().transform_point3(position)
                    }
                    None => position,
                };
                graph.set_translation(key, local)?;
            }
        }
        Ok(true)
    }

    fn moves_nodes(&self) -> bool {
        matches!(self.target, FollowTarget::NodeTranslation(_))
    }
}

/// Counters for one animator update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Animations and trackers applied
    pub applied: usize,
    /// Animations and trackers skipped because a node was not found
    pub skipped: usize,
}

/// Registered animations (producers) and follow trackers (consumers)
#[derive(Debug, Clone, Default)]
pub struct Animator {
    animations: Vec<Animation>,
    follows: Vec<Follow>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    pub fn add_follow(&mut self, follow: Follow) {
        self.follows.push(follow);
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn follows(&self) -> &[Follow] {
        &self.follows
    }

    pub fn clear(&mut self) {
        self.animations.clear();
        self.follows.clear();
    }

    /// Run one frame: animations, world refresh, trackers, world refresh.
    ///
    /// World transforms are current when this returns.
    pub fn update(&self, graph: &mut SceneGraph, rig: &mut CameraRig, seconds: f64) -> Result<FrameStats> {
        let mut stats = FrameStats::default();

        for animation in &self.animations {
            if animation.apply(graph, seconds)? {
                stats.applied += 1;
            } else {
                stats.skipped += 1;
                engine_trace!(SOURCE, "animation target {:?} not found, skipped", animation.node());
            }
        }
        graph.update_world_transforms();

        let mut moved_nodes = false;
        for follow in &self.follows {
            if follow.apply(graph, rig)? {
                stats.applied += 1;
                moved_nodes |= follow.moves_nodes();
            } else {
                stats.skipped += 1;
                engine_trace!(SOURCE, "follow source {:?} not resolved, skipped", follow.source);
            }
        }
        if moved_nodes {
            graph.update_world_transforms();
        }

        Ok(stats)
    }
}

#[cfg(test)]
#[path = "animation_tests.rs"]
mod tests;
