/// DrawList - flattened view of what a renderer has to draw this frame.
///
/// Walks the attached tree from the World root in pre-order. A node
/// without the `VISIBLE` flag hides its whole subtree, so neither it nor
/// its descendants produce items.

use glam::{Mat4, Vec3};
use crate::scene::{LightDesc, NodeFlags, NodeKey, NodeKind, SceneGraph, AABB};

/// One renderable to draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub node: NodeKey,
    pub mesh: String,
    pub world: Mat4,
    /// World-space bounds
    pub bounds: AABB,
    pub flags: NodeFlags,
}

/// One active light
#[derive(Debug, Clone, PartialEq)]
pub struct LightItem {
    pub node: NodeKey,
    pub light: LightDesc,
    pub position: Vec3,
    pub cast_shadow: bool,
}

/// Visible renderables and lights, in traversal order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub items: Vec<DrawItem>,
    pub lights: Vec<LightItem>,
}

impl DrawList {
    /// Collect everything visible under the World root
    pub fn collect(graph: &SceneGraph) -> Self {
        let mut list = DrawList::default();
        let mut stack = vec![graph.world()];

        while let Some(key) = stack.pop() {
            let Some(node) = graph.node(key) else { continue };
            if !node.is_visible() {
                continue;
            }
            let Some(world) = graph.world_transform(key) else { continue };

            match node.kind() {
                NodeKind::Renderable(renderable) => list.items.push(DrawItem {
                    node: key,
                    mesh: renderable.mesh.clone(),
                    world,
                    bounds: renderable.bounds.transformed(&world),
                    flags: node.flags(),
                }),
                NodeKind::Light(light) => list.lights.push(LightItem {
                    node: key,
                    light: *light,
                    position: world.transform_point3(Vec3::ZERO),
                    cast_shadow: node.flags().contains(NodeFlags::CAST_SHADOW),
                }),
                NodeKind::Group | NodeKind::Camera => {}
            }

            stack.extend(node.children().iter().rev());
        }

        list
    }

    /// Number of renderables that cast shadows
    pub fn shadow_caster_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.flags.contains(NodeFlags::CAST_SHADOW))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.lights.is_empty()
    }
}

#[cfg(test)]
#[path = "draw_list_tests.rs"]
mod tests;
