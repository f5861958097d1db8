/// SceneGraph - owning tree of transform nodes under a single World root.
///
/// Nodes are stored in a SlotMap for O(1) insert/remove with stable keys.
/// World matrices are cached per node and refreshed lazily: every local
/// write marks the node dirty, and a node's cache is valid only while
/// neither it nor any of its ancestors is in the dirty set.

use glam::{EulerRot, Mat4, Quat, Vec3};
use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_trace};
use super::aabb::AABB;
use super::node::{NodeFlags, NodeKey, NodeKind, SceneNode};
use super::subtree::Subtree;
use super::transform::Transform;

const SOURCE: &str = "orrery3d::SceneGraph";

/// Name given to the root node
pub const WORLD_NAME: &str = "World";

/// Tree of nodes rooted at an immutable World node.
///
/// Nodes may also exist detached (created but not attached yet, or
/// detached explicitly). Detached nodes are never reached from the World
/// root and are the only valid `child` argument of [`SceneGraph::add_child`].
pub struct SceneGraph {
    /// All nodes, attached or detached
    nodes: SlotMap<NodeKey, SceneNode>,
    /// Root node, created with the graph
    world: NodeKey,
    /// Nodes whose local transform or parent changed since the last refresh
    dirty: FxHashSet<NodeKey>,
}

impl SceneGraph {
    /// Create a graph containing only the World root
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let world = nodes.insert(SceneNode::new(Some(WORLD_NAME.to_string()), NodeKind::Group));
        Self {
            nodes,
            world,
            dirty: FxHashSet::default(),
        }
    }

    /// Key of the World root
    pub fn world(&self) -> NodeKey {
        self.world
    }

    // ===== CREATION / STRUCTURE =====

    /// Create a detached node with an identity transform
    pub fn create_node(&mut self, name: Option<&str>, kind: NodeKind) -> NodeKey {
        let key = self.nodes.insert(SceneNode::new(name.map(str::to_string), kind));
        self.dirty.insert(key);
        key
    }

    /// Create a node and attach it as the last child of `parent`
    pub fn add(&mut self, parent: NodeKey, name: Option<&str>, kind: NodeKind) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            engine_bail!(SOURCE, InvalidNode, "add: parent {:?} does not exist", parent);
        }
        let key = self.create_node(name, kind);
        self.add_child(parent, key)?;
        Ok(key)
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// * `InvalidNode` - stale key, or `child` is the World root
    /// * `Cycle` - `child` is `parent` or one of its ancestors
    /// * `AlreadyOwned` - `child` already has a parent (detach it first)
    ///
    /// The graph is unchanged on failure.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            engine_bail!(SOURCE, InvalidNode, "add_child: parent {:?} does not exist", parent);
        }
        if !self.nodes.contains_key(child) {
            engine_bail!(SOURCE, InvalidNode, "add_child: child {:?} does not exist", child);
        }
        if child == parent || self.is_ancestor(child, parent) {
            engine_bail!(SOURCE, Cycle,
                "add_child: {} is {} or one of its ancestors",
                self.describe(child), self.describe(parent));
        }
        if child == self.world {
            engine_bail!(SOURCE, InvalidNode, "add_child: the World root cannot be re-parented");
        }
        if let Some(owner) = self.nodes[child].parent() {
            engine_bail!(SOURCE, AlreadyOwned,
                "add_child: {} is already a child of {}",
                self.describe(child), self.describe(owner));
        }

        self.nodes[parent].children_mut().push(child);
        self.nodes[child].set_parent(Some(parent));
        self.dirty.insert(child);
        Ok(())
    }

    /// Remove `node` from its parent's children, leaving its subtree detached.
    ///
    /// Detaching an already detached node is a no-op.
    pub fn detach(&mut self, node: NodeKey) -> Result<()> {
        if node == self.world {
            engine_bail!(SOURCE, InvalidNode, "detach: the World root cannot be detached");
        }
        let Some(parent) = self.nodes.get(node).map(SceneNode::parent) else {
            engine_bail!(SOURCE, InvalidNode, "detach: node {:?} does not exist", node);
        };
        if let Some(parent) = parent {
            self.nodes[parent].children_mut().retain(|&k| k != node);
            self.nodes[node].set_parent(None);
            self.dirty.insert(node);
        }
        Ok(())
    }

    /// Destroy `node` and its whole subtree. Returns the number of nodes removed.
    pub fn remove(&mut self, node: NodeKey) -> Result<usize> {
        if node == self.world {
            engine_bail!(SOURCE, InvalidNode, "remove: the World root cannot be removed");
        }
        self.detach(node)?;

        let doomed = self.descendants(node);
        for &key in &doomed {
            self.nodes.remove(key);
            self.dirty.remove(&key);
        }
        engine_debug!(SOURCE, "removed {} node(s)", doomed.len());
        Ok(doomed.len())
    }

    /// Insert a detached fragment and attach its root as the last child of `parent`.
    ///
    /// The parent is validated before anything is inserted, so either the
    /// whole fragment becomes visible or nothing does.
    pub fn attach_subtree(&mut self, parent: NodeKey, subtree: Subtree) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            engine_bail!(SOURCE, InvalidNode, "attach_subtree: parent {:?} does not exist", parent);
        }

        let count = subtree.len();
        let mut keys: Vec<NodeKey> = Vec::with_capacity(count);
        for entry in subtree.into_nodes() {
            let fragment_parent = entry.parent();
            let mut node = SceneNode::new(entry.name, entry.kind);
            *node.transform_mut() = entry.transform;
            node.set_flags(entry.flags);
            let key = self.nodes.insert(node);

            if let Some(&fragment_parent) = fragment_parent.and_then(|i| keys.get(i)) {
                self.nodes[key].set_parent(Some(fragment_parent));
                self.nodes[fragment_parent].children_mut().push(key);
            }
            keys.push(key);
        }

        let root = keys[0];
        self.nodes[parent].children_mut().push(root);
        self.nodes[root].set_parent(Some(parent));
        self.dirty.insert(root);

        engine_debug!(SOURCE, "attached fragment of {} node(s) under {}", count, self.describe(parent));
        Ok(root)
    }

    // ===== LOCAL TRANSFORM WRITES =====

    pub fn set_translation(&mut self, node: NodeKey, translation: Vec3) -> Result<()> {
        self.local_mut(node, "set_translation")?.translation = translation;
        Ok(())
    }

    pub fn set_rotation(&mut self, node: NodeKey, rotation: Quat) -> Result<()> {
        self.local_mut(node, "set_rotation")?.rotation = rotation;
        Ok(())
    }

    /// Set the rotation from XYZ Euler angles in radians
    pub fn set_rotation_euler(&mut self, node: NodeKey, x: f32, y: f32, z: f32) -> Result<()> {
        self.local_mut(node, "set_rotation_euler")?.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        Ok(())
    }

    pub fn set_scale(&mut self, node: NodeKey, scale: Vec3) -> Result<()> {
        self.local_mut(node, "set_scale")?.scale = scale;
        Ok(())
    }

    pub fn set_local_transform(&mut self, node: NodeKey, transform: Transform) -> Result<()> {
        *self.local_mut(node, "set_local_transform")? = transform;
        Ok(())
    }

    pub fn set_flags(&mut self, node: NodeKey, flags: NodeFlags) -> Result<()> {
        match self.nodes.get_mut(node) {
            Some(n) => {
                n.set_flags(flags);
                Ok(())
            }
            None => engine_bail!(SOURCE, InvalidNode, "set_flags: node {:?} does not exist", node),
        }
    }

    pub fn set_name(&mut self, node: NodeKey, name: Option<&str>) -> Result<()> {
        match self.nodes.get_mut(node) {
            Some(n) => {
                n.set_name(name.map(str::to_string));
                Ok(())
            }
            None => engine_bail!(SOURCE, InvalidNode, "set_name: node {:?} does not exist", node),
        }
    }

    pub fn set_kind(&mut self, node: NodeKey, kind: NodeKind) -> Result<()> {
        match self.nodes.get_mut(node) {
            Some(n) => {
                n.set_kind(kind);
                Ok(())
            }
            None => engine_bail!(SOURCE, InvalidNode, "set_kind: node {:?} does not exist", node),
        }
    }

    fn local_mut(&mut self, node: NodeKey, op: &str) -> Result<&mut Transform> {
        if !self.nodes.contains_key(node) {
            engine_bail!(SOURCE, InvalidNode, "{}: node {:?} does not exist", op, node);
        }
        self.dirty.insert(node);
        Ok(self.nodes[node].transform_mut())
    }

    // ===== QUERIES =====

    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of nodes, including the World root and detached nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes (key, node), attached or not
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    pub fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes.get(node).and_then(SceneNode::parent)
    }

    /// Children in insertion order (empty for a stale key)
    pub fn children(&self, node: NodeKey) -> &[NodeKey] {
        self.nodes.get(node).map(SceneNode::children).unwrap_or(&[])
    }

    /// Whether `node` is reachable from the World root
    pub fn is_attached(&self, node: NodeKey) -> bool {
        if !self.nodes.contains_key(node) {
            return false;
        }
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current == self.world
    }

    /// Whether `ancestor` is a strict ancestor of `node`
    pub fn is_ancestor(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = self.parent(node);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.parent(key);
        }
        false
    }

    /// Depth-first pre-order search of the subtree rooted at `root`.
    ///
    /// Children are visited in insertion order; the first match wins.
    pub fn find_by_name(&self, root: NodeKey, name: &str) -> Option<NodeKey> {
        if !self.nodes.contains_key(root) {
            return None;
        }
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            let node = &self.nodes[key];
            if node.name() == Some(name) {
                return Some(key);
            }
            stack.extend(node.children().iter().rev());
        }
        None
    }

    /// Search the attached tree from the World root
    pub fn find(&self, name: &str) -> Option<NodeKey> {
        self.find_by_name(self.world, name)
    }

    /// Visit the subtree rooted at `root` in pre-order
    pub fn traverse<F: FnMut(NodeKey, &SceneNode)>(&self, root: NodeKey, mut visitor: F) {
        if !self.nodes.contains_key(root) {
            return;
        }
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            let node = &self.nodes[key];
            visitor(key, node);
            stack.extend(node.children().iter().rev());
        }
    }

    /// Keys of the subtree rooted at `root` (root included) in pre-order
    pub fn descendants(&self, root: NodeKey) -> Vec<NodeKey> {
        let mut keys = Vec::new();
        self.traverse(root, |key, _| keys.push(key));
        keys
    }

    // ===== WORLD TRANSFORMS =====

    /// World matrix of `node`, composed root-to-leaf (`parent * local`).
    ///
    /// Reads never observe stale data: if the node or an ancestor is
    /// dirty, the matrix is composed from the nearest clean ancestor.
    pub fn world_transform(&self, node: NodeKey) -> Option<Mat4> {
        if !self.nodes.contains_key(node) {
            return None;
        }

        // Chain from node up to its topmost ancestor
        let mut chain = vec![node];
        while let Some(parent) = self.parent(chain[chain.len() - 1]) {
            chain.push(parent);
        }

        let Some(topmost_dirty) = chain.iter().rposition(|k| self.dirty.contains(k)) else {
            return Some(self.nodes[node].cached_world());
        };

        let mut world = chain
            .get(topmost_dirty + 1)
            .map(|&clean| self.nodes[clean].cached_world())
            .unwrap_or(Mat4::IDENTITY);
        for &key in chain[..=topmost_dirty].iter().rev() {
            world *= self.nodes[key].transform().to_matrix();
        }
        Some(world)
    }

    /// World-space position of the node's local origin
    pub fn world_position(&self, node: NodeKey) -> Option<Vec3> {
        self.world_transform(node).map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// Whether any node has pending world-matrix work
    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Recompute every stale world matrix and clear the dirty set.
    ///
    /// Returns the number of nodes refreshed.
    pub fn update_world_transforms(&mut self) -> usize {
        if self.dirty.is_empty() {
            return 0;
        }

        let dirty = std::mem::take(&mut self.dirty);
        let roots: Vec<NodeKey> = dirty
            .iter()
            .copied()
            .filter(|&key| {
                let mut current = self.parent(key);
                while let Some(k) = current {
                    if dirty.contains(&k) {
                        return false;
                    }
                    current = self.parent(k);
                }
                true
            })
            .collect();

        let mut refreshed = 0;
        for root in roots {
            let parent_world = self
                .parent(root)
                .map(|p| self.nodes[p].cached_world())
                .unwrap_or(Mat4::IDENTITY);

            let mut stack = vec![(root, parent_world)];
            while let Some((key, parent_world)) = stack.pop() {
                let node = &mut self.nodes[key];
                let world = parent_world * node.transform().to_matrix();
                node.set_cached_world(world);
                refreshed += 1;
                stack.extend(node.children().iter().map(|&c| (c, world)));
            }
        }

        engine_trace!(SOURCE, "refreshed {} world matrices", refreshed);
        refreshed
    }

    // ===== BOUNDS =====

    /// World-space bounding volume of every renderable in the subtree.
    ///
    /// Returns None for a stale key or a subtree without renderables.
    pub fn bounding_volume(&self, root: NodeKey) -> Option<AABB> {
        let root_world = self.world_transform(root)?;

        let mut result: Option<AABB> = None;
        let mut stack = vec![(root, root_world)];
        while let Some((key, world)) = stack.pop() {
            let node = &self.nodes[key];
            if let Some(bounds) = node.kind().bounds() {
                let world_bounds = bounds.transformed(&world);
                result = Some(match result {
                    Some(acc) => acc.merge(&world_bounds),
                    None => world_bounds,
                });
            }
            for &child in node.children() {
                let local = self.nodes[child].transform().to_matrix();
                stack.push((child, world * local));
            }
        }
        result
    }

    fn describe(&self, key: NodeKey) -> String {
        match self.nodes.get(key).and_then(SceneNode::name) {
            Some(name) => format!("'{}'", name),
            None => format!("{:?}", key),
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
