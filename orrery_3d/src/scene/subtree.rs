/// Detached node fragment produced by an asset loader.
///
/// A `Subtree` is a small arena of nodes indexed by position. Entry 0 is
/// the fragment root; every other entry names a parent with a lower
/// index, so the fragment is always a tree. `SceneGraph::attach_subtree`
/// inserts the whole fragment in one step.

use super::node::{NodeFlags, NodeKind};
use super::transform::Transform;

/// Index of a node inside a `Subtree`
pub type SubtreeIndex = usize;

/// One node of a fragment
#[derive(Debug, Clone, PartialEq)]
pub struct SubtreeNode {
    pub name: Option<String>,
    pub transform: Transform,
    pub kind: NodeKind,
    pub flags: NodeFlags,
    parent: Option<SubtreeIndex>,
}

impl SubtreeNode {
    /// Parent inside the fragment (None only for the root)
    pub fn parent(&self) -> Option<SubtreeIndex> {
        self.parent
    }
}

/// Detached tree of nodes, root at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Subtree {
    nodes: Vec<SubtreeNode>,
}

impl Subtree {
    /// Fragment containing only a root node
    pub fn new(name: Option<&str>, kind: NodeKind) -> Self {
        Self {
            nodes: vec![SubtreeNode {
                name: name.map(str::to_string),
                transform: Transform::IDENTITY,
                kind,
                flags: NodeFlags::default(),
                parent: None,
            }],
        }
    }

    /// Root index (always 0)
    pub const ROOT: SubtreeIndex = 0;

    /// Append a node under `parent`.
    ///
    /// Returns None if `parent` is out of range.
    pub fn add(
        &mut self,
        parent: SubtreeIndex,
        name: Option<&str>,
        kind: NodeKind,
        transform: Transform,
    ) -> Option<SubtreeIndex> {
        if parent >= self.nodes.len() {
            return None;
        }
        self.nodes.push(SubtreeNode {
            name: name.map(str::to_string),
            transform,
            kind,
            flags: NodeFlags::default(),
            parent: Some(parent),
        });
        Some(self.nodes.len() - 1)
    }

    /// Mutable access to one node (transform, flags, kind)
    pub fn node_mut(&mut self, index: SubtreeIndex) -> Option<&mut SubtreeNode> {
        self.nodes.get_mut(index)
    }

    pub fn nodes(&self) -> &[SubtreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a fragment has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn into_nodes(self) -> Vec<SubtreeNode> {
        self.nodes
    }
}
