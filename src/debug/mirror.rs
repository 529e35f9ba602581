//! Shadow tree of a live view tree, rebuilt each tick with maximal reuse.
//!
//! Shadow nodes are immutable and shared through `Arc`. A live node whose
//! data identity and children are unchanged maps to the very same shadow
//! node as on the previous tick, so consumers can skip unchanged subtrees
//! with a pointer comparison.

use std::collections::HashMap;
use std::sync::Arc;

use crate::view::{Inspect, ViewId};

// ---------------------------------------------------------------------------
// MirrorNode
// ---------------------------------------------------------------------------

/// Immutable snapshot of one live node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorNode {
    /// Identity of the live node.
    pub id: ViewId,
    /// Display name of the live node.
    pub name: String,
    /// Identity token of the live node's data.
    pub data_identity: Option<usize>,
    /// Short description of the live node's data.
    pub data: String,
    /// Whether the live node's submissions reach anyone.
    pub connected: bool,
    /// Shadow children, in live order.
    pub children: Vec<Arc<MirrorNode>>,
}

impl MirrorNode {
    /// Number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(|child| child.count()).sum::<usize>()
    }

    /// Pre-order list of `(depth, node)` pairs.
    pub fn flatten(&self) -> Vec<(usize, &MirrorNode)> {
        let mut out = Vec::new();
        let mut stack = vec![(0, self)];
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            for child in node.children.iter().rev() {
                stack.push((depth + 1, child.as_ref()));
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// ViewMirror
// ---------------------------------------------------------------------------

/// Keeps the shadow tree of one live root.
#[derive(Debug, Default)]
pub struct ViewMirror {
    root: Option<Arc<MirrorNode>>,
    by_id: HashMap<ViewId, Arc<MirrorNode>>,
}

impl ViewMirror {
    /// An empty mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `root` and return its shadow tree, reusing every shadow node
    /// whose live counterpart did not change.
    pub fn update(&mut self, root: &dyn Inspect) -> Arc<MirrorNode> {
        let mut seen = HashMap::with_capacity(self.by_id.len());
        let mirrored = mirror(root, &self.by_id, &mut seen);
        self.by_id = seen;
        self.root = Some(Arc::clone(&mirrored));
        mirrored
    }

    /// Shadow tree from the last update.
    pub fn root(&self) -> Option<&Arc<MirrorNode>> {
        self.root.as_ref()
    }

    /// Shadow node of a live node, as of the last update.
    pub fn get(&self, id: ViewId) -> Option<&Arc<MirrorNode>> {
        self.by_id.get(&id)
    }

    /// Number of live nodes seen by the last update.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the mirror has never been updated.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn mirror(
    live: &dyn Inspect,
    previous: &HashMap<ViewId, Arc<MirrorNode>>,
    seen: &mut HashMap<ViewId, Arc<MirrorNode>>,
) -> Arc<MirrorNode> {
    let id = live.view_id();
    let children: Vec<Arc<MirrorNode>> = live
        .child_views()
        .into_iter()
        .map(|child| mirror(child, previous, seen))
        .collect();
    let data_identity = live.data_identity();

    let reused = previous.get(&id).filter(|old| {
        old.data_identity == data_identity
            && old.connected == live.submit_connected()
            && old.children.len() == children.len()
            && old
                .children
                .iter()
                .zip(&children)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    });
    let node = match reused {
        Some(old) => Arc::clone(old),
        None => Arc::new(MirrorNode {
            id,
            name: live.name().to_owned(),
            data_identity,
            data: live.describe_data(),
            connected: live.submit_connected(),
            children,
        }),
    };
    seen.insert(id, Arc::clone(&node));
    node
}

// ===========================================================================
// Tests
// ===========================================================================
