//! Level partitioning
//!
//! Breadth-first grouping of tree nodes by depth. Within a level, nodes keep
//! discovery order (parent-major, left-to-right), so a fixed tree always yields
//! the same partition.

use super::node::Node;
use crate::types::Level;
use serde::Serialize;
use std::collections::VecDeque;

/// Child-index route from the root to a node. The root's address is empty.
///
/// Addresses let the summarizer group nodes without borrowing the tree, and
/// then reach each node mutably one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeAddress(Vec<usize>);

impl NodeAddress {
    pub fn root() -> Self {
        NodeAddress(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut route = self.0.clone();
        route.push(index);
        NodeAddress(route)
    }

    /// Depth of the addressed node (root = 0).
    pub fn depth(&self) -> Level {
        self.0.len()
    }

    pub fn resolve<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        self.0
            .iter()
            .try_fold(root, |node, &index| node.children.get(index))
    }

    pub fn resolve_mut<'a>(&self, root: &'a mut Node) -> Option<&'a mut Node> {
        self.0
            .iter()
            .try_fold(root, |node, &index| node.children.get_mut(index))
    }
}

/// Nodes grouped by depth; index 0 holds the root.
#[derive(Debug, Clone)]
pub struct LevelPartition<T> {
    levels: Vec<Vec<T>>,
}

impl<T> LevelPartition<T> {
    /// Deepest level observed.
    pub fn max_depth(&self) -> Level {
        self.levels.len().saturating_sub(1)
    }

    /// Number of levels (max depth + 1).
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, level: Level) -> &[T] {
        self.levels.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate `(level, nodes)` from the root downwards.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Level, &[T])> {
        self.levels
            .iter()
            .enumerate()
            .map(|(level, nodes)| (level, nodes.as_slice()))
    }

    /// Iterate `(level, nodes)` from the deepest level up to the root.
    pub fn iter_bottom_up(&self) -> impl Iterator<Item = (Level, &[T])> {
        self.iter().rev()
    }
}

fn partition_with<'a, T>(
    root: &'a Node,
    mut project: impl FnMut(&'a Node, &NodeAddress) -> T,
) -> LevelPartition<T> {
    let mut levels: Vec<Vec<T>> = Vec::new();
    let mut queue: VecDeque<(&'a Node, NodeAddress)> = VecDeque::new();
    queue.push_back((root, NodeAddress::root()));

    while let Some((node, address)) = queue.pop_front() {
        let level = address.depth();
        if levels.len() <= level {
            levels.push(Vec::new());
        }
        levels[level].push(project(node, &address));

        for (index, child) in node.children.iter().enumerate() {
            queue.push_back((child, address.child(index)));
        }
    }

    LevelPartition { levels }
}

/// Group borrowed nodes by depth.
pub fn partition_levels(root: &Node) -> LevelPartition<&Node> {
    partition_with(root, |node, _| node)
}

/// Group node addresses by depth, for passes that mutate the tree.
pub fn partition_addresses(root: &Node) -> LevelPartition<NodeAddress> {
    partition_with(root, |_, address| address.clone())
}

/// Node counts for one depth of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LevelStats {
    pub level: Level,
    pub nodes: usize,
    pub files: usize,
    pub directories: usize,
    pub summarized: usize,
}

/// Per-level counts, root level first.
pub fn level_stats(root: &Node) -> Vec<LevelStats> {
    partition_levels(root)
        .iter()
        .map(|(level, nodes)| {
            let files = nodes.iter().filter(|node| !node.is_dir).count();
            LevelStats {
                level,
                nodes: nodes.len(),
                files,
                directories: nodes.len() - files,
                summarized: nodes.iter().filter(|node| node.has_summary()).count(),
            }
        })
        .collect()
}
