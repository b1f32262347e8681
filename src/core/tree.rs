//! Lineage tree stored as an append-only arena of nodes.
//!
//! Nodes are addressed by their `NodeId`, which is the position in the arena.
//! A node is always pushed after its parent, so ids double as a topological
//! order. Children are optional references: an absent child is `None`, not a
//! reserved id.

use std::fmt;
use std::ops::Index;

use crate::core::sequence::Sequence;

pub type NodeId = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    sequence: Sequence,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    depth: usize,
    time_depth: f64,
}

/// Child slot of a node. The left child carries the parent's sequence
/// unchanged, the right child carries the mutated sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    Unchanged,
    Mutated,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn child(&self, branch: Branch) -> Option<NodeId> {
        match branch {
            Branch::Unchanged => self.left,
            Branch::Mutated => self.right,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn time_depth(&self) -> f64 {
        self.time_depth
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create a tree holding a single root.
    pub fn with_root(sequence: Sequence) -> Self {
        let mut tree = Self::new();
        tree.nodes.push(Node {
            id: 0,
            sequence,
            parent: None,
            left: None,
            right: None,
            depth: 0,
            time_depth: 0.,
        });
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Append a child below `parent` in the given slot and return its id.
    ///
    /// Returns `None` if the parent does not exist or the slot is taken.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        branch: Branch,
        sequence: Sequence,
        time_depth: f64,
    ) -> Option<NodeId> {
        let id = self.nodes.len();
        let parent_node = self.nodes.get_mut(parent)?;
        let slot = match branch {
            Branch::Unchanged => &mut parent_node.left,
            Branch::Mutated => &mut parent_node.right,
        };
        if slot.is_some() {
            return None;
        }
        *slot = Some(id);
        let depth = parent_node.depth + 1;
        self.nodes.push(Node {
            id,
            sequence,
            parent: Some(parent),
            left: None,
            right: None,
            depth,
            time_depth,
        });
        Some(id)
    }

    /// Append an unchanged and a mutated child below a leaf.
    ///
    /// Returns `None` and leaves the tree untouched unless `parent` is an
    /// existing leaf.
    pub fn add_children(
        &mut self,
        parent: NodeId,
        unchanged: Sequence,
        mutated: Sequence,
        time_depth: f64,
    ) -> Option<(NodeId, NodeId)> {
        if !self.get(parent)?.is_leaf() {
            return None;
        }
        let left = self.add_child(parent, Branch::Unchanged, unchanged, time_depth)?;
        let right = self.add_child(parent, Branch::Mutated, mutated, time_depth)?;
        Some((left, right))
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    /// Walk from `id` up to the root, starting with the node itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes.get(id).map(|node| node.id),
        }
    }

    /// Sequences from the root down to `id`.
    pub fn path(&self, id: NodeId) -> Vec<&Sequence> {
        let mut path: Vec<&Sequence> = self.ancestors(id).map(|node| node.sequence()).collect();
        path.reverse();
        path
    }

    /// Nodes grouped by depth, each level in id order.
    pub fn levels(&self) -> Vec<Vec<&Node>> {
        let mut levels: Vec<Vec<&Node>> = Vec::new();
        for node in self.nodes.iter() {
            if levels.len() <= node.depth {
                levels.resize_with(node.depth + 1, Vec::new);
            }
            levels[node.depth].push(node);
        }
        levels
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id]
    }
}

pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.get(self.next?)?;
        self.next = node.parent;
        Some(node)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, level) in self.levels().iter().enumerate() {
            writeln!(f, "depth {depth}:")?;
            for node in level {
                let parent = node
                    .parent
                    .map_or_else(|| "-".to_string(), |parent| parent.to_string());
                writeln!(
                    f,
                    "  {} time={:.4} id={} parent={}",
                    node.sequence, node.time_depth, node.id, parent
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(string: &str) -> Sequence {
        Sequence::decode(string).unwrap()
    }

    fn small_tree() -> Tree {
        let mut tree = Tree::with_root(sequence("ATCG"));
        tree.add_child(0, Branch::Unchanged, sequence("ATCG"), 0.5)
            .unwrap();
        tree.add_child(0, Branch::Mutated, sequence("TTCG"), 0.5)
            .unwrap();
        tree.add_child(2, Branch::Unchanged, sequence("TTCG"), 1.25)
            .unwrap();
        tree.add_child(2, Branch::Mutated, sequence("TTGG"), 1.25)
            .unwrap();
        tree
    }

    #[test]
    fn single_root() {
        let tree = Tree::with_root(sequence("ATCG"));
        let root = tree.root().unwrap();
        assert_eq!(tree.len(), 1);
        assert!(root.is_root());
        assert!(root.is_leaf());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.time_depth(), 0.);
        assert_eq!(tree.leaves().count(), 1);
    }

    #[test]
    fn add_children() {
        let tree = small_tree();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree[0].left(), Some(1));
        assert_eq!(tree[0].right(), Some(2));
        assert_eq!(tree[2].child(Branch::Unchanged), Some(3));
        assert_eq!(tree[4].parent(), Some(2));
        assert_eq!(tree[4].depth(), 2);
        assert_eq!(tree[4].time_depth(), 1.25);
        let leaves: Vec<NodeId> = tree.leaves().map(|node| node.id()).collect();
        assert_eq!(leaves, vec![1, 3, 4]);
    }

    #[test]
    fn occupied_slot_is_rejected() {
        let mut tree = small_tree();
        assert_eq!(
            tree.add_child(0, Branch::Mutated, sequence("GGGG"), 1.),
            None
        );
        assert_eq!(tree.add_child(42, Branch::Mutated, sequence("GGGG"), 1.), None);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn add_children_only_below_leaves() {
        let mut tree = Tree::with_root(sequence("ATCG"));
        tree.add_child(0, Branch::Mutated, sequence("TTCG"), 1.)
            .unwrap();
        let before = tree.clone();
        assert_eq!(
            tree.add_children(0, sequence("ATCG"), sequence("GGGG"), 1.),
            None
        );
        assert_eq!(
            tree.add_children(7, sequence("ATCG"), sequence("GGGG"), 1.),
            None
        );
        assert_eq!(tree, before);

        assert_eq!(
            tree.add_children(1, sequence("TTCG"), sequence("TTGG"), 2.),
            Some((2, 3))
        );
        assert_eq!(tree[2].parent(), Some(1));
        assert_eq!(tree[3].sequence(), &sequence("TTGG"));
        assert_eq!(tree[3].time_depth(), 2.);
    }

    #[test]
    fn ancestors_and_path() {
        let tree = small_tree();
        let ids: Vec<NodeId> = tree.ancestors(4).map(|node| node.id()).collect();
        assert_eq!(ids, vec![4, 2, 0]);
        let path: Vec<String> = tree.path(4).iter().map(|s| s.encode()).collect();
        assert_eq!(path, vec!["ATCG", "TTCG", "TTGG"]);
        assert_eq!(tree.ancestors(99).count(), 0);
    }

    #[test]
    fn levels() {
        let tree = small_tree();
        let levels: Vec<Vec<NodeId>> = tree
            .levels()
            .iter()
            .map(|level| level.iter().map(|node| node.id()).collect())
            .collect();
        assert_eq!(levels, vec![vec![0], vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn display_lists_levels() {
        let output = small_tree().to_string();
        assert!(output.starts_with("depth 0:\n  ATCG time=0.0000 id=0 parent=-\n"));
        assert!(output.contains("  TTGG time=1.2500 id=4 parent=2\n"));
    }
}
