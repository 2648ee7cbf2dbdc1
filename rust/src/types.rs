//! Core types and data structures for KdTree.
//!
//! This module contains the tree, its node representation and the opaque position
//! token used for bidirectional traversal.

use crate::arena::{Arena, NodeId, NULL_NODE};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Hand out a fresh identity for a newly constructed tree.
pub(crate) fn next_tree_id() -> u64 {
    NEXT_TREE_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

/// k-d tree mapping multi-dimensional keys to values.
///
/// Each node at depth `d` splits on axis `d mod k`: keys in its left subtree order
/// before it on that axis and keys in its right subtree order after it, with ties
/// broken by the full key. Keys are unique.
///
/// # Type Parameters
///
/// * `K` - Key type implementing [`KdKey`](crate::KdKey), e.g. `(i32, i32)` or `[u32; 3]`
/// * `V` - Value type
///
/// # Examples
///
/// ```
/// use kdtree::KdTree;
///
/// let mut tree = KdTree::new();
/// tree.insert((3, 1), "a");
/// tree.insert((1, 2), "b");
/// tree.insert((4, 0), "c");
///
/// assert_eq!(tree.get(&(1, 2)), Some(&"b"));
/// let min = tree.find_min::<0>();
/// assert_eq!(tree.entry_at(min).unwrap(), (&(1, 2), &"b"));
///
/// assert!(tree.erase(&(3, 1)));
/// assert!(tree.find(&(3, 1)) == tree.end());
/// assert_eq!(tree.len(), 2);
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion / lookup / deletion**: O(k log n) on a balanced tree, O(k n) worst case
/// - **Axis min / max**: O(n^(1-1/k)) on a balanced tree
/// - **Bulk construction**: O(k n log n), produces a balanced tree
/// - **Full iteration**: O(n)
///
/// No rebalancing is performed after insertions or deletions.
#[derive(Debug)]
pub struct KdTree<K, V> {
    /// Identity checked against positions handed to this tree.
    pub(crate) id: u64,
    /// Root node, `NULL_NODE` when the tree is empty.
    pub(crate) root: NodeId,
    /// Number of stored entries.
    pub(crate) len: usize,
    /// Node storage.
    pub(crate) nodes: Arena<KdNode<K, V>>,
}

/// Tree node holding one entry and its links.
#[derive(Debug, Clone)]
pub(crate) struct KdNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Navigational back-reference, `NULL_NODE` for the root.
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl<K, V> KdNode<K, V> {
    pub(crate) fn new(key: K, value: V, parent: NodeId) -> Self {
        Self {
            key,
            value,
            parent,
            left: NULL_NODE,
            right: NULL_NODE,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left == NULL_NODE && self.right == NULL_NODE
    }
}

/// Opaque position inside a specific tree, or that tree's end sentinel.
///
/// Positions are produced by tree methods ([`KdTree::begin`], [`KdTree::find`],
/// [`KdTree::find_min`], ...) and are only meaningful for the tree that produced
/// them. Two positions are equal iff they refer to the same node of the same tree,
/// or are both that tree's end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) tree: u64,
    pub(crate) node: NodeId,
    pub(crate) generation: u32,
}

impl Position {
    pub(crate) fn end(tree: u64) -> Self {
        Self {
            tree,
            node: NULL_NODE,
            generation: 0,
        }
    }

    /// True if this is the end sentinel.
    pub fn is_end(&self) -> bool {
        self.node == NULL_NODE
    }
}

/// Which extremum an axis search is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extremum {
    Min,
    Max,
}

impl Extremum {
    /// The ordering a candidate must have against the current best to replace it.
    #[inline]
    pub(crate) fn winning(self) -> Ordering {
        match self {
            Extremum::Min => Ordering::Less,
            Extremum::Max => Ordering::Greater,
        }
    }

    /// The child that holds the extremum when the node splits on the searched axis.
    #[inline]
    pub(crate) fn near_child<K, V>(self, node: &KdNode<K, V>) -> NodeId {
        match self {
            Extremum::Min => node.left,
            Extremum::Max => node.right,
        }
    }

    #[inline]
    pub(crate) fn far_child<K, V>(self, node: &KdNode<K, V>) -> NodeId {
        match self {
            Extremum::Min => node.right,
            Extremum::Max => node.left,
        }
    }
}
