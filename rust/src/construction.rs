//! Construction and initialization logic for KdTree.
//!
//! This module contains empty construction, balanced bulk construction from an
//! unordered collection of pairs, deep copying and teardown.

use crate::arena::{Arena, NodeId, NULL_NODE};
use crate::key::{compare_on_axis, next_axis, KdKey};
use crate::types::{next_tree_id, KdNode, KdTree, Position};
use std::collections::VecDeque;

impl<K, V> KdTree<K, V> {
    /// Create an empty k-d tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdtree::KdTree;
    ///
    /// let tree: KdTree<(i32, i32), String> = KdTree::new();
    /// assert!(tree.is_empty());
    /// assert!(tree.begin() == tree.end());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty k-d tree with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: next_tree_id(),
            root: NULL_NODE,
            len: 0,
            nodes: Arena::with_capacity(capacity),
        }
    }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry.
    ///
    /// Positions obtained before the clear become stale; the end position stays valid.
    pub fn clear(&mut self) {
        log::debug!("clearing k-d tree {} with {} entries", self.id, self.len);
        self.nodes.clear();
        self.root = NULL_NODE;
        self.len = 0;
    }

    /// The end position of this tree.
    pub fn end(&self) -> Position {
        Position::end(self.id)
    }

    /// Build a position token for a live node (or end for `NULL_NODE`).
    pub(crate) fn position_of(&self, node: NodeId) -> Position {
        match self.nodes.generation(node) {
            Some(generation) => Position {
                tree: self.id,
                node,
                generation,
            },
            None => self.end(),
        }
    }
}

impl<K: KdKey, V> KdTree<K, V> {
    /// Build a balanced tree from an unordered collection of pairs.
    ///
    /// Pairs are stable-sorted by key and deduplicated so the last occurrence of a key
    /// wins. The tree is then built by recursive median selection on the axis of each
    /// level, which yields depth O(log n) regardless of input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdtree::KdTree;
    ///
    /// let tree = KdTree::from_pairs(vec![
    ///     ((1, 1), "first"),
    ///     ((0, 5), "other"),
    ///     ((1, 1), "second"),
    /// ]);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.get(&(1, 1)), Some(&"second"));
    /// ```
    pub fn from_pairs(mut pairs: Vec<(K, V)>) -> Self {
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut unique: Vec<(K, V)> = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            match unique.last_mut() {
                Some(last) if last.0 == key => *last = (key, value),
                _ => unique.push((key, value)),
            }
        }

        let mut tree = Self::with_capacity(unique.len());
        tree.len = unique.len();
        tree.root = tree.build_balanced(unique, NULL_NODE, 0);
        log::debug!(
            "bulk-built k-d tree {} with {} entries, height {}",
            tree.id,
            tree.len,
            tree.height()
        );
        tree
    }

    /// Make the median of `items` on `axis` the subtree root and recurse on both halves.
    fn build_balanced(&mut self, mut items: Vec<(K, V)>, parent: NodeId, axis: usize) -> NodeId {
        if items.is_empty() {
            return NULL_NODE;
        }

        let mid = items.len() / 2;
        items.select_nth_unstable_by(mid, |a, b| compare_on_axis(&a.0, &b.0, axis));
        let upper = items.split_off(mid + 1);
        let Some((key, value)) = items.pop() else {
            return NULL_NODE;
        };

        let id = self.nodes.allocate(KdNode::new(key, value, parent));
        let next = next_axis::<K>(axis);
        let left = self.build_balanced(items, id, next);
        let right = self.build_balanced(upper, id, next);

        let node = &mut self.nodes[id];
        node.left = left;
        node.right = right;
        id
    }
}

impl<K, V> Default for KdTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: KdKey, V> From<Vec<(K, V)>> for KdTree<K, V> {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl<K: KdKey, V> FromIterator<(K, V)> for KdTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().collect())
    }
}

impl<K: KdKey, V: Clone> Clone for KdTree<K, V> {
    /// Deep copy by breadth-first re-insertion of the source's entries.
    ///
    /// Inserting parents before children reproduces the source shape exactly, and the
    /// copy's arena has no holes left over from earlier deletions.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        let mut queue = VecDeque::new();
        if self.root != NULL_NODE {
            queue.push_back(self.root);
        }

        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id];
            copy.insert(node.key.clone(), node.value.clone());
            if node.left != NULL_NODE {
                queue.push_back(node.left);
            }
            if node.right != NULL_NODE {
                queue.push_back(node.right);
            }
        }

        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_is_empty() {
        let tree: KdTree<(i32, i32), ()> = KdTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.root, NULL_NODE);
    }

    #[test]
    fn test_bulk_build_last_duplicate_wins() {
        let tree = KdTree::from_pairs(vec![
            ((2, 2), 1),
            ((1, 9), 2),
            ((2, 2), 3),
            ((5, 0), 4),
            ((2, 2), 5),
        ]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get(&(2, 2)), Some(&5));
        assert_eq!(tree.get(&(1, 9)), Some(&2));
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_bulk_build_is_balanced() {
        // Sorted input would degenerate into a chain under repeated insertion.
        let pairs: Vec<_> = (0..1023).map(|i| ((i, i), i)).collect();
        let tree = KdTree::from_pairs(pairs);
        assert_eq!(tree.len(), 1023);
        assert_eq!(tree.height(), 10);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_bulk_build_empty() {
        let tree: KdTree<(u8, u8), u8> = KdTree::from_pairs(Vec::new());
        assert!(tree.is_empty());
        assert!(tree.begin() == tree.end());
    }

    #[test]
    fn test_collect_into_tree() {
        let tree: KdTree<[u8; 3], usize> = (0..50u8)
            .map(|i| ([i % 7, i % 5, i % 3], i as usize))
            .collect();
        assert_eq!(tree.len(), 50);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = KdTree::new();
        for (i, key) in [(5, 5), (2, 8), (8, 1), (1, 1), (9, 9)].into_iter().enumerate() {
            original.insert(key, i);
        }
        original.erase(&(5, 5));

        let mut copy = original.clone();
        assert_ne!(copy.id, original.id);
        assert_eq!(
            copy.iter().collect::<Vec<_>>(),
            original.iter().collect::<Vec<_>>()
        );
        assert_eq!(copy.height(), original.height());

        copy.insert((2, 8), 100);
        copy.erase(&(1, 1));
        assert_eq!(original.get(&(2, 8)), Some(&1));
        assert_eq!(original.get(&(1, 1)), Some(&3));
        assert_eq!(original.len(), 4);
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn test_clear_keeps_identity_and_invalidates_positions() {
        let mut tree = KdTree::from_pairs(vec![((1, 2), 'a'), ((3, 4), 'b')]);
        let pos = tree.find(&(1, 2));
        let end = tree.end();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.end(), end);
        assert!(tree.entry_at(pos).is_err());

        tree.insert((1, 2), 'c');
        assert!(tree.entry_at(pos).is_err());
        assert_eq!(tree.get(&(1, 2)), Some(&'c'));
    }
}
