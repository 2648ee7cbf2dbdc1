//! DELETE operations for KdTree.
//!
//! Only leaves are ever unlinked. Erasing an internal node promotes a donor into its
//! slot: the minimum on the node's own axis from its right subtree, or failing that
//! the maximum on that axis from its left subtree. The donor is then erased from
//! that subtree in turn, using the donor's own discriminant, until the chain ends in
//! a leaf.

use crate::arena::{NodeId, NULL_NODE};
use crate::error::KdResult;
use crate::key::{next_axis, KdKey};
use crate::types::{Extremum, KdTree, Position};
use std::mem;

impl<K: KdKey, V> KdTree<K, V> {
    /// Remove `key` from the tree.
    ///
    /// Returns `true` if an entry was removed and `false` if the key was absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdtree::KdTree;
    ///
    /// let mut tree = KdTree::from_pairs(vec![((3, 1), "a"), ((1, 2), "b"), ((4, 0), "c")]);
    /// assert!(tree.erase(&(3, 1)));
    /// assert!(!tree.erase(&(3, 1)));
    /// assert!(tree.find(&(3, 1)).is_end());
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Remove `key` and return its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove `key` and return the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let (id, axis) = self.locate(self.root, key, 0)?;
        Some(self.remove_node(id, axis))
    }

    /// Erase the entry at `position`.
    ///
    /// The node's discriminant is recovered from its depth. If the node was a leaf
    /// the returned position is its parent (end if it was the root); otherwise it is
    /// the same position, which now holds the promoted donor entry. Erasing the end
    /// position is a no-op that returns it unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdtree::KdTree;
    ///
    /// let mut tree = KdTree::new();
    /// tree.insert((3, 1), "a");
    /// tree.insert((1, 2), "b");
    /// let leaf = tree.find(&(1, 2));
    /// let next = tree.erase_at(leaf).unwrap();
    /// assert_eq!(next, tree.find(&(3, 1)));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn erase_at(&mut self, position: Position) -> KdResult<Position> {
        let Some(id) = self.resolve(position)? else {
            return Ok(position);
        };

        let axis = self.depth_of(id) % K::DIMS;
        let node = &self.nodes[id];
        let landing = if node.is_leaf() { node.parent } else { id };

        self.remove_node(id, axis);
        Ok(self.position_of(landing))
    }

    /// Remove the entry held by `id`, whose discriminant is `axis`, and return it.
    fn remove_node(&mut self, id: NodeId, axis: usize) -> (K, V) {
        // Donor chain: each node's payload will be replaced by the next one's.
        let mut chain = Vec::new();
        let mut current = id;
        let mut axis = axis;

        loop {
            let node = &self.nodes[current];
            let next = next_axis::<K>(axis);
            let donor = if node.right != NULL_NODE {
                self.find_extremum(node.right, axis, next, Extremum::Min)
            } else if node.left != NULL_NODE {
                self.find_extremum(node.left, axis, next, Extremum::Max)
            } else {
                None
            };

            let Some((donor, donor_axis)) = donor else {
                break;
            };
            log::trace!(
                "promoting node {} into node {} (axis {})",
                donor,
                current,
                axis
            );
            chain.push(current);
            current = donor;
            axis = donor_axis;
        }

        self.unlink_leaf(current);
        let leaf = self.nodes.remove(current);
        self.len -= 1;

        let mut carried = (leaf.key, leaf.value);
        for &slot in chain.iter().rev() {
            let node = &mut self.nodes[slot];
            let key = mem::replace(&mut node.key, carried.0);
            let value = mem::replace(&mut node.value, carried.1);
            carried = (key, value);
        }
        carried
    }
}

impl<K, V> KdTree<K, V> {
    /// Detach a leaf from its parent (or clear the root).
    fn unlink_leaf(&mut self, leaf: NodeId) {
        let parent = self.nodes[leaf].parent;
        if parent == NULL_NODE {
            self.root = NULL_NODE;
            return;
        }
        let parent = &mut self.nodes[parent];
        if parent.left == leaf {
            parent.left = NULL_NODE;
        } else {
            parent.right = NULL_NODE;
        }
    }

    /// Number of edges between `id` and the root.
    pub(crate) fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id].parent;
        while current != NULL_NODE {
            depth += 1;
            current = self.nodes[current].parent;
        }
        depth
    }
}
