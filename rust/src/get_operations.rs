//! GET operations for KdTree.
//!
//! This module contains key lookup, value retrieval and dereferencing of positions.

use crate::arena::{NodeId, NULL_NODE};
use crate::error::{KdResult, KdTreeError, TreeResult};
use crate::key::{compare_on_axis, next_axis, KdKey};
use crate::types::{KdTree, Position};
use std::cmp::Ordering;

impl<K: KdKey, V> KdTree<K, V> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Find the position of `key`, or the end position if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdtree::KdTree;
    ///
    /// let mut tree = KdTree::new();
    /// tree.insert((3, 1), "a");
    /// let pos = tree.find(&(3, 1));
    /// assert_eq!(tree.entry_at(pos).unwrap(), (&(3, 1), &"a"));
    /// assert!(tree.find(&(1, 3)).is_end());
    /// ```
    pub fn find(&self, key: &K) -> Position {
        match self.locate(self.root, key, 0) {
            Some((id, _)) => self.position_of(id),
            None => self.end(),
        }
    }

    /// Get a reference to the value associated with a key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Get the stored key and its value.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let (id, _) = self.locate(self.root, key, 0)?;
        let node = &self.nodes[id];
        Some((&node.key, &node.value))
    }

    /// Get a mutable reference to the value associated with a key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (id, _) = self.locate(self.root, key, 0)?;
        Some(&mut self.nodes[id].value)
    }

    /// Check if key exists in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(self.root, key, 0).is_some()
    }

    // ============================================================================
    // LOOKUP HELPERS
    // ============================================================================

    /// Descend from `start`, whose discriminant is `axis`, looking for `key`.
    ///
    /// Returns the matching node and its discriminant axis.
    pub(crate) fn locate(&self, start: NodeId, key: &K, axis: usize) -> Option<(NodeId, usize)> {
        let mut current = start;
        let mut axis = axis;

        while current != NULL_NODE {
            let node = &self.nodes[current];
            current = match compare_on_axis(key, &node.key, axis) {
                Ordering::Equal => return Some((current, axis)),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            axis = next_axis::<K>(axis);
        }

        None
    }
}

impl<K, V> KdTree<K, V> {
    /// Read the entry at a position.
    ///
    /// Fails with [`KdTreeError::DereferenceEnd`] for the end position, and with a
    /// position error if the position is stale or belongs to another tree.
    pub fn entry_at(&self, position: Position) -> KdResult<(&K, &V)> {
        let id = self.resolve(position)?.ok_or(KdTreeError::DereferenceEnd)?;
        let node = &self.nodes[id];
        Ok((&node.key, &node.value))
    }

    /// Mutable access to the value at a position. Keys are never handed out mutably.
    pub fn value_at_mut(&mut self, position: Position) -> KdResult<&mut V> {
        let id = self.resolve(position)?.ok_or(KdTreeError::DereferenceEnd)?;
        Ok(&mut self.nodes[id].value)
    }

    /// Validate a position against this tree.
    ///
    /// Returns `None` for the end position and the live node id otherwise.
    pub(crate) fn resolve(&self, position: Position) -> TreeResult<Option<NodeId>> {
        if position.tree != self.id {
            return Err(KdTreeError::foreign_position(self.id, position.tree));
        }
        if position.is_end() {
            return Ok(None);
        }
        if !self.nodes.is_live(position.node, position.generation) {
            return Err(KdTreeError::stale_position(
                position.node,
                position.generation,
            ));
        }
        Ok(Some(position.node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KdTree<(i32, i32), &'static str> {
        let mut tree = KdTree::new();
        tree.insert((3, 1), "a");
        tree.insert((1, 2), "b");
        tree.insert((4, 0), "c");
        tree
    }

    #[test]
    fn test_find_and_get() {
        let tree = sample();
        assert_eq!(tree.get(&(1, 2)), Some(&"b"));
        assert_eq!(tree.get(&(2, 1)), None);
        assert!(tree.contains_key(&(4, 0)));
        assert!(!tree.contains_key(&(0, 4)));
        assert_eq!(tree.get_key_value(&(3, 1)), Some((&(3, 1), &"a")));

        let pos = tree.find(&(4, 0));
        assert!(!pos.is_end());
        assert_eq!(tree.entry_at(pos), Ok((&(4, 0), &"c")));
        assert_eq!(tree.find(&(9, 9)), tree.end());
    }

    #[test]
    fn test_locate_reports_axis_by_depth() {
        let tree = sample();
        assert_eq!(tree.locate(tree.root, &(3, 1), 0).map(|(_, axis)| axis), Some(0));
        assert_eq!(tree.locate(tree.root, &(1, 2), 0).map(|(_, axis)| axis), Some(1));
    }

    #[test]
    fn test_tied_axis_descends_by_full_key() {
        let mut tree = KdTree::new();
        tree.insert((5, 5), 0);
        tree.insert((5, 1), 1);
        tree.insert((5, 9), 2);
        let root = &tree.nodes[tree.root];
        assert_eq!(tree.nodes[root.left].key, (5, 1));
        assert_eq!(tree.nodes[root.right].key, (5, 9));
        assert_eq!(tree.get(&(5, 9)), Some(&2));
    }

    #[test]
    fn test_get_mut_and_value_at_mut() {
        let mut tree = sample();
        *tree.get_mut(&(3, 1)).unwrap() = "A";
        let pos = tree.find(&(4, 0));
        *tree.value_at_mut(pos).unwrap() = "C";
        assert_eq!(tree.get(&(3, 1)), Some(&"A"));
        assert_eq!(tree.get(&(4, 0)), Some(&"C"));
    }

    #[test]
    fn test_dereference_errors() {
        let tree = sample();
        assert_eq!(tree.entry_at(tree.end()), Err(KdTreeError::DereferenceEnd));

        let other = sample();
        let foreign = other.find(&(3, 1));
        assert!(matches!(
            tree.entry_at(foreign),
            Err(KdTreeError::ForeignPosition(_))
        ));
    }
}
