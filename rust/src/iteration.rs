//! Traversal for KdTree.
//!
//! The traversal order is the in-order sequence of the tree (left subtree, node,
//! right subtree). It visits every entry exactly once but does not follow the sort
//! order of any single axis. Steps use parent links, so each edge is crossed at most
//! twice over a full traversal.

use crate::arena::{NodeId, NULL_NODE};
use crate::error::{KdResult, KdTreeError};
use crate::types::{KdTree, Position};
use std::iter::FusedIterator;

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over key-value pairs in traversal order.
pub struct Iter<'a, K, V> {
    tree: &'a KdTree<K, V>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
}

/// Iterator over keys in traversal order.
pub struct Keys<'a, K, V> {
    items: Iter<'a, K, V>,
}

/// Iterator over values in traversal order.
pub struct Values<'a, K, V> {
    items: Iter<'a, K, V>,
}

/// A bidirectional cursor over a borrowed tree.
///
/// Unlike [`Iter`], a cursor can sit on the end position, step back from it, and
/// reports stepping past either end as an error.
///
/// # Examples
///
/// ```
/// use kdtree::{KdTree, KdTreeError};
///
/// let tree = KdTree::from_pairs(vec![((2, 0), 'b'), ((1, 5), 'a')]);
/// let mut cursor = tree.cursor(tree.end());
/// cursor.move_prev().unwrap();
/// assert!(cursor.key().is_some());
/// assert_eq!(cursor.move_prev().and_then(|_| cursor.move_prev()),
///            Err(KdTreeError::DecrementPastBegin));
/// ```
pub struct Cursor<'a, K, V> {
    tree: &'a KdTree<K, V>,
    position: Position,
}

// ============================================================================
// KDTREE TRAVERSAL METHODS
// ============================================================================

impl<K, V> KdTree<K, V> {
    /// Position of the first entry in traversal order (end for an empty tree).
    pub fn begin(&self) -> Position {
        if self.root == NULL_NODE {
            return self.end();
        }
        self.position_of(self.leftmost(self.root))
    }

    /// Position following `position`.
    ///
    /// Fails with [`KdTreeError::IncrementPastEnd`] when called on the end position.
    pub fn successor(&self, position: Position) -> KdResult<Position> {
        let id = self
            .resolve(position)?
            .ok_or(KdTreeError::IncrementPastEnd)?;
        Ok(self.position_of(self.next_node(id)))
    }

    /// Position preceding `position`.
    ///
    /// Stepping back from the end lands on the last entry. Fails with
    /// [`KdTreeError::DecrementPastBegin`] when called on the begin position, which
    /// for an empty tree is the end position.
    pub fn predecessor(&self, position: Position) -> KdResult<Position> {
        let node = self.resolve(position)?;
        if position == self.begin() {
            return Err(KdTreeError::DecrementPastBegin);
        }
        let id = match node {
            Some(id) => self.prev_node(id),
            None => self.rightmost(self.root),
        };
        Ok(self.position_of(id))
    }

    /// Returns an iterator over all key-value pairs in traversal order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Returns an iterator over all keys in traversal order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { items: self.iter() }
    }

    /// Returns an iterator over all values in traversal order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { items: self.iter() }
    }

    /// Returns a cursor placed at `position`.
    ///
    /// The position is validated lazily, on the first read or move.
    pub fn cursor(&self, position: Position) -> Cursor<'_, K, V> {
        Cursor {
            tree: self,
            position,
        }
    }

    /// Returns a cursor placed at the first entry.
    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        self.cursor(self.begin())
    }

    // ============================================================================
    // TRAVERSAL HELPERS
    // ============================================================================

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while self.nodes[id].left != NULL_NODE {
            id = self.nodes[id].left;
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while self.nodes[id].right != NULL_NODE {
            id = self.nodes[id].right;
        }
        id
    }

    /// In-order successor, `NULL_NODE` after the last entry.
    fn next_node(&self, id: NodeId) -> NodeId {
        let node = &self.nodes[id];
        if node.right != NULL_NODE {
            return self.leftmost(node.right);
        }

        // Climb until we arrive from a left link.
        let mut child = id;
        let mut parent = node.parent;
        while parent != NULL_NODE && self.nodes[parent].left != child {
            child = parent;
            parent = self.nodes[parent].parent;
        }
        parent
    }

    /// In-order predecessor, `NULL_NODE` before the first entry.
    fn prev_node(&self, id: NodeId) -> NodeId {
        let node = &self.nodes[id];
        if node.left != NULL_NODE {
            return self.rightmost(node.left);
        }

        let mut child = id;
        let mut parent = node.parent;
        while parent != NULL_NODE && self.nodes[parent].right != child {
            child = parent;
            parent = self.nodes[parent].parent;
        }
        parent
    }
}

// ============================================================================
// ITER IMPLEMENTATION
// ============================================================================

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a KdTree<K, V>) -> Self {
        let (front, back) = if tree.root == NULL_NODE {
            (NULL_NODE, NULL_NODE)
        } else {
            (tree.leftmost(tree.root), tree.rightmost(tree.root))
        };
        Self {
            tree,
            front,
            back,
            remaining: tree.len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let node = &tree.nodes[self.front];
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = tree.next_node(self.front);
        }
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let node = &tree.nodes[self.back];
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = tree.prev_node(self.back);
        }
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> IntoIterator for &'a KdTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// KEY AND VALUE ITERATORS
// ============================================================================

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(key, _)| key)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(_, value)| value)
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

// ============================================================================
// CURSOR IMPLEMENTATION
// ============================================================================

impl<'a, K, V> Cursor<'a, K, V> {
    /// Advance to the next entry; fails at the end position.
    pub fn move_next(&mut self) -> KdResult<()> {
        self.position = self.tree.successor(self.position)?;
        Ok(())
    }

    /// Step back to the previous entry; fails at the begin position.
    pub fn move_prev(&mut self) -> KdResult<()> {
        self.position = self.tree.predecessor(self.position)?;
        Ok(())
    }

    /// Entry under the cursor, `None` at the end or for an unusable position.
    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.tree.entry_at(self.position).ok()
    }

    pub fn key(&self) -> Option<&'a K> {
        self.entry().map(|(key, _)| key)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.entry().map(|(_, value)| value)
    }

    /// Current position, usable with the tree's position-based methods.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KdTree<(i32, i32), i32> {
        let mut tree = KdTree::new();
        for (i, key) in [(5, 5), (2, 8), (8, 2), (1, 1), (3, 9), (7, 7), (9, 0)]
            .into_iter()
            .enumerate()
        {
            tree.insert(key, i as i32);
        }
        tree
    }

    #[test]
    fn test_in_order_sequence() {
        let tree = sample();
        // Left subtree of (2, 8) on y: (1, 1); right: (3, 9).
        let keys: Vec<_> = tree.keys().copied().collect();
        assert_eq!(
            keys,
            vec![(1, 1), (2, 8), (3, 9), (5, 5), (9, 0), (8, 2), (7, 7)]
        );
    }

    #[test]
    fn test_double_ended_and_exact_size() {
        let tree = sample();
        let forward: Vec<_> = tree.iter().collect();
        let mut backward: Vec<_> = tree.iter().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);

        let mut iter = tree.iter();
        assert_eq!(iter.len(), 7);
        iter.next();
        iter.next_back();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.count(), 5);
    }

    #[test]
    fn test_meeting_in_the_middle() {
        let tree = sample();
        let mut iter = tree.keys();
        let mut seen = Vec::new();
        while let Some(front) = iter.next() {
            seen.push(*front);
            if let Some(back) = iter.next_back() {
                seen.push(*back);
            }
        }
        assert_eq!(seen.len(), 7);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_successor_walk_matches_iter() {
        let tree = sample();
        let mut pos = tree.begin();
        let mut walked = Vec::new();
        while pos != tree.end() {
            walked.push(*tree.entry_at(pos).unwrap().0);
            pos = tree.successor(pos).unwrap();
        }
        let expected: Vec<_> = tree.keys().copied().collect();
        assert_eq!(walked, expected);
        assert_eq!(tree.successor(pos), Err(KdTreeError::IncrementPastEnd));
    }

    #[test]
    fn test_predecessor_walk_from_end() {
        let tree = sample();
        let mut pos = tree.end();
        let mut walked = Vec::new();
        while pos != tree.begin() {
            pos = tree.predecessor(pos).unwrap();
            walked.push(*tree.entry_at(pos).unwrap().0);
        }
        let expected: Vec<_> = tree.keys().rev().copied().collect();
        assert_eq!(walked, expected);
        assert_eq!(tree.predecessor(pos), Err(KdTreeError::DecrementPastBegin));
    }

    #[test]
    fn test_empty_tree_traversal_errors() {
        let tree: KdTree<(i32, i32), ()> = KdTree::new();
        assert_eq!(tree.begin(), tree.end());
        assert_eq!(tree.successor(tree.end()), Err(KdTreeError::IncrementPastEnd));
        assert_eq!(
            tree.predecessor(tree.end()),
            Err(KdTreeError::DecrementPastBegin)
        );
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn test_cursor_round_trip() {
        let tree = sample();
        let mut cursor = tree.cursor_front();
        assert_eq!(cursor.key(), Some(&(1, 1)));
        for _ in 0..7 {
            cursor.move_next().unwrap();
        }
        assert!(cursor.is_end());
        assert_eq!(cursor.entry(), None);
        assert_eq!(cursor.move_next(), Err(KdTreeError::IncrementPastEnd));

        cursor.move_prev().unwrap();
        assert_eq!(cursor.key(), Some(&(7, 7)));
        assert_eq!(cursor.value(), Some(&5));
        assert_eq!(cursor.position(), tree.find(&(7, 7)));
    }

    #[test]
    fn test_into_iterator_for_reference() {
        let tree = sample();
        let mut total = 0;
        for (_, value) in &tree {
            total += value;
        }
        assert_eq!(total, (0..7).sum());
    }
}
