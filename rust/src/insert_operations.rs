//! INSERT operations for KdTree.
//!
//! New nodes only ever enter the tree at an empty link at the end of a lookup
//! descent; an existing key has its value replaced in place.

use crate::arena::NULL_NODE;
use crate::key::{compare_on_axis, next_axis, KdKey};
use crate::types::{KdNode, KdTree};
use std::cmp::Ordering;

impl<K: KdKey, V> KdTree<K, V> {
    /// Insert a key-value pair.
    ///
    /// Returns `true` if a new node was created and `false` if the key was already
    /// present, in which case only its value is replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdtree::KdTree;
    ///
    /// let mut tree = KdTree::new();
    /// assert!(tree.insert((1, 2), "one"));
    /// assert!(!tree.insert((1, 2), "uno"));
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.get(&(1, 2)), Some(&"uno"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut parent = NULL_NODE;
        let mut goes_left = false;
        let mut current = self.root;
        let mut axis = 0;

        while current != NULL_NODE {
            let node = &mut self.nodes[current];
            match compare_on_axis(&key, &node.key, axis) {
                Ordering::Equal => {
                    node.value = value;
                    return false;
                }
                Ordering::Less => {
                    parent = current;
                    goes_left = true;
                    current = node.left;
                }
                Ordering::Greater => {
                    parent = current;
                    goes_left = false;
                    current = node.right;
                }
            }
            axis = next_axis::<K>(axis);
        }

        let id = self.nodes.allocate(KdNode::new(key, value, parent));
        if parent == NULL_NODE {
            self.root = id;
        } else if goes_left {
            self.nodes[parent].left = id;
        } else {
            self.nodes[parent].right = id;
        }
        self.len += 1;
        true
    }
}

impl<K: KdKey, V> Extend<(K, V)> for KdTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_links_parent_and_children() {
        let mut tree = KdTree::new();
        assert!(tree.insert((3, 1), "a"));
        assert!(tree.insert((1, 2), "b"));
        assert!(tree.insert((4, 0), "c"));
        assert!(tree.insert((2, 5), "d"));

        let root = &tree.nodes[tree.root];
        assert_eq!(root.key, (3, 1));
        assert_eq!(root.parent, NULL_NODE);

        let left = &tree.nodes[root.left];
        assert_eq!(left.key, (1, 2));
        assert_eq!(left.parent, tree.root);
        assert_eq!(tree.nodes[root.right].key, (4, 0));

        // (2, 5) goes left at the root on x, then right of (1, 2) on y.
        let grandchild = &tree.nodes[left.right];
        assert_eq!(grandchild.key, (2, 5));
        assert_eq!(grandchild.parent, root.left);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_overwrite_keeps_size() {
        let mut tree = KdTree::new();
        tree.insert([1, 1, 1], 1);
        tree.insert([2, 2, 2], 2);
        assert!(!tree.insert([1, 1, 1], 10));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(&[1, 1, 1]), Some(&10));
    }

    #[test]
    fn test_extend() {
        let mut tree = KdTree::new();
        tree.extend((0..20).map(|i| ((i % 4, i / 4), i)));
        tree.extend(vec![((0, 0), 99)]);
        assert_eq!(tree.len(), 20);
        assert_eq!(tree.get(&(0, 0)), Some(&99));
        tree.check_invariants_detailed().unwrap();
    }
}
