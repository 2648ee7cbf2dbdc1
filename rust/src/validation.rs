//! Validation and debugging utilities for KdTree.
//!
//! This module contains invariant checking, shape inspection and debug output used
//! by the tests and available to callers who want to audit a tree.

use crate::arena::{ArenaStats, NodeId, NULL_NODE};
use crate::error::{KdResult, KdTreeError, TreeResult};
use crate::key::{compare_on_axis, next_axis, KdKey};
use crate::types::KdTree;
use std::cmp::Ordering;
use std::fmt::Debug;

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K: KdKey, V> KdTree<K, V> {
    /// Check if the tree maintains its invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// Verifies parent links, the discriminant ordering against every ancestor, the
    /// cached length, arena bookkeeping and that traversal yields each key once.
    pub fn check_invariants_detailed(&self) -> KdResult<()> {
        let reachable = self.check_structure()?;

        if reachable != self.len {
            return Err(KdTreeError::data_integrity(
                "Length check",
                &format!("{} reachable nodes but len() is {}", reachable, self.len),
            ));
        }

        let allocated = self.nodes.len();
        if allocated != self.len {
            return Err(KdTreeError::data_integrity(
                "Arena consistency check",
                &format!("{} in tree vs {} in arena", self.len, allocated),
            ));
        }

        self.check_traversal()
    }

    /// Alias for check_invariants_detailed (for test compatibility).
    pub fn validate(&self) -> KdResult<()> {
        self.check_invariants_detailed()
    }

    /// Walk every node, checking links and ordering. Returns the number of nodes seen.
    fn check_structure(&self) -> TreeResult<usize> {
        if self.root == NULL_NODE {
            return Ok(0);
        }
        if self.nodes[self.root].parent != NULL_NODE {
            return Err(KdTreeError::corrupted_tree("Root", "root has a parent link"));
        }

        // Tightest ancestor bounds per axis: lower[a] < key < upper[a] on axis a.
        let unbounded: Vec<Option<NodeId>> = vec![None; K::DIMS];
        let mut pending = vec![(self.root, 0usize, unbounded.clone(), unbounded)];
        let mut seen = 0usize;

        while let Some((id, axis, lower, upper)) = pending.pop() {
            seen += 1;
            if seen > self.len {
                return Err(KdTreeError::corrupted_tree(
                    "Structure",
                    "more reachable nodes than entries (cycle or shared child)",
                ));
            }

            let node = self.nodes.get(id).ok_or_else(|| {
                KdTreeError::corrupted_tree("Structure", &format!("link to missing node {}", id))
            })?;

            for bound_axis in 0..K::DIMS {
                if let Some(bound) = lower[bound_axis] {
                    self.check_order(id, bound, bound_axis, Ordering::Greater)?;
                }
                if let Some(bound) = upper[bound_axis] {
                    self.check_order(id, bound, bound_axis, Ordering::Less)?;
                }
            }

            let next = next_axis::<K>(axis);
            for (child, is_left) in [(node.left, true), (node.right, false)] {
                if child == NULL_NODE {
                    continue;
                }
                let child_node = self.nodes.get(child).ok_or_else(|| {
                    KdTreeError::corrupted_tree(
                        "Structure",
                        &format!("node {} links to missing child {}", id, child),
                    )
                })?;
                if child_node.parent != id {
                    return Err(KdTreeError::corrupted_tree(
                        "Parent link",
                        &format!(
                            "node {} points to parent {}, expected {}",
                            child, child_node.parent, id
                        ),
                    ));
                }

                let mut lower = lower.clone();
                let mut upper = upper.clone();
                if is_left {
                    upper[axis] = Some(id);
                } else {
                    lower[axis] = Some(id);
                }
                pending.push((child, next, lower, upper));
            }
        }

        Ok(seen)
    }

    fn check_order(
        &self,
        id: NodeId,
        bound: NodeId,
        axis: usize,
        want: Ordering,
    ) -> TreeResult<()> {
        if compare_on_axis(&self.nodes[id].key, &self.nodes[bound].key, axis) == want {
            return Ok(());
        }
        let side = if want == Ordering::Less { "left" } else { "right" };
        Err(KdTreeError::corrupted_tree(
            "Discriminant",
            &format!(
                "node {} is in the {} subtree of node {} but violates its axis {} ordering",
                id, side, bound, axis
            ),
        ))
    }

    /// Check that traversal yields `len()` distinct keys.
    fn check_traversal(&self) -> TreeResult<()> {
        let mut keys: Vec<&K> = self.keys().collect();
        if keys.len() != self.len {
            return Err(KdTreeError::data_integrity(
                "Traversal check",
                &format!(
                    "iterator returned {} keys but tree has {} items",
                    keys.len(),
                    self.len
                ),
            ));
        }

        keys.sort();
        if keys.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(KdTreeError::data_integrity(
                "Traversal check",
                "iterator returned a duplicate key",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// DEBUGGING AND TESTING UTILITIES
// ============================================================================

impl<K, V> KdTree<K, V> {
    /// Number of levels in the tree (0 when empty).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending = Vec::new();
        if self.root != NULL_NODE {
            pending.push((self.root, 1));
        }
        while let Some((id, depth)) = pending.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            for child in [node.left, node.right] {
                if child != NULL_NODE {
                    pending.push((child, depth + 1));
                }
            }
        }
        height
    }

    /// Node arena statistics.
    pub fn arena_stats(&self) -> ArenaStats {
        self.nodes.stats()
    }

    /// Returns all key-value pairs as a vector (for testing/debugging).
    pub fn slice(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Log the tree shape at debug level, one line per node.
    pub fn dump_tree(&self)
    where
        K: Debug,
    {
        log::debug!("k-d tree {} ({} entries):", self.id, self.len);
        let mut pending = Vec::new();
        if self.root != NULL_NODE {
            pending.push((self.root, 0usize, "root"));
        }
        while let Some((id, depth, side)) = pending.pop() {
            let node = &self.nodes[id];
            log::debug!("{}{} [id={}]: {:?}", "  ".repeat(depth), side, id, node.key);
            if node.right != NULL_NODE {
                pending.push((node.right, depth + 1, "R"));
            }
            if node.left != NULL_NODE {
                pending.push((node.left, depth + 1, "L"));
            }
        }
    }
}
