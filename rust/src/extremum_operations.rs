//! Per-axis minimum and maximum search for KdTree.
//!
//! At a node that splits on the searched axis only one child can hold a better
//! candidate; at any other node both children must be searched. Candidates are
//! compared on the searched axis with ties broken by the full key, so the result is
//! unique.

use crate::arena::{NodeId, NULL_NODE};
use crate::key::{compare_on_axis, next_axis, wrap_axis, KdKey};
use crate::types::{Extremum, KdTree, Position};

impl<K: KdKey, V> KdTree<K, V> {
    /// Position of the entry with the smallest coordinate on axis `D`.
    ///
    /// `D` is reduced modulo the key arity. Returns the end position for an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdtree::KdTree;
    ///
    /// let tree = KdTree::from_pairs(vec![((3, 1), 'a'), ((1, 2), 'b'), ((4, 0), 'c')]);
    /// let (key, _) = tree.entry_at(tree.find_min::<0>()).unwrap();
    /// assert_eq!(key, &(1, 2));
    /// let (key, _) = tree.entry_at(tree.find_min::<1>()).unwrap();
    /// assert_eq!(key, &(4, 0));
    /// ```
    pub fn find_min<const D: usize>(&self) -> Position {
        self.find_min_dim(D)
    }

    /// Position of the entry with the largest coordinate on axis `D`.
    pub fn find_max<const D: usize>(&self) -> Position {
        self.find_max_dim(D)
    }

    /// Runtime-dimension variant of [`find_min`](Self::find_min); `dim` wraps modulo k.
    pub fn find_min_dim(&self, dim: usize) -> Position {
        match self.find_extremum(self.root, wrap_axis::<K>(dim), 0, Extremum::Min) {
            Some((id, _)) => self.position_of(id),
            None => self.end(),
        }
    }

    /// Runtime-dimension variant of [`find_max`](Self::find_max); `dim` wraps modulo k.
    pub fn find_max_dim(&self, dim: usize) -> Position {
        match self.find_extremum(self.root, wrap_axis::<K>(dim), 0, Extremum::Max) {
            Some((id, _)) => self.position_of(id),
            None => self.end(),
        }
    }

    /// Entry with the smallest coordinate on axis `dim` (wrapped modulo k).
    pub fn min_by_axis(&self, dim: usize) -> Option<(&K, &V)> {
        self.entry_of(self.find_extremum(self.root, wrap_axis::<K>(dim), 0, Extremum::Min))
    }

    /// Entry with the largest coordinate on axis `dim` (wrapped modulo k).
    pub fn max_by_axis(&self, dim: usize) -> Option<(&K, &V)> {
        self.entry_of(self.find_extremum(self.root, wrap_axis::<K>(dim), 0, Extremum::Max))
    }

    /// Search the subtree rooted at `start` (whose discriminant is `axis`) for the
    /// extremal node on `target`.
    ///
    /// Returns the node together with its own discriminant axis, or `None` for an
    /// empty subtree.
    pub(crate) fn find_extremum(
        &self,
        start: NodeId,
        target: usize,
        axis: usize,
        extremum: Extremum,
    ) -> Option<(NodeId, usize)> {
        let mut best: Option<(NodeId, usize)> = None;
        let mut pending = vec![(start, axis)];

        while let Some((id, axis)) = pending.pop() {
            if id == NULL_NODE {
                continue;
            }
            let node = &self.nodes[id];
            let wins = match best {
                None => true,
                Some((best_id, _)) => {
                    compare_on_axis(&node.key, &self.nodes[best_id].key, target)
                        == extremum.winning()
                }
            };
            if wins {
                best = Some((id, axis));
            }

            let next = next_axis::<K>(axis);
            pending.push((extremum.near_child(node), next));
            if target != axis {
                pending.push((extremum.far_child(node), next));
            }
        }

        best
    }

    fn entry_of(&self, found: Option<(NodeId, usize)>) -> Option<(&K, &V)> {
        let node = &self.nodes[found?.0];
        Some((&node.key, &node.value))
    }
}
