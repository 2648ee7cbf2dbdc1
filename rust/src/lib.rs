//! k-d tree implementation in Rust with a map-like API.
//!
//! This crate provides an in-memory k-d tree over fixed-arity keys, supporting exact
//! lookup, insertion, per-axis minimum/maximum search, deletion with structural
//! repair, balanced bulk construction and bidirectional traversal.
//!
//! # Examples
//!
//! ```
//! use kdtree::KdTree;
//!
//! let mut tree = KdTree::from_pairs(vec![((3, 1), "a"), ((1, 2), "b"), ((4, 0), "c")]);
//! assert_eq!(tree.get(&(1, 2)), Some(&"b"));
//!
//! let max_y = tree.max_by_axis(1).map(|(key, _)| *key);
//! assert_eq!(max_y, Some((1, 2)));
//!
//! let mut pos = tree.begin();
//! while pos != tree.end() {
//!     let (key, value) = tree.entry_at(pos).unwrap();
//!     println!("{:?} -> {}", key, value);
//!     pos = tree.successor(pos).unwrap();
//! }
//!
//! tree.erase(&(3, 1));
//! assert_eq!(tree.len(), 2);
//! ```

mod arena;
mod construction;
mod delete_operations;
mod error;
mod extremum_operations;
mod get_operations;
mod insert_operations;
mod iteration;
mod key;
mod types;
mod validation;

pub use arena::{Arena, ArenaStats, NodeId, NULL_NODE};
pub use error::{KdResult, KdResultExt, KdTreeError};
pub use iteration::{Cursor, Iter, Keys, Values};
pub use key::{compare_on_axis, KdKey};
pub use types::{KdTree, Position};
