//! Multi-dimensional key abstraction.
//!
//! A k-d tree key is a fixed-arity tuple of comparable fields. `KdKey` exposes the
//! arity and a per-axis comparison; the full-key `Ord` (lexicographic for tuples and
//! arrays) breaks ties so that every axis induces a strict total order on distinct keys.

use std::cmp::Ordering;

/// A key with a fixed number of independently comparable axes.
///
/// `DIMS` must be at least 1. Two keys are equal iff every axis compares equal, which
/// for the provided impls coincides with `Ord` returning `Ordering::Equal`.
///
/// # Examples
///
/// ```
/// use kdtree::KdKey;
/// use std::cmp::Ordering;
///
/// assert_eq!(<(i32, &str)>::DIMS, 2);
/// assert_eq!((1, "b").cmp_axis(&(2, "a"), 1), Ordering::Greater);
/// assert_eq!(<[u8; 3]>::DIMS, 3);
/// ```
pub trait KdKey: Ord + Clone {
    /// Number of axes (k).
    const DIMS: usize;

    /// Compare `self` and `other` on a single axis. `axis` is always below `DIMS`.
    fn cmp_axis(&self, other: &Self, axis: usize) -> Ordering;
}

impl<T: Ord + Clone, const N: usize> KdKey for [T; N] {
    const DIMS: usize = {
        assert!(N > 0, "k-d tree keys need at least one dimension");
        N
    };

    #[inline]
    fn cmp_axis(&self, other: &Self, axis: usize) -> Ordering {
        self[axis].cmp(&other[axis])
    }
}

macro_rules! impl_tuple_key {
    ($dims:expr; $($name:ident $idx:tt),+) => {
        impl<$($name: Ord + Clone),+> KdKey for ($($name,)+) {
            const DIMS: usize = $dims;

            #[inline]
            fn cmp_axis(&self, other: &Self, axis: usize) -> Ordering {
                match axis {
                    $($idx => self.$idx.cmp(&other.$idx),)+
                    _ => unreachable!("axis {} out of range for {}-dimensional key", axis, $dims),
                }
            }
        }
    };
}

impl_tuple_key!(1; A 0);
impl_tuple_key!(2; A 0, B 1);
impl_tuple_key!(3; A 0, B 1, C 2);
impl_tuple_key!(4; A 0, B 1, C 2, D 3);
impl_tuple_key!(5; A 0, B 1, C 2, D 3, E 4);
impl_tuple_key!(6; A 0, B 1, C 2, D 3, E 4, F 5);

/// Compare two keys on `axis`, falling back to the full key order on a tie.
///
/// This is the ordering every split, lookup and extremum search uses. It returns
/// `Ordering::Equal` only for equal keys.
#[inline]
pub fn compare_on_axis<K: KdKey>(a: &K, b: &K, axis: usize) -> Ordering {
    a.cmp_axis(b, axis).then_with(|| a.cmp(b))
}

/// The discriminant axis following `axis`.
#[inline]
pub(crate) fn next_axis<K: KdKey>(axis: usize) -> usize {
    (axis + 1) % K::DIMS
}

/// Reduce a caller-supplied dimension index into range.
#[inline]
pub(crate) fn wrap_axis<K: KdKey>(dim: usize) -> usize {
    dim % K::DIMS
}
