use kdtree::{KdTree, KdTreeError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_two_dimensional_walkthrough() {
    init_logging();
    let mut tree = KdTree::new();
    assert!(tree.insert((3, 1), "a"));
    assert!(tree.insert((1, 2), "b"));
    assert!(tree.insert((4, 0), "c"));

    let found = tree.find(&(1, 2));
    assert_eq!(tree.entry_at(found), Ok((&(1, 2), &"b")));

    let min_x = tree.find_min::<0>();
    assert_eq!(tree.entry_at(min_x).unwrap().0, &(1, 2));

    assert!(tree.erase(&(3, 1)));
    assert_eq!(tree.find(&(3, 1)), tree.end());
    assert_eq!(tree.len(), 2);
    tree.check_invariants_detailed().unwrap();
}

#[test]
fn test_overwrite_reports_false_and_keeps_size() {
    let mut tree = KdTree::new();
    for i in 0..10 {
        assert!(tree.insert((i, -i), i));
    }
    for i in 0..10 {
        assert!(!tree.insert((i, -i), i * 100));
    }
    assert_eq!(tree.len(), 10);
    for i in 0..10 {
        assert_eq!(tree.get(&(i, -i)), Some(&(i * 100)));
    }
}

#[test]
fn test_traversal_errors_are_reported() {
    let tree = KdTree::from_pairs(vec![((1, 1), ()), ((2, 2), ()), ((0, 3), ())]);
    assert_eq!(
        tree.successor(tree.end()),
        Err(KdTreeError::IncrementPastEnd)
    );
    assert_eq!(
        tree.predecessor(tree.begin()),
        Err(KdTreeError::DecrementPastBegin)
    );
    assert_eq!(tree.entry_at(tree.end()), Err(KdTreeError::DereferenceEnd));
}

#[test]
fn test_positions_do_not_cross_trees() {
    let a = KdTree::from_pairs(vec![((1, 1), 1)]);
    let mut b = a.clone();
    let pos = a.find(&(1, 1));

    assert!(matches!(b.entry_at(pos), Err(KdTreeError::ForeignPosition(_))));
    assert!(matches!(b.erase_at(pos), Err(KdTreeError::ForeignPosition(_))));
    assert_ne!(a.end(), b.end());
    assert_eq!(b.len(), 1);
}

#[test]
fn test_erase_while_walking_forward() {
    // Erase every entry whose x is even, walking with positions.
    let mut tree: KdTree<(i32, i32), i32> = (0..64).map(|i| ((i, (i * 7) % 64), i)).collect();
    let mut erased = 0;
    let mut pos = tree.begin();
    while pos != tree.end() {
        let (key, _) = tree.entry_at(pos).unwrap();
        if key.0 % 2 == 0 {
            tree.erase_at(pos).unwrap();
            erased += 1;
            // The landing position may already have been visited, so start over.
            pos = tree.begin();
        } else {
            pos = tree.successor(pos).unwrap();
        }
    }
    assert_eq!(erased, 32);
    assert_eq!(tree.len(), 32);
    assert!(tree.keys().all(|key| key.0 % 2 == 1));
    tree.check_invariants_detailed().unwrap();
}

#[test]
fn test_stale_position_after_donor_removal() {
    let mut tree = KdTree::new();
    for key in [(5, 5), (8, 4), (7, 1), (6, 9), (9, 8)] {
        tree.insert(key, ());
    }
    let donor_leaf = tree.find(&(9, 8));
    let root = tree.find(&(5, 5));

    // (6, 9) moves into the root, (9, 8) moves into (6, 9)'s node, (9, 8)'s node goes.
    assert!(tree.erase(&(5, 5)));
    assert!(matches!(
        tree.entry_at(donor_leaf),
        Err(KdTreeError::StalePosition(_))
    ));
    assert_eq!(tree.entry_at(root).unwrap().0, &(6, 9));
    assert!(tree.successor(donor_leaf).unwrap_err().is_position_error());
}

#[test]
fn test_heterogeneous_and_array_keys() {
    let mut cities = KdTree::new();
    cities.insert(("lisbon", 38, -9), 545_000);
    cities.insert(("oslo", 59, 10), 709_000);
    cities.insert(("quito", 0, -78), 2_800_000);
    assert_eq!(cities.min_by_axis(1).map(|(k, _)| k.0), Some("quito"));
    assert_eq!(cities.max_by_axis(2).map(|(k, _)| k.0), Some("oslo"));
    assert_eq!(cities.min_by_axis(0).map(|(k, _)| k.0), Some("lisbon"));

    let cube: KdTree<[u8; 3], ()> = (0..27u8)
        .map(|i| ([i / 9, (i / 3) % 3, i % 3], ()))
        .collect();
    assert_eq!(cube.len(), 27);
    assert_eq!(cube.height(), 5);
    for axis in 0..3 {
        let (min, _) = cube.min_by_axis(axis).unwrap();
        let (max, _) = cube.max_by_axis(axis).unwrap();
        assert_eq!(min[axis], 0);
        assert_eq!(max[axis], 2);
    }
}

#[test]
fn test_single_dimension_tree_iterates_sorted() {
    let tree: KdTree<(i32,), &str> = vec![((3,), "c"), ((1,), "a"), ((2,), "b")]
        .into_iter()
        .collect();
    let keys: Vec<_> = tree.keys().map(|k| k.0).collect();
    assert_eq!(keys, vec![1, 2, 3]);
}

#[test]
fn test_clear_then_reuse() {
    let mut tree = KdTree::from_pairs((0..100).map(|i| ((i, i % 10), i)).collect());
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.iter().count(), 0);
    tree.extend((0..10).map(|i| ((i, 0), i)));
    assert_eq!(tree.len(), 10);
    tree.check_invariants_detailed().unwrap();
}
