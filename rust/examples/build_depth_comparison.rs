//! Compare bulk construction with one-at-a-time insertion.
//! Sorted input degenerates a k-d tree into a chain; the median-split build does not.

use kdtree::KdTree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use std::time::Instant;

fn report(label: &str, pairs: Vec<([i64; 2], usize)>) {
    let start = Instant::now();
    let bulk = KdTree::from_pairs(pairs.clone());
    let bulk_time = start.elapsed();

    let start = Instant::now();
    let mut sequential = KdTree::new();
    for (key, value) in pairs {
        sequential.insert(key, value);
    }
    let sequential_time = start.elapsed();

    let probe_start = Instant::now();
    for key in bulk.keys() {
        black_box(bulk.find(key));
    }
    let bulk_probe = probe_start.elapsed();

    let probe_start = Instant::now();
    for key in bulk.keys() {
        black_box(sequential.find(key));
    }
    let sequential_probe = probe_start.elapsed();

    println!("{}", label);
    println!(
        "  from_pairs: build {:>10.2?}  height {:>6}  find-all {:>10.2?}",
        bulk_time,
        bulk.height(),
        bulk_probe
    );
    println!(
        "  insert:     build {:>10.2?}  height {:>6}  find-all {:>10.2?}",
        sequential_time,
        sequential.height(),
        sequential_probe
    );
}

fn main() {
    env_logger::init();
    const SIZE: usize = 5_000;

    let sorted: Vec<_> = (0..SIZE).map(|i| ([i as i64, i as i64], i)).collect();
    report("sorted input", sorted);

    let mut rng = StdRng::seed_from_u64(17);
    let random: Vec<_> = (0..SIZE)
        .map(|i| ([rng.gen_range(0..1_000_000), rng.gen_range(0..1_000_000)], i))
        .collect();
    report("random input", random);
}
