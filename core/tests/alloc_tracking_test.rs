//! Allocation accounting with the tracking allocator installed.
//!
//! Kept to a single test so no other test thread allocates while counting.

use joinbench_core::{
    Dataset, StrategyKind,
    perf::alloc::{self, TrackingAllocator},
};
use std::hint::black_box;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

#[test]
fn counts_strategy_allocations() {
    let (buf, stats) = alloc::measure(|| black_box(vec![0u8; 4096]));
    assert!(stats.allocated_bytes >= 4096, "{:?}", stats);
    assert!(stats.allocations >= 1);
    assert!(stats.peak_bytes >= 4096);
    drop(buf);

    alloc::reset();
    let idle = alloc::stats_since_reset();
    assert_eq!(idle.allocations, 0);
    assert_eq!(idle.peak_bytes, 0);

    // push growth re-requests the whole buffer on every realloc
    let (grown, growing) = alloc::measure(|| {
        let mut values = Vec::<u64>::new();
        for i in 0..1_000 {
            values.push(i);
        }
        black_box(values)
    });
    drop(grown);
    let (sized, presized) = alloc::measure(|| {
        let mut values = Vec::<u64>::with_capacity(1_000);
        for i in 0..1_000 {
            values.push(i);
        }
        black_box(values)
    });
    drop(sized);
    assert_eq!(presized.allocations, 1, "{:?}", presized);
    assert_eq!(presized.allocated_bytes, 8_000, "{:?}", presized);
    assert!(growing.allocations > 1, "{:?}", growing);
    assert!(growing.allocated_bytes > 2 * 8_000, "{:?}", growing);
    assert!(growing.peak_bytes >= 8_000 && growing.peak_bytes < growing.allocated_bytes);

    let dataset = Dataset::generate(1_000);
    let (rows, precomputed) = alloc::measure(|| StrategyKind::DictOnTheFly.run(&dataset).map(|v| v.len()));
    assert_eq!(rows.unwrap(), 1_000);
    let (rows, per_call) = alloc::measure(|| StrategyKind::DictCreated.run(&dataset).map(|v| v.len()));
    assert_eq!(rows.unwrap(), 1_000);
    // building the map inside the call costs more than reusing the precomputed one
    assert!(per_call.allocated_bytes > precomputed.allocated_bytes, "{:?} vs {:?}", per_call, precomputed);
}
