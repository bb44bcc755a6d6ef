//! Allocation accounting for memory diagnostics.
//!
//! [`TrackingAllocator`] forwards to the system allocator and counts bytes in
//! process-wide atomics. It only records anything once a binary installs it:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: joinbench_core::perf::alloc::TrackingAllocator = joinbench_core::perf::alloc::TrackingAllocator;
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

pub struct TrackingAllocator;

struct AllocTracker {
    current: AtomicUsize,
    peak: AtomicUsize,
    baseline: AtomicUsize,
    allocated: AtomicU64,
    allocations: AtomicU64,
}

static ALLOC_TRACKER: AllocTracker = AllocTracker {
    current: AtomicUsize::new(0),
    peak: AtomicUsize::new(0),
    baseline: AtomicUsize::new(0),
    allocated: AtomicU64::new(0),
    allocations: AtomicU64::new(0),
};

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        record_dealloc(layout.size());
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, old_layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, old_layout, new_size) };
        if !new_ptr.is_null() {
            count_request(new_size);
            adjust_realloc(old_layout.size(), new_size);
        }
        new_ptr
    }
}

fn record_alloc(size: usize) {
    count_request(size);
    grow(size);
}

// A realloc requests the whole new block, not just the delta.
fn count_request(size: usize) {
    ALLOC_TRACKER.allocations.fetch_add(1, Ordering::SeqCst);
    ALLOC_TRACKER.allocated.fetch_add(size as u64, Ordering::SeqCst);
}

fn grow(size: usize) {
    let current = ALLOC_TRACKER
        .current
        .fetch_add(size, Ordering::SeqCst)
        .saturating_add(size);
    ALLOC_TRACKER.peak.fetch_max(current, Ordering::SeqCst);
}

fn record_dealloc(size: usize) {
    ALLOC_TRACKER.current.fetch_sub(size, Ordering::SeqCst);
}

fn adjust_realloc(old: usize, new: usize) {
    if new > old {
        grow(new - old);
    } else if old > new {
        record_dealloc(old - new);
    }
}

/// Allocation activity observed since the last [`reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocStats {
    /// Bytes requested from the allocator, ignoring frees.
    pub allocated_bytes: u64,
    pub allocations: u64,
    /// Highest live heap size above the level at reset.
    pub peak_bytes: u64,
}

pub fn reset() {
    let current = ALLOC_TRACKER.current.load(Ordering::SeqCst);
    ALLOC_TRACKER.baseline.store(current, Ordering::SeqCst);
    ALLOC_TRACKER.peak.store(current, Ordering::SeqCst);
    ALLOC_TRACKER.allocated.store(0, Ordering::SeqCst);
    ALLOC_TRACKER.allocations.store(0, Ordering::SeqCst);
}

pub fn stats_since_reset() -> AllocStats {
    let peak = ALLOC_TRACKER.peak.load(Ordering::SeqCst);
    let baseline = ALLOC_TRACKER.baseline.load(Ordering::SeqCst);
    AllocStats {
        allocated_bytes: ALLOC_TRACKER.allocated.load(Ordering::SeqCst),
        allocations: ALLOC_TRACKER.allocations.load(Ordering::SeqCst),
        peak_bytes: peak.saturating_sub(baseline) as u64,
    }
}

/// Runs `f` between a [`reset`] and a snapshot. The result is still alive
/// when the snapshot is taken, so it counts towards the peak.
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, AllocStats) {
    reset();
    let value = f();
    let stats = stats_since_reset();
    (value, stats)
}
