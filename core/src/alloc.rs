//! Opt-in allocation accounting.
//!
//! Install [`CountingAllocator`] as the `#[global_allocator]` of a binary to
//! make [`snapshot`] meaningful; without it every counter stays at zero.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub struct CountingAllocator;

struct AllocTracker {
    installed: AtomicBool,
    allocations: AtomicU64,
    bytes: AtomicU64,
}

static ALLOC_TRACKER: AllocTracker = AllocTracker {
    installed: AtomicBool::new(false),
    allocations: AtomicU64::new(0),
    bytes: AtomicU64::new(0),
};

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
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
            if let Some(size) = realloc_charge(old_layout.size(), new_size) {
                record_alloc(size);
            }
        }
        new_ptr
    }
}

/// Bytes a realloc is charged as a fresh allocation: the whole new block
/// when it grows, nothing when it shrinks or stays put.
pub(crate) fn realloc_charge(old: usize, new: usize) -> Option<usize> {
    (new > old).then_some(new)
}

fn record_alloc(size: usize) {
    if !ALLOC_TRACKER.installed.load(Ordering::Relaxed) {
        ALLOC_TRACKER.installed.store(true, Ordering::Relaxed);
    }
    ALLOC_TRACKER.allocations.fetch_add(1, Ordering::Relaxed);
    ALLOC_TRACKER.bytes.fetch_add(size as u64, Ordering::Relaxed);
}

/// Point-in-time copy of the global counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocSnapshot {
    pub allocations: u64,
    pub bytes: u64,
}

/// Allocation activity between two snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocDelta {
    pub allocations: u64,
    pub bytes: u64,
}

impl AllocSnapshot {
    pub fn since(&self, earlier: &AllocSnapshot) -> AllocDelta {
        AllocDelta {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            bytes: self.bytes.saturating_sub(earlier.bytes),
        }
    }
}

pub fn snapshot() -> AllocSnapshot {
    AllocSnapshot {
        allocations: ALLOC_TRACKER.allocations.load(Ordering::Relaxed),
        bytes: ALLOC_TRACKER.bytes.load(Ordering::Relaxed),
    }
}

/// Whether a [`CountingAllocator`] has served at least one allocation.
pub fn is_installed() -> bool {
    ALLOC_TRACKER.installed.load(Ordering::Relaxed)
}
