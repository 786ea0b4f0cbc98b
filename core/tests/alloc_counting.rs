use dsbench_core::alloc::{self, CountingAllocator};
use dsbench_core::{Driver, HarnessConfig, StopwatchConfig, TestValue, Workload};
use std::collections::{LinkedList, VecDeque};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn quick_config(workloads: Vec<Workload>) -> HarnessConfig {
    HarnessConfig {
        workloads,
        max_count: Some(100),
        stopwatch: StopwatchConfig {
            target_time_ms: 0,
            max_iterations: 1,
        },
    }
}

#[test]
fn test_snapshot_sees_heap_activity() {
    let before = alloc::snapshot();
    let data: Vec<u64> = (0..1024).collect();
    let after = alloc::snapshot();
    drop(data);

    let delta = after.since(&before);
    assert!(alloc::is_installed());
    assert!(delta.allocations >= 1);
    assert!(delta.bytes >= 1024 * 8);
}

#[test]
fn test_growing_buffer_counts_full_new_block() {
    let mut data: Vec<u64> = Vec::with_capacity(16);
    data.push(1);
    let before = alloc::snapshot();
    data.reserve_exact(1024);
    let after = alloc::snapshot();
    assert!(data.capacity() >= 1024);
    drop(data);

    let delta = after.since(&before);
    assert!(delta.allocations >= 1);
    // the grown block is charged in full, not just the growth
    assert!(delta.bytes >= 1024 * 8, "observed {}", delta.bytes);
}

#[test]
fn test_linked_list_allocates_per_value() {
    let driver = Driver::new(quick_config(vec![Workload::Fill]));
    let mut list = LinkedList::<TestValue>::new();
    let measurements = driver
        .measure::<TestValue, _>(&mut list, "linked_list", "inline")
        .expect("measure fill");

    let at_100 = measurements
        .iter()
        .find(|m| m.scale == 100)
        .expect("fill runs the 100 point");
    // one node per value; other tests may allocate concurrently, so only a floor
    assert!(at_100.allocs_per_op >= 100.0, "observed {}", at_100.allocs_per_op);
}

#[test]
fn test_measure_tags_every_stable_region() {
    let driver = Driver::new(quick_config(vec![Workload::Stable]));
    let mut queue = VecDeque::<TestValue>::new();
    let measurements = driver
        .measure::<TestValue, _>(&mut queue, "vec_deque", "inline")
        .expect("measure stable");

    let labels: Vec<usize> = measurements.iter().map(|m| m.scale).collect();
    assert_eq!(labels, vec![1, 10, 100]);
    assert!(measurements.iter().all(|m| m.workload == "stable" && m.iterations == 1));
}
