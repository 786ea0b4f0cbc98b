//! Binds the built-in containers and payload shapes to the generic engine.

use anyhow::Result;
use clap::ValueEnum;
use dsbench_core::report::Measurement;
use dsbench_core::{Container, Counting, Driver, OpCounts, Payload, PayloadKind, TestValue, Workload};
use std::collections::{LinkedList, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContainerKind {
    #[value(name = "vec-deque", alias = "vec_deque")]
    VecDeque,
    Vec,
    #[value(name = "linked-list", alias = "linked_list")]
    LinkedList,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 3] = [ContainerKind::VecDeque, ContainerKind::Vec, ContainerKind::LinkedList];

    pub fn key(self) -> &'static str {
        match self {
            ContainerKind::VecDeque => "vec_deque",
            ContainerKind::Vec => "vec",
            ContainerKind::LinkedList => "linked_list",
        }
    }

    pub fn discipline(self) -> &'static str {
        match self {
            ContainerKind::VecDeque | ContainerKind::LinkedList => "FIFO",
            ContainerKind::Vec => "LIFO",
        }
    }
}

pub fn measure(driver: &Driver, container: ContainerKind, payload: PayloadKind) -> Result<Vec<Measurement>> {
    match payload {
        PayloadKind::Inline => measure_with::<TestValue>(driver, container, payload),
        PayloadKind::Boxed => measure_with::<Box<TestValue>>(driver, container, payload),
        PayloadKind::Scalar => measure_with::<usize>(driver, container, payload),
    }
}

fn measure_with<T: Payload>(driver: &Driver, container: ContainerKind, payload: PayloadKind) -> Result<Vec<Measurement>> {
    let (key, payload) = (container.key(), payload.key());
    match container {
        ContainerKind::VecDeque => driver.measure::<T, _>(&mut VecDeque::<T>::new(), key, payload),
        ContainerKind::Vec => driver.measure::<T, _>(&mut Vec::<T>::new(), key, payload),
        ContainerKind::LinkedList => driver.measure::<T, _>(&mut LinkedList::<T>::new(), key, payload),
    }
}

/// Operation counts of one replayed repetition.
#[derive(Debug, Clone)]
pub struct TraceOutcome {
    pub workload: &'static str,
    pub container: &'static str,
    pub count: usize,
    /// Sweep-level setup, before any timed region.
    pub setup: OpCounts,
    pub len_before: u64,
    pub repetition: OpCounts,
    pub len_after: u64,
}

pub fn trace(workload: Workload, container: ContainerKind, count: usize) -> Result<TraceOutcome> {
    if !workload.scale_range().contains(count) {
        let valid: Vec<String> = workload.scale_range().points().map(|p| p.label()).collect();
        anyhow::bail!(
            "workload '{}' does not run N={}; valid scale points: {}",
            workload,
            count,
            valid.join(", ")
        );
    }
    Ok(match container {
        ContainerKind::VecDeque => trace_with(VecDeque::new(), workload, container, count),
        ContainerKind::Vec => trace_with(Vec::new(), workload, container, count),
        ContainerKind::LinkedList => trace_with(LinkedList::new(), workload, container, count),
    })
}

fn trace_with<C>(inner: C, workload: Workload, container: ContainerKind, count: usize) -> TraceOutcome
where
    C: Container<TestValue>,
{
    let mut c = Counting::new(inner);
    workload.prepare::<TestValue, _>(&mut c);
    let setup = c.counts();
    let len_before = c.len();

    c.reset_counts();
    workload.repetition::<TestValue, _>(&mut c, count);
    TraceOutcome {
        workload: workload.key(),
        container: container.key(),
        count,
        setup,
        len_before,
        repetition: c.counts(),
        len_after: c.len(),
    }
}
