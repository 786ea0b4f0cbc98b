//! The operation contract every container under test exposes.

use std::cell::Cell;
use std::collections::{LinkedList, VecDeque};

/// Minimal queue/stack contract the workloads are written against.
///
/// Workloads never look past these four operations, so anything that can
/// insert, remove and report emptiness is pluggable.
pub trait Container<T> {
    /// Resets to an empty instance. Must not keep resources from the previous one.
    fn init(&mut self);

    fn add(&mut self, value: T);

    /// Removes one value, or `None` when empty. Must not block or panic on empty.
    fn remove(&mut self) -> Option<T>;

    fn is_empty(&self) -> bool;
}

/// FIFO: push back, pop front.
impl<T> Container<T> for VecDeque<T> {
    #[inline]
    fn init(&mut self) {
        *self = VecDeque::new();
    }

    #[inline]
    fn add(&mut self, value: T) {
        self.push_back(value);
    }

    #[inline]
    fn remove(&mut self) -> Option<T> {
        self.pop_front()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }
}

/// LIFO: push and pop at the end.
impl<T> Container<T> for Vec<T> {
    #[inline]
    fn init(&mut self) {
        *self = Vec::new();
    }

    #[inline]
    fn add(&mut self, value: T) {
        self.push(value);
    }

    #[inline]
    fn remove(&mut self) -> Option<T> {
        self.pop()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// FIFO: push back, pop front.
impl<T> Container<T> for LinkedList<T> {
    #[inline]
    fn init(&mut self) {
        *self = LinkedList::new();
    }

    #[inline]
    fn add(&mut self, value: T) {
        self.push_back(value);
    }

    #[inline]
    fn remove(&mut self) -> Option<T> {
        self.pop_front()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        LinkedList::is_empty(self)
    }
}

/// Binds a container that cannot implement [`Container`] directly (a foreign
/// type with its own method names) through a table of plain functions.
pub struct FnAdapter<S, T> {
    state: S,
    init: fn(&mut S),
    add: fn(&mut S, T),
    remove: fn(&mut S) -> Option<T>,
    is_empty: fn(&S) -> bool,
}

impl<S, T> FnAdapter<S, T> {
    pub fn new(
        state: S,
        init: fn(&mut S),
        add: fn(&mut S, T),
        remove: fn(&mut S) -> Option<T>,
        is_empty: fn(&S) -> bool,
    ) -> Self {
        Self {
            state,
            init,
            add,
            remove,
            is_empty,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn into_inner(self) -> S {
        self.state
    }
}

impl<S, T> Container<T> for FnAdapter<S, T> {
    #[inline]
    fn init(&mut self) {
        (self.init)(&mut self.state)
    }

    #[inline]
    fn add(&mut self, value: T) {
        (self.add)(&mut self.state, value)
    }

    #[inline]
    fn remove(&mut self) -> Option<T> {
        (self.remove)(&mut self.state)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        (self.is_empty)(&self.state)
    }
}

/// Operation tallies recorded by [`Counting`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct OpCounts {
    pub inits: u64,
    pub adds: u64,
    pub removes_found: u64,
    pub removes_empty: u64,
    pub empty_checks: u64,
}

/// Wraps a container and counts every contract call.
///
/// Only for replaying traces; the counters would distort any timing.
pub struct Counting<C> {
    inner: C,
    counts: OpCounts,
    empty_checks: Cell<u64>,
    live: u64,
}

impl<C> Counting<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            counts: OpCounts::default(),
            empty_checks: Cell::new(0),
            live: 0,
        }
    }

    pub fn counts(&self) -> OpCounts {
        OpCounts {
            empty_checks: self.empty_checks.get(),
            ..self.counts
        }
    }

    /// Values held: adds minus successful removes since the last `init`.
    pub fn len(&self) -> u64 {
        self.live
    }

    pub fn reset_counts(&mut self) {
        self.counts = OpCounts::default();
        self.empty_checks.set(0);
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<T, C: Container<T>> Container<T> for Counting<C> {
    fn init(&mut self) {
        self.counts.inits += 1;
        self.live = 0;
        self.inner.init();
    }

    fn add(&mut self, value: T) {
        self.counts.adds += 1;
        self.live += 1;
        self.inner.add(value);
    }

    fn remove(&mut self) -> Option<T> {
        let removed = self.inner.remove();
        if removed.is_some() {
            self.counts.removes_found += 1;
            self.live = self.live.saturating_sub(1);
        } else {
            self.counts.removes_empty += 1;
        }
        removed
    }

    fn is_empty(&self) -> bool {
        self.empty_checks.set(self.empty_checks.get() + 1);
        self.inner.is_empty()
    }
}
