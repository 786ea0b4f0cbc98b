//! Per-repetition operation traces.
//!
//! Each function here is exactly what one sink iteration executes, so nothing
//! beyond the workload's own calls may appear in them. Removed values go
//! through [`discard`] so the optimiser cannot drop the removal.

use crate::container::Container;
use crate::scale::{REFILL_COUNT, all_points};
use crate::value::Payload;
use std::hint::black_box;

#[inline(always)]
pub fn discard<T>(removed: Option<T>) {
    black_box(removed);
}

#[inline]
pub fn drain<T, C: Container<T>>(c: &mut C) {
    while !c.is_empty() {
        discard(c.remove());
    }
}

/// Adds `for_index(0..count)`.
#[inline]
pub fn add_sequence<T: Payload, C: Container<T>>(c: &mut C, count: usize) {
    for i in 0..count {
        c.add(T::for_index(i));
    }
}

/// Shared-container seed for `SlowDecrease`: `0..=N/2` for every matrix point.
pub fn slow_decrease_seed<T: Payload, C: Container<T>>(c: &mut C) {
    for point in all_points() {
        add_sequence::<T, C>(c, point.count / 2 + 1);
    }
}

pub fn fill<T: Payload, C: Container<T>>(c: &mut C, n: usize) {
    c.init();
    add_sequence::<T, C>(c, n);
    drain::<T, C>(c);
}

pub fn refill<T: Payload, C: Container<T>>(c: &mut C, n: usize) {
    for _ in 0..REFILL_COUNT {
        add_sequence::<T, C>(c, n);
        drain::<T, C>(c);
    }
}

pub fn refill_full<T: Payload, C: Container<T>>(c: &mut C, n: usize) {
    for _ in 0..REFILL_COUNT {
        add_sequence::<T, C>(c, n);
        for _ in 0..n {
            discard(c.remove());
        }
    }
}

pub fn slow_decrease<T: Payload, C: Container<T>>(c: &mut C, n: usize) {
    for i in 0..n {
        c.add(T::for_index(i));
        discard(c.remove());
        if !c.is_empty() {
            discard(c.remove());
        }
    }
}

pub fn slow_increase<T: Payload, C: Container<T>>(c: &mut C, n: usize) {
    c.init();
    for i in 0..n {
        c.add(T::for_index(i));
        c.add(T::for_index(i));
        discard(c.remove());
    }
    drain::<T, C>(c);
}

pub fn stable<T: Payload, C: Container<T>>(c: &mut C, n: usize) {
    for i in 0..n {
        c.add(T::for_index(i));
        discard(c.remove());
    }
}

/// A short-lived service instance: steady traffic, growth, recovery, a spike,
/// then back to baseline.
pub fn microservice<T: Payload, C: Container<T>>(c: &mut C, n: usize) {
    c.init();

    // steady
    for i in 0..n {
        c.add(T::for_index(i));
        discard(c.remove());
    }

    // slowly increasing
    for i in 0..n {
        c.add(T::for_index(i));
        c.add(T::for_index(i));
        discard(c.remove());
    }

    // slowly decreasing back to normal
    for i in 0..n {
        discard(c.remove());
        if !c.is_empty() {
            discard(c.remove());
        }
        c.add(T::for_index(i));
    }

    // spike
    add_sequence::<T, C>(c, n);

    // steady while under load
    for i in 0..n {
        c.add(T::for_index(i));
        discard(c.remove());
    }

    // spike over
    for _ in 0..n {
        discard(c.remove());
    }

    // steady again
    for i in 0..n {
        c.add(T::for_index(i));
        discard(c.remove());
    }
}
