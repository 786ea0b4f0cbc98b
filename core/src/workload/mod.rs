//! The catalogue of traffic patterns.
//!
//! A workload is three things: which scale points it runs, what one
//! repetition does (see [`trace`]), and where container setup happens
//! relative to the timed region. The setup split is what each workload
//! measures: `Refill`, `RefillFull`, `SlowDecrease` and `Stable` keep
//! construction and pre-fill out of the timed region to isolate steady-state
//! add/remove cost, while `Fill`, `SlowIncrease` and `Microservice` time
//! construction together with the operations, as a short-lived service
//! instance would experience it.

pub mod trace;

use crate::container::Container;
use crate::scale::{FILL_COUNT, ScalePoint, ScaleRange};
use crate::sink::MeasurementSink;
use crate::value::Payload;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workload {
    Fill,
    Refill,
    RefillFull,
    SlowDecrease,
    SlowIncrease,
    Stable,
    Microservice,
}

/// Where a workload (re)initialises its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupPolicy {
    /// `init` runs inside the timed region on every repetition.
    PerRepetition,
    /// `init` runs once per scale point, before its timed region.
    PerScalePoint,
    /// `init` and pre-fill run once before the sweep; one container is shared
    /// by every scale point and drained after the last one.
    SharedAcrossSweep,
}

impl SetupPolicy {
    pub fn describe(self) -> &'static str {
        match self {
            SetupPolicy::PerRepetition => "timed init per repetition",
            SetupPolicy::PerScalePoint => "untimed init per scale point",
            SetupPolicy::SharedAcrossSweep => "shared container across sweep",
        }
    }
}

impl Workload {
    pub const ALL: [Workload; 7] = [
        Workload::Fill,
        Workload::Refill,
        Workload::RefillFull,
        Workload::SlowDecrease,
        Workload::SlowIncrease,
        Workload::Stable,
        Workload::Microservice,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Workload::Fill => "fill",
            Workload::Refill => "refill",
            Workload::RefillFull => "refill_full",
            Workload::SlowDecrease => "slow_decrease",
            Workload::SlowIncrease => "slow_increase",
            Workload::Stable => "stable",
            Workload::Microservice => "microservice",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Workload::Fill => "Add N values, then drain",
            Workload::Refill => "Fill and drain 100 times on one instance",
            Workload::RefillFull => "Fill and remove N, 100 times, on top of 10k resident values",
            Workload::SlowDecrease => "Add 1, remove up to 2, on a shared pre-seeded instance",
            Workload::SlowIncrease => "Add 2, remove 1, then drain",
            Workload::Stable => "Add 1, remove 1, on top of 10k resident values",
            Workload::Microservice => "Steady, growth, recovery, spike and back to steady",
        }
    }

    pub fn scale_range(self) -> ScaleRange {
        match self {
            Workload::Fill | Workload::Microservice => ScaleRange::FULL,
            Workload::Refill | Workload::RefillFull => ScaleRange::BOUNDED,
            Workload::SlowDecrease | Workload::SlowIncrease | Workload::Stable => ScaleRange::NON_ZERO,
        }
    }

    pub fn setup_policy(self) -> SetupPolicy {
        match self {
            Workload::Fill | Workload::SlowIncrease | Workload::Microservice => SetupPolicy::PerRepetition,
            Workload::Refill => SetupPolicy::PerScalePoint,
            Workload::RefillFull | Workload::SlowDecrease | Workload::Stable => SetupPolicy::SharedAcrossSweep,
        }
    }

    pub fn points(self, max_count: Option<usize>) -> Vec<ScalePoint> {
        self.scale_range().capped(max_count)
    }

    /// Runs the workload over `points`, one sink region per point.
    ///
    /// `points` is trusted to lie within [`Workload::scale_range`].
    pub fn run<T, C, S>(self, c: &mut C, sink: &mut S, points: &[ScalePoint])
    where
        T: Payload,
        C: Container<T>,
        S: MeasurementSink,
    {
        tracing::info!(workload = self.key(), points = points.len(), "running workload");
        self.prepare::<T, C>(c);
        let untimed = |_: &mut C| {};
        match self {
            Workload::Fill => sweep(c, sink, points, untimed, trace::fill::<T, C>),
            Workload::Refill => sweep(c, sink, points, |c: &mut C| c.init(), trace::refill::<T, C>),
            Workload::RefillFull => sweep(c, sink, points, untimed, trace::refill_full::<T, C>),
            Workload::SlowDecrease => sweep(c, sink, points, untimed, trace::slow_decrease::<T, C>),
            Workload::SlowIncrease => sweep(c, sink, points, untimed, trace::slow_increase::<T, C>),
            Workload::Stable => sweep(c, sink, points, untimed, trace::stable::<T, C>),
            Workload::Microservice => sweep(c, sink, points, untimed, trace::microservice::<T, C>),
        }
        self.finish::<T, C>(c);
    }

    /// Sweep-level setup for workloads sharing one container.
    pub fn prepare<T: Payload, C: Container<T>>(self, c: &mut C) {
        match self {
            Workload::RefillFull | Workload::Stable => {
                tracing::debug!(workload = self.key(), values = FILL_COUNT, "pre-filling shared container");
                c.init();
                trace::add_sequence::<T, C>(c, FILL_COUNT);
            }
            Workload::SlowDecrease => {
                tracing::debug!(workload = self.key(), "seeding shared container from scale matrix");
                c.init();
                trace::slow_decrease_seed::<T, C>(c);
            }
            _ => {}
        }
    }

    /// Drains the shared container once the sweep is over.
    pub fn finish<T, C: Container<T>>(self, c: &mut C) {
        if self.setup_policy() == SetupPolicy::SharedAcrossSweep {
            tracing::debug!(workload = self.key(), "draining shared container");
            trace::drain::<T, C>(c);
        }
    }

    /// Executes the per-point setup and exactly one repetition for `n`,
    /// outside of any sink. Sweep-level setup is the caller's business
    /// ([`Workload::prepare`] / [`Workload::finish`]).
    pub fn repetition<T: Payload, C: Container<T>>(self, c: &mut C, n: usize) {
        match self {
            Workload::Fill => trace::fill::<T, C>(c, n),
            Workload::Refill => {
                c.init();
                trace::refill::<T, C>(c, n)
            }
            Workload::RefillFull => trace::refill_full::<T, C>(c, n),
            Workload::SlowDecrease => trace::slow_decrease::<T, C>(c, n),
            Workload::SlowIncrease => trace::slow_increase::<T, C>(c, n),
            Workload::Stable => trace::stable::<T, C>(c, n),
            Workload::Microservice => trace::microservice::<T, C>(c, n),
        }
    }
}

/// `before_point` runs outside the timed region; `repetition` is the only
/// thing the sink sees.
fn sweep<C, S, B, F>(c: &mut C, sink: &mut S, points: &[ScalePoint], before_point: B, repetition: F)
where
    S: MeasurementSink,
    B: Fn(&mut C),
    F: Fn(&mut C, usize),
{
    for point in points {
        before_point(c);
        let n = point.count;
        sink.region(&point.label(), || repetition(c, n));
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Workload {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Workload::ALL
            .into_iter()
            .find(|w| w.key().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                let keys: Vec<&str> = Workload::ALL.iter().map(|w| w.key()).collect();
                anyhow::anyhow!("unknown workload '{}'; expected one of {}", s, keys.join(", "))
            })
    }
}
