//! Measurement sinks: who decides how often a trace runs, and who times it.

use crate::alloc;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A facility that times a labelled region.
///
/// The sink owns the iteration policy: it calls `routine` as many times as
/// it needs, and each call must execute the workload's trace exactly once.
pub trait MeasurementSink {
    fn region<F: FnMut()>(&mut self, label: &str, routine: F);
}

impl<S: MeasurementSink> MeasurementSink for &mut S {
    fn region<F: FnMut()>(&mut self, label: &str, routine: F) {
        (**self).region(label, routine)
    }
}

/// Runs every region exactly once and remembers the labels, in order.
#[derive(Debug, Default)]
pub struct OneShot {
    labels: Vec<String>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl MeasurementSink for OneShot {
    fn region<F: FnMut()>(&mut self, label: &str, mut routine: F) {
        self.labels.push(label.to_owned());
        routine();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwatchConfig {
    /// Wall time one batch should reach before its result is accepted.
    pub target_time_ms: u64,
    /// Upper bound on iterations per region.
    pub max_iterations: u64,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            target_time_ms: 1_000,
            max_iterations: 1_000_000_000,
        }
    }
}

/// Result of one stopwatch region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSample {
    pub label: String,
    pub iterations: u64,
    pub elapsed: Duration,
    pub allocations: u64,
    pub bytes: u64,
}

impl RegionSample {
    pub fn ns_per_op(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / self.iterations.max(1) as f64
    }

    pub fn allocs_per_op(&self) -> f64 {
        self.allocations as f64 / self.iterations.max(1) as f64
    }

    pub fn bytes_per_op(&self) -> f64 {
        self.bytes as f64 / self.iterations.max(1) as f64
    }
}

/// Wall-clock sink with an adaptive iteration count.
///
/// Starts with a single iteration and grows the batch until one batch lasts
/// `target_time_ms`. Only the final batch is recorded. Allocation counts are
/// read from [`crate::alloc`] around that batch.
#[derive(Debug, Default)]
pub struct Stopwatch {
    config: StopwatchConfig,
    samples: Vec<RegionSample>,
}

impl Stopwatch {
    pub fn new(config: StopwatchConfig) -> Self {
        Self {
            config,
            samples: Vec::new(),
        }
    }

    pub fn samples(&self) -> &[RegionSample] {
        &self.samples
    }

    pub fn take_samples(&mut self) -> Vec<RegionSample> {
        std::mem::take(&mut self.samples)
    }
}

impl MeasurementSink for Stopwatch {
    fn region<F: FnMut()>(&mut self, label: &str, mut routine: F) {
        let target = Duration::from_millis(self.config.target_time_ms);
        let max = self.config.max_iterations.max(1);
        let mut iterations = 1;
        loop {
            let before = alloc::snapshot();
            let elapsed = run_batch(&mut routine, iterations);
            let delta = alloc::snapshot().since(&before);

            if elapsed >= target || iterations >= max {
                let sample = RegionSample {
                    label: label.to_owned(),
                    iterations,
                    elapsed,
                    allocations: delta.allocations,
                    bytes: delta.bytes,
                };
                tracing::debug!(
                    label,
                    iterations,
                    ns_per_op = sample.ns_per_op(),
                    "region measured"
                );
                self.samples.push(sample);
                return;
            }
            iterations = next_iterations(iterations, elapsed, target, max);
        }
    }
}

#[inline(never)]
fn run_batch<F: FnMut()>(routine: &mut F, iterations: u64) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        routine();
    }
    start.elapsed()
}

/// Predicts the batch size that reaches `target`, with 20% headroom, growing
/// at most 100x per round and at least by one.
pub(crate) fn next_iterations(current: u64, elapsed: Duration, target: Duration, max: u64) -> u64 {
    let per_op = (elapsed.as_nanos() / current.max(1) as u128).max(1);
    let target_ns = target.as_nanos();
    let predicted = (target_ns + target_ns / 5) / per_op;
    let predicted = u64::try_from(predicted).unwrap_or(u64::MAX);
    predicted
        .min(current.saturating_mul(100))
        .max(current + 1)
        .min(max)
}

#[cfg(feature = "criterion")]
pub use self::criterion_sink::CriterionSink;

#[cfg(feature = "criterion")]
mod criterion_sink {
    use super::MeasurementSink;
    use criterion::measurement::WallTime;
    use criterion::{BenchmarkGroup, BenchmarkId, Criterion};

    /// Maps each region onto a benchmark of one Criterion group; Criterion
    /// picks the iteration counts.
    pub struct CriterionSink<'a> {
        group: BenchmarkGroup<'a, WallTime>,
    }

    impl<'a> CriterionSink<'a> {
        pub fn new(c: &'a mut Criterion, name: &str) -> Self {
            Self {
                group: c.benchmark_group(name),
            }
        }

        pub fn group_mut(&mut self) -> &mut BenchmarkGroup<'a, WallTime> {
            &mut self.group
        }

        pub fn finish(self) {
            self.group.finish();
        }
    }

    impl MeasurementSink for CriterionSink<'_> {
        fn region<F: FnMut()>(&mut self, label: &str, mut routine: F) {
            self.group
                .bench_function(BenchmarkId::from_parameter(label), |b| b.iter(&mut routine));
        }
    }
}
