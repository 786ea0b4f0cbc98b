//! Workload-driven benchmarks for queue, stack and deque implementations.
//!
//! Containers plug in through [`container::Container`]; the seven traffic
//! patterns in [`workload`] drive them across [`scale::SCALE_MATRIX`], and a
//! [`sink::MeasurementSink`] decides how often each trace runs and times it.

pub mod alloc;
pub mod config;
pub mod container;
pub mod driver;
pub mod report;
pub mod scale;
pub mod sink;
pub mod value;
pub mod workload;

pub use config::HarnessConfig;
pub use container::{Container, Counting, FnAdapter, OpCounts};
pub use driver::Driver;
pub use scale::{FILL_COUNT, REFILL_COUNT, SCALE_MATRIX, ScalePoint, ScaleRange};
pub use sink::{MeasurementSink, OneShot, Stopwatch, StopwatchConfig};
pub use value::{Payload, PayloadKind, TestValue, value_for};
pub use workload::{SetupPolicy, Workload};

#[cfg(test)]
mod alloc_test;
#[cfg(test)]
mod report_test;
#[cfg(test)]
mod sink_test;
