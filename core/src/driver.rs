use crate::config::HarnessConfig;
use crate::container::Container;
use crate::report::Measurement;
use crate::sink::{MeasurementSink, Stopwatch};
use crate::value::Payload;
use anyhow::Result;

/// Runs the configured workloads, in catalogue order, against one container.
///
/// Every workload initialises the container itself, so one instance can be
/// handed over for the whole run.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    config: HarnessConfig,
}

impl Driver {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn run<T, C, S>(&self, container: &mut C, sink: &mut S)
    where
        T: Payload,
        C: Container<T>,
        S: MeasurementSink,
    {
        for &workload in &self.config.workloads {
            let points = workload.points(self.config.max_count);
            if points.is_empty() {
                tracing::debug!(workload = workload.key(), "no scale points under the cap; skipping");
                continue;
            }
            workload.run::<T, C, S>(container, sink, &points);
        }
    }

    /// Runs with a [`Stopwatch`] and returns one measurement per region.
    pub fn measure<T, C>(&self, container: &mut C, container_key: &str, payload_key: &str) -> Result<Vec<Measurement>>
    where
        T: Payload,
        C: Container<T>,
    {
        let mut sink = Stopwatch::new(self.config.stopwatch.clone());
        let mut measurements = Vec::new();
        for &workload in &self.config.workloads {
            let points = workload.points(self.config.max_count);
            if points.is_empty() {
                continue;
            }
            workload.run::<T, C, _>(container, &mut sink, &points);
            for sample in sink.take_samples() {
                measurements.push(Measurement::from_sample(workload, container_key, payload_key, &sample)?);
            }
        }
        tracing::info!(
            container = container_key,
            payload = payload_key,
            regions = measurements.len(),
            "measurement run complete"
        );
        Ok(measurements)
    }
}
