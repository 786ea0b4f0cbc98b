#[cfg(test)]
mod tests {
    use crate::sink::{MeasurementSink, OneShot, Stopwatch, StopwatchConfig, next_iterations};
    use std::time::Duration;

    #[test]
    fn test_one_shot_runs_each_region_once() {
        let mut sink = OneShot::new();
        let mut calls = 0;
        sink.region("1", || calls += 1);
        sink.region("10", || calls += 1);
        assert_eq!(calls, 2);
        assert_eq!(sink.labels(), ["1", "10"]);
    }

    #[test]
    fn test_stopwatch_stops_at_iteration_cap() {
        let mut sink = Stopwatch::new(StopwatchConfig {
            target_time_ms: 60_000,
            max_iterations: 50,
        });
        let mut calls = 0u64;
        sink.region("100", || calls += 1);

        let samples = sink.take_samples();
        assert_eq!(samples.len(), 1);
        let sample = &samples[0];
        assert_eq!(sample.label, "100");
        assert_eq!(sample.iterations, 50);
        // every batch before the final one was also executed
        assert!(calls >= 50);
        assert!(sink.samples().is_empty());
    }

    #[test]
    fn test_stopwatch_accepts_first_batch_reaching_target() {
        let mut sink = Stopwatch::new(StopwatchConfig {
            target_time_ms: 0,
            max_iterations: 1_000,
        });
        let mut calls = 0u64;
        sink.region("1", || calls += 1);
        assert_eq!(calls, 1);
        assert_eq!(sink.samples()[0].iterations, 1);
    }

    #[test]
    fn test_per_op_figures_divide_by_iterations() {
        let mut sink = Stopwatch::new(StopwatchConfig {
            target_time_ms: 60_000,
            max_iterations: 4,
        });
        sink.region("1", || std::thread::sleep(Duration::from_micros(10)));
        let sample = &sink.samples()[0];
        assert_eq!(sample.iterations, 4);
        assert!(sample.ns_per_op() >= 10_000.0);
        assert_eq!(sample.allocs_per_op(), sample.allocations as f64 / 4.0);
    }

    #[test]
    fn test_next_iterations_growth_is_bounded() {
        let target = Duration::from_secs(1);
        // 1ns per op would predict 1.2e9; growth is capped at 100x
        assert_eq!(next_iterations(1, Duration::from_nanos(1), target, u64::MAX), 100);
        // always makes progress
        assert_eq!(next_iterations(10, Duration::from_secs(5), target, u64::MAX), 11);
        // never beyond the configured cap
        assert_eq!(next_iterations(1_000, Duration::from_micros(1), target, 5_000), 5_000);
        // 1ms per op -> 1.2s / 1ms = 1200
        assert_eq!(next_iterations(100, Duration::from_millis(100), target, u64::MAX), 1_200);
    }

    #[test]
    fn test_mut_ref_forwards_to_sink() {
        fn run_twice<S: MeasurementSink>(mut sink: S) {
            sink.region("a", || {});
            sink.region("b", || {});
        }
        let mut sink = OneShot::new();
        run_twice(&mut sink);
        assert_eq!(sink.labels().len(), 2);
    }
}
