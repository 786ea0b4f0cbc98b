#[cfg(test)]
mod tests {
    use crate::report::{Measurement, RunRecord, render_table, write_csv, write_json};
    use crate::sink::RegionSample;
    use crate::workload::Workload;
    use anyhow::Result;
    use std::time::Duration;

    fn sample(label: &str) -> RegionSample {
        RegionSample {
            label: label.to_string(),
            iterations: 4,
            elapsed: Duration::from_nanos(4_000),
            allocations: 8,
            bytes: 256,
        }
    }

    #[test]
    fn test_measurement_from_sample() -> Result<()> {
        let m = Measurement::from_sample(Workload::Stable, "vec_deque", "inline", &sample("100"))?;
        assert_eq!(m.workload, "stable");
        assert_eq!(m.scale, 100);
        assert_eq!(m.elapsed_ns, 4_000);
        assert_eq!(m.ns_per_op, 1_000.0);
        assert_eq!(m.allocs_per_op, 2.0);
        assert_eq!(m.bytes_per_op, 64.0);
        Ok(())
    }

    #[test]
    fn test_non_numeric_label_is_rejected() {
        let err = Measurement::from_sample(Workload::Fill, "vec", "inline", &sample("big")).unwrap_err();
        assert!(err.to_string().contains("big"));
    }

    #[test]
    fn test_write_json_and_csv() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let measurements = vec![
            Measurement::from_sample(Workload::Fill, "vec", "inline", &sample("0"))?,
            Measurement::from_sample(Workload::Fill, "vec", "inline", &sample("10"))?,
        ];
        let record = RunRecord::new(measurements.clone(), Some("smoke".to_string()), false);

        let json_path = dir.path().join("latest.json");
        write_json(&json_path, &record)?;
        let parsed: RunRecord = serde_json::from_str(&std::fs::read_to_string(&json_path)?)?;
        assert_eq!(parsed.measurements, measurements);
        assert_eq!(parsed.notes.as_deref(), Some("smoke"));
        assert!(!parsed.allocations_counted);

        let csv_path = dir.path().join("latest.csv");
        write_csv(&csv_path, &measurements)?;
        let csv = std::fs::read_to_string(&csv_path)?;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("workload,container,payload,scale"));
        assert!(lines[2].starts_with("fill,vec,inline,10,4,4000,1000.000"));
        Ok(())
    }

    #[test]
    fn test_table_has_row_per_measurement() -> Result<()> {
        let measurements = vec![Measurement::from_sample(
            Workload::Microservice,
            "linked_list",
            "boxed",
            &sample("1000"),
        )?];
        let table = render_table(&measurements);
        assert_eq!(table.lines().count(), 2);
        assert!(table.contains("microservice"));
        assert!(table.contains("linked_list"));
        Ok(())
    }
}
