//! Measurement records and the files they are written to.

use crate::sink::RegionSample;
use crate::workload::Workload;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub workload: String,
    pub container: String,
    pub payload: String,
    pub scale: usize,
    pub iterations: u64,
    pub elapsed_ns: u64,
    pub ns_per_op: f64,
    pub allocs_per_op: f64,
    pub bytes_per_op: f64,
}

impl Measurement {
    /// Tags a stopwatch sample; the sample label is the scale count.
    pub fn from_sample(workload: Workload, container: &str, payload: &str, sample: &RegionSample) -> Result<Self> {
        let scale = sample
            .label
            .parse()
            .with_context(|| format!("region label '{}' is not a scale count", sample.label))?;
        Ok(Self {
            workload: workload.key().to_string(),
            container: container.to_string(),
            payload: payload.to_string(),
            scale,
            iterations: sample.iterations,
            elapsed_ns: u64::try_from(sample.elapsed.as_nanos()).unwrap_or(u64::MAX),
            ns_per_op: sample.ns_per_op(),
            allocs_per_op: sample.allocs_per_op(),
            bytes_per_op: sample.bytes_per_op(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub generated_at: String,
    pub git_rev: Option<String>,
    pub notes: Option<String>,
    /// False when the counting allocator was not installed; the alloc
    /// columns are then meaningless zeros.
    pub allocations_counted: bool,
    pub measurements: Vec<Measurement>,
}

impl RunRecord {
    pub fn new(measurements: Vec<Measurement>, notes: Option<String>, allocations_counted: bool) -> Self {
        let git_rev = std::env::var("GITHUB_SHA")
            .ok()
            .map(|sha| sha.chars().take(8).collect::<String>());
        Self {
            generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            git_rev,
            notes,
            allocations_counted,
            measurements,
        }
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).with_context(|| format!("write {}", path.display()))
}

pub fn write_csv(path: &Path, measurements: &[Measurement]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv_to(BufWriter::new(file), measurements).with_context(|| format!("write {}", path.display()))
}

pub fn write_csv_to<W: Write>(mut writer: W, measurements: &[Measurement]) -> Result<()> {
    writeln!(
        writer,
        "workload,container,payload,scale,iterations,elapsed_ns,ns_per_op,allocs_per_op,bytes_per_op"
    )?;
    for m in measurements {
        writeln!(
            writer,
            "{},{},{},{},{},{},{:.3},{:.3},{:.3}",
            m.workload,
            m.container,
            m.payload,
            m.scale,
            m.iterations,
            m.elapsed_ns,
            m.ns_per_op,
            m.allocs_per_op,
            m.bytes_per_op
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Plain-text table, one row per measurement.
pub fn render_table(measurements: &[Measurement]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:<12} {:<8} {:>9} {:>12} {:>16} {:>12} {:>12}",
        "workload", "container", "payload", "scale", "iterations", "ns/op", "allocs/op", "B/op"
    );
    for m in measurements {
        let _ = writeln!(
            out,
            "{:<14} {:<12} {:<8} {:>9} {:>12} {:>16.1} {:>12.2} {:>12.1}",
            m.workload, m.container, m.payload, m.scale, m.iterations, m.ns_per_op, m.allocs_per_op, m.bytes_per_op
        );
    }
    out
}
