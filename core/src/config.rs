use crate::sink::StopwatchConfig;
use crate::workload::Workload;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a run covers, loaded from TOML:
///
/// ```toml
/// workloads = ["fill", "stable"]
/// max_count = 100000
///
/// [stopwatch]
/// target_time_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Workloads to run, in catalogue order regardless of listing order.
    pub workloads: Vec<Workload>,
    /// Drops scale points above this count.
    pub max_count: Option<usize>,
    pub stopwatch: StopwatchConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            workloads: Workload::ALL.to_vec(),
            max_count: None,
            stopwatch: StopwatchConfig::default(),
        }
    }
}

impl HarnessConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(source).context("parse harness config")?;
        config.validated()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("load config {}", path.display()))
    }

    /// Deduplicates and orders workloads; rejects settings that would make
    /// the stopwatch spin forever or run nothing.
    pub fn validated(mut self) -> Result<Self> {
        if self.workloads.is_empty() {
            anyhow::bail!("config selects no workloads");
        }
        if self.stopwatch.max_iterations == 0 {
            anyhow::bail!("stopwatch.max_iterations must be at least 1");
        }
        self.workloads = Workload::ALL
            .into_iter()
            .filter(|w| self.workloads.contains(w))
            .collect();
        Ok(self)
    }
}
