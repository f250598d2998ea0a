//! JSON report format.

use std::path::{Path, PathBuf};

use benchie_core::{Mode, ReportDataset};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ReportRenderer;
use crate::Result;

/// File written by [`JsonRenderer`]
pub const JSON_REPORT_FILE: &str = "benchie_report.json";

/// Complete report in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
  /// Report metadata
  pub metadata: ReportMetadata,
  /// One entry per mode with data
  pub datasets: Vec<DatasetReport>,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
  /// Report generation timestamp
  pub timestamp: DateTime<Utc>,
  /// benchie version
  pub version: String,
  /// Hostname the report was generated on
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hostname: Option<String>,
}

/// One mode's comparison table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
  pub mode: Mode,
  /// Kernel versions, lexicographic
  pub versions: Vec<String>,
  /// One row per schema metric, in schema order
  pub metrics: Vec<MetricRow>,
  /// System description per kernel version
  pub system_info: Vec<Option<String>>,
  /// Log files behind each kernel version
  pub runs: Vec<usize>,
}

/// Means for one metric across versions; `None` where a version has no samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRow {
  pub name: String,
  pub means: Vec<Option<f64>>,
  pub samples: Vec<usize>,
}

impl DatasetReport {
  pub fn from_dataset(dataset: &ReportDataset) -> Self {
    let metrics = dataset
      .metric_names()
      .iter()
      .map(|name| MetricRow {
        name: name.clone(),
        means: dataset.row(name),
        samples: dataset
          .versions()
          .iter()
          .map(|v| dataset.sample_count(v, name))
          .collect(),
      })
      .collect();

    Self {
      mode: dataset.mode(),
      versions: dataset.versions().to_vec(),
      metrics,
      system_info: dataset
        .versions()
        .iter()
        .map(|v| dataset.system_info(v).map(str::to_string))
        .collect(),
      runs: dataset.versions().iter().map(|v| dataset.runs(v)).collect(),
    }
  }
}

impl JsonReport {
  pub fn from_datasets(datasets: &[ReportDataset]) -> Self {
    Self {
      metadata: ReportMetadata {
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        hostname: hostname::get().ok().and_then(|h| h.into_string().ok()),
      },
      datasets: datasets.iter().map(DatasetReport::from_dataset).collect(),
    }
  }

  /// Save report to a JSON file.
  pub fn save(&self, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(self)?;
    std::fs::write(path, json)?;
    Ok(())
  }

  /// Load report from a JSON file.
  pub fn load(path: &Path) -> Result<Self> {
    let json = std::fs::read_to_string(path)?;
    let report = serde_json::from_str(&json)?;
    Ok(report)
  }
}

/// Writes [`JSON_REPORT_FILE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
  fn name(&self) -> &'static str {
    "json"
  }

  fn render(&self, datasets: &[ReportDataset], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let path = out_dir.join(JSON_REPORT_FILE);
    JsonReport::from_datasets(datasets).save(&path)?;
    Ok(vec![path])
  }
}
