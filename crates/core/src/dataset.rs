//! Final per-mode dataset handed to report renderers.

use std::collections::BTreeMap;

use crate::aggregate::PerVersionMeans;
use crate::schema::{Mode, SchemaRegistry};

/// Immutable per-mode comparison table.
///
/// Versions are sorted as plain strings on the raw label, so `"5.10"` sorts
/// before `"5.9"`. Metric slots follow the mode's schema, not observed data; a
/// version that never reported a metric has no value at that slot and
/// [`ReportDataset::value`] returns `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDataset {
  mode: Mode,
  versions: Vec<String>,
  metric_names: Vec<String>,
  values: BTreeMap<String, BTreeMap<String, f64>>,
  sample_counts: BTreeMap<String, BTreeMap<String, usize>>,
  system_info: BTreeMap<String, String>,
  runs: BTreeMap<String, usize>,
}

impl ReportDataset {
  /// Build the dataset for `mode` from finalized means.
  ///
  /// Metrics outside the mode's schema are dropped.
  pub fn assemble(mode: Mode, per_version: &PerVersionMeans) -> Self {
    let schema = SchemaRegistry::get(mode);

    let mut versions: Vec<String> = per_version.means.keys().cloned().collect();
    versions.sort();

    let mut values = BTreeMap::new();
    let mut sample_counts = BTreeMap::new();
    for (version, metrics) in &per_version.means {
      let (kept_values, kept_counts): (BTreeMap<_, _>, BTreeMap<_, _>) = metrics
        .iter()
        .filter(|(name, _)| schema.recognizes(name))
        .map(|(name, m)| ((name.clone(), m.mean), (name.clone(), m.samples)))
        .unzip();
      values.insert(version.clone(), kept_values);
      sample_counts.insert(version.clone(), kept_counts);
    }

    let system_info = per_version
      .system_info
      .iter()
      .filter(|(version, _)| per_version.means.contains_key(*version))
      .map(|(version, info)| (version.clone(), info.clone()))
      .collect();

    let runs = per_version
      .runs
      .iter()
      .filter(|(version, _)| per_version.means.contains_key(*version))
      .map(|(version, count)| (version.clone(), *count))
      .collect();

    Self {
      mode,
      versions,
      metric_names: schema.metric_names().iter().map(|n| n.to_string()).collect(),
      values,
      sample_counts,
      system_info,
      runs,
    }
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  /// Kernel versions in lexicographic order.
  pub fn versions(&self) -> &[String] {
    &self.versions
  }

  /// Metric names in schema declaration order.
  pub fn metric_names(&self) -> &[String] {
    &self.metric_names
  }

  /// Mean for one slot, `None` when the version never reported the metric.
  pub fn value(&self, version: &str, metric: &str) -> Option<f64> {
    self.values.get(version)?.get(metric).copied()
  }

  /// Number of samples behind [`value`](Self::value); zero for missing slots.
  pub fn sample_count(&self, version: &str, metric: &str) -> usize {
    self
      .sample_counts
      .get(version)
      .and_then(|m| m.get(metric))
      .copied()
      .unwrap_or(0)
  }

  /// Log files that contributed to `version`. Repeated lines within one file
  /// count once here but separately in [`sample_count`](Self::sample_count).
  pub fn runs(&self, version: &str) -> usize {
    self.runs.get(version).copied().unwrap_or(0)
  }

  pub fn system_info(&self, version: &str) -> Option<&str> {
    self.system_info.get(version).map(String::as_str)
  }

  /// One metric across all versions, in version order.
  pub fn row(&self, metric: &str) -> Vec<Option<f64>> {
    self.versions.iter().map(|v| self.value(v, metric)).collect()
  }
}
