//! Multi-run aggregation keyed by (kernel version, metric).

use std::collections::BTreeMap;

use crate::extract::LogRecord;

/// Accumulation key: one metric on one kernel build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AggregationKey {
  pub kernel_version: String,
  pub metric: String,
}

impl AggregationKey {
  pub fn new(kernel_version: impl Into<String>, metric: impl Into<String>) -> Self {
    Self {
      kernel_version: kernel_version.into(),
      metric: metric.into(),
    }
  }
}

/// Mean of every sample seen for one key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricMean {
  pub mean: f64,
  pub samples: usize,
}

/// Output of [`Aggregator::finalize`]: per kernel version, per metric means.
///
/// Only keys with at least one sample are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerVersionMeans {
  pub means: BTreeMap<String, BTreeMap<String, MetricMean>>,
  /// System description of the last contributing record per version
  pub system_info: BTreeMap<String, String>,
  /// Log files that contributed samples, per version
  pub runs: BTreeMap<String, usize>,
}

impl PerVersionMeans {
  pub fn mean(&self, kernel_version: &str, metric: &str) -> Option<f64> {
    self.means.get(kernel_version)?.get(metric).map(|m| m.mean)
  }

  pub fn is_empty(&self) -> bool {
    self.means.is_empty()
  }
}

/// Collects samples for one pipeline run.
///
/// Keep one instance per mode: metric vocabularies differ between modes and a
/// shared instance would mix them under the same kernel version.
#[derive(Debug, Default)]
pub struct Aggregator {
  samples: BTreeMap<AggregationKey, Vec<f64>>,
  system_info: BTreeMap<String, String>,
  runs: BTreeMap<String, usize>,
  records: usize,
}

impl Aggregator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append every sample of `record` under its kernel version.
  pub fn absorb(&mut self, record: LogRecord) {
    self.records += 1;
    if record.metrics.is_empty() {
      return;
    }

    for sample in record.metrics {
      self
        .samples
        .entry(AggregationKey::new(record.kernel_version.as_str(), sample.metric))
        .or_default()
        .push(sample.value);
    }
    *self.runs.entry(record.kernel_version.clone()).or_default() += 1;
    self.system_info.insert(record.kernel_version, record.system_info);
  }

  /// Samples collected so far for a key, in absorption order.
  pub fn samples(&self, kernel_version: &str, metric: &str) -> Option<&[f64]> {
    self
      .samples
      .get(&AggregationKey::new(kernel_version, metric))
      .map(Vec::as_slice)
  }

  /// Number of records absorbed, including ones without samples.
  pub fn records(&self) -> usize {
    self.records
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  /// Reduce every key to the arithmetic mean of its samples.
  pub fn finalize(self) -> PerVersionMeans {
    let mut means: BTreeMap<String, BTreeMap<String, MetricMean>> = BTreeMap::new();

    for (key, values) in self.samples {
      if values.is_empty() {
        continue;
      }
      let mean = values.iter().sum::<f64>() / values.len() as f64;
      means.entry(key.kernel_version).or_default().insert(
        key.metric,
        MetricMean {
          mean,
          samples: values.len(),
        },
      );
    }

    PerVersionMeans {
      means,
      system_info: self.system_info,
      runs: self.runs,
    }
  }
}
