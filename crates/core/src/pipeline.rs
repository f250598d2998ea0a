//! Batch pipeline: extract every log, aggregate per mode, assemble datasets.
//!
//! The pipeline works on texts that were already read; discovery and file I/O
//! belong to the caller.

use std::collections::BTreeMap;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::aggregate::Aggregator;
use crate::dataset::ReportDataset;
use crate::extract::{ExtractionFailure, LogRecord, extract};
use crate::schema::Mode;

/// One raw log and where it came from.
#[derive(Debug, Clone)]
pub struct LogInput {
  /// File name or other identity used in warnings
  pub source: String,
  pub text: String,
}

impl LogInput {
  pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
    Self {
      source: source.into(),
      text: text.into(),
    }
  }
}

/// A log that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLog {
  pub source: String,
  pub reason: ExtractionFailure,
}

/// Pipeline-level errors.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("no valid benchmark records in {inspected} log file(s)")]
  NoValidRecords { inspected: usize },
}

/// Result of a successful run.
#[derive(Debug)]
pub struct PipelineOutcome {
  /// One dataset per mode with data, in mode declaration order
  pub datasets: Vec<ReportDataset>,
  pub skipped: Vec<SkippedLog>,
  pub records_accepted: usize,
}

impl PipelineOutcome {
  pub fn dataset(&self, mode: Mode) -> Option<&ReportDataset> {
    self.datasets.iter().find(|d| d.mode() == mode)
  }
}

/// Runs extraction and aggregation over one batch of logs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
  parallel: bool,
}

impl Pipeline {
  pub fn new() -> Self {
    Self::default()
  }

  /// Extract on the rayon pool. Absorption stays sequential in input order.
  pub fn with_parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  pub fn run(&self, inputs: &[LogInput]) -> Result<PipelineOutcome, PipelineError> {
    info!("Processing {} log file(s)", inputs.len());

    let extracted: Vec<Result<LogRecord, ExtractionFailure>> = if self.parallel {
      inputs.par_iter().map(|input| extract(&input.text)).collect()
    } else {
      inputs.iter().map(|input| extract(&input.text)).collect()
    };

    let mut aggregators: BTreeMap<Mode, Aggregator> = BTreeMap::new();
    let mut skipped = Vec::new();
    let mut records_accepted = 0;

    for (input, result) in inputs.iter().zip(extracted) {
      match result {
        Ok(record) => {
          debug!(
            "{}: mode={} kernel={} samples={}",
            input.source,
            record.mode,
            record.kernel_version,
            record.metrics.len()
          );
          records_accepted += 1;
          aggregators.entry(record.mode).or_default().absorb(record);
        }
        Err(reason) => {
          warn!("Skipping {}: {}", input.source, reason);
          skipped.push(SkippedLog {
            source: input.source.clone(),
            reason,
          });
        }
      }
    }

    let mut datasets = Vec::new();
    for (mode, aggregator) in aggregators {
      if aggregator.is_empty() {
        warn!(
          "{} {} log(s) contained no recognized metrics",
          aggregator.records(),
          mode
        );
        continue;
      }
      let records = aggregator.records();
      let dataset = ReportDataset::assemble(mode, &aggregator.finalize());
      info!(
        "{} mode: {} record(s), {} kernel version(s)",
        mode.label(),
        records,
        dataset.versions().len()
      );
      datasets.push(dataset);
    }

    if datasets.is_empty() {
      return Err(PipelineError::NoValidRecords {
        inspected: inputs.len(),
      });
    }

    Ok(PipelineOutcome {
      datasets,
      skipped,
      records_accepted,
    })
  }
}
