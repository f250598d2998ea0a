//! Record extraction from raw benchmark log text.
//!
//! Extraction is search-based rather than positional: `Mode:`, `Kernel:` and the
//! metric lines may appear anywhere. `System:` is the exception, it has no closing
//! marker and runs to the end of the text, so it must be the last section.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{Mode, SchemaRegistry};

static MODE_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Mode: (\w+)").expect("static pattern compiles"));

static KERNEL_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Kernel: (\S+)").expect("static pattern compiles"));

const SYSTEM_MARKER: &str = "System:";

/// One observed metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
  pub metric: String,
  pub value: f64,
}

/// One parsed log file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
  pub mode: Mode,
  /// Opaque label, not parsed as a version number
  pub kernel_version: String,
  /// Free text following `System:`, trimmed
  pub system_info: String,
  /// Samples in order of appearance; duplicates are kept
  pub metrics: Vec<Sample>,
}

impl LogRecord {
  /// Samples recorded for one metric, in order.
  pub fn values_of<'a>(&'a self, metric: &'a str) -> impl Iterator<Item = f64> + 'a {
    self.metrics.iter().filter(move |s| s.metric == metric).map(|s| s.value)
  }
}

/// Why a log produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
  #[error("missing or unknown mode{}", quoted_tag(.found))]
  MissingOrUnknownMode { found: Option<String> },

  #[error("missing kernel version")]
  MissingKernelVersion,

  #[error("missing system information")]
  MissingSystemInfo,
}

fn quoted_tag(found: &Option<String>) -> String {
  found.as_ref().map(|t| format!(" ({t:?})")).unwrap_or_default()
}

/// Parse one log text into a [`LogRecord`].
///
/// Pure: no I/O, no state beyond the static schema registry. Any missing header
/// rejects the whole text; there is no partial record.
pub fn extract(text: &str) -> Result<LogRecord, ExtractionFailure> {
  let tag = MODE_DECL
    .captures(text)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str());
  let schema = match tag {
    Some(tag) => SchemaRegistry::schema_for(tag)
      .map_err(|e| ExtractionFailure::MissingOrUnknownMode { found: Some(e.0) })?,
    None => return Err(ExtractionFailure::MissingOrUnknownMode { found: None }),
  };

  let kernel_version = KERNEL_DECL
    .captures(text)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str().to_string())
    .ok_or(ExtractionFailure::MissingKernelVersion)?;

  let system_info = text
    .find(SYSTEM_MARKER)
    .map(|idx| text[idx + SYSTEM_MARKER.len()..].trim().to_string())
    .ok_or(ExtractionFailure::MissingSystemInfo)?;

  let metrics = schema
    .scan(text)
    .map(|(metric, value)| Sample {
      metric: metric.to_string(),
      value,
    })
    .collect();

  Ok(LogRecord {
    mode: schema.mode(),
    kernel_version,
    system_info,
    metrics,
  })
}
