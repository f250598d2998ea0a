//! Mode schema registry.
//!
//! Every benchmark mode owns a fixed, ordered vocabulary of metric names and a
//! single numeric pattern shared by all of its metrics. The registry is static:
//! schemas are declared once and looked up by [`Mode`] or by the textual tag a
//! log file declares.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Non-negative decimal with a mandatory fractional part (`12.34`, not `12`).
pub const DECIMAL_VALUE_PATTERN: &str = r"\d+\.\d+";

const NANO_METRICS: &[&str] = &[
  "y-cruncher pi 500m",
  "kernel defconfig",
  "xz compression",
  "blender render",
  "Total time (s)",
  "Total score",
];

const MINI_METRICS: &[&str] = &[
  "stress-ng cpu-cache-mem",
  "c-ray render",
  "perf sched msg fork thread",
  "perf sched msg pipe proc",
  "perf memcpy",
  "namd 92K atoms",
  "calculating prime numbers",
  "argon2 hashing",
  "ffmpeg compilation",
  "zstd compression",
  "x265 encoding",
  "Total time (s)",
  "Total score",
];

/// Benchmark suite variant declared by a log's `Mode:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  Nano,
  Mini,
}

impl Mode {
  /// All modes, in declaration order.
  pub fn all() -> &'static [Mode] {
    &[Mode::Nano, Mode::Mini]
  }

  /// Tag as written in log files.
  pub fn tag(&self) -> &'static str {
    match self {
      Mode::Nano => "nano",
      Mode::Mini => "mini",
    }
  }

  /// Capitalized name for report headings.
  pub fn label(&self) -> &'static str {
    match self {
      Mode::Nano => "Nano",
      Mode::Mini => "Mini",
    }
  }

  /// Parse a log tag. Matching is exact and case-sensitive.
  pub fn from_tag(tag: &str) -> Option<Self> {
    Mode::all().iter().copied().find(|m| m.tag() == tag)
  }
}

impl std::fmt::Display for Mode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.tag())
  }
}

impl std::str::FromStr for Mode {
  type Err = UnknownModeError;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    Mode::from_tag(s).ok_or_else(|| UnknownModeError(s.to_string()))
  }
}

/// A mode tag that has no registered schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown benchmark mode: {0:?}")]
pub struct UnknownModeError(pub String);

/// Metric vocabulary and value pattern for one mode.
#[derive(Debug)]
pub struct ModeSchema {
  mode: Mode,
  metric_names: &'static [&'static str],
  value_pattern: &'static str,
  matcher: Regex,
}

impl ModeSchema {
  fn build(mode: Mode, metric_names: &'static [&'static str], value_pattern: &'static str) -> Self {
    // Names such as "Total time (s)" carry regex metacharacters.
    let alternation = metric_names
      .iter()
      .map(|name| regex::escape(name))
      .collect::<Vec<_>>()
      .join("|");
    let matcher = Regex::new(&format!("({alternation}): ({value_pattern})")).expect("static metric pattern compiles");

    Self {
      mode,
      metric_names,
      value_pattern,
      matcher,
    }
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  /// Recognized metric names in declaration order.
  pub fn metric_names(&self) -> &'static [&'static str] {
    self.metric_names
  }

  pub fn value_pattern(&self) -> &'static str {
    self.value_pattern
  }

  /// Whether `name` is exactly one of this schema's metrics.
  pub fn recognizes(&self, name: &str) -> bool {
    self.metric_names.contains(&name)
  }

  /// Every `<metric>: <value>` occurrence in `text`, left to right.
  ///
  /// Repeated metrics are yielded once per occurrence.
  pub fn scan<'s, 't>(&'s self, text: &'t str) -> impl Iterator<Item = (&'t str, f64)> {
    self.matcher.captures_iter(text).filter_map(|caps| {
      let name = caps.get(1)?.as_str();
      let value = caps.get(2)?.as_str().parse::<f64>().ok()?;
      Some((name, value))
    })
  }
}

static NANO_SCHEMA: LazyLock<ModeSchema> =
  LazyLock::new(|| ModeSchema::build(Mode::Nano, NANO_METRICS, DECIMAL_VALUE_PATTERN));

static MINI_SCHEMA: LazyLock<ModeSchema> =
  LazyLock::new(|| ModeSchema::build(Mode::Mini, MINI_METRICS, DECIMAL_VALUE_PATTERN));

/// Lookup table from mode to schema.
pub struct SchemaRegistry;

impl SchemaRegistry {
  /// Schema for a known mode.
  pub fn get(mode: Mode) -> &'static ModeSchema {
    match mode {
      Mode::Nano => &NANO_SCHEMA,
      Mode::Mini => &MINI_SCHEMA,
    }
  }

  /// Schema for a textual mode tag.
  pub fn schema_for(tag: &str) -> Result<&'static ModeSchema, UnknownModeError> {
    tag.parse::<Mode>().map(Self::get)
  }

  /// All schemas in mode declaration order.
  pub fn all() -> impl Iterator<Item = &'static ModeSchema> {
    Mode::all().iter().map(|m| Self::get(*m))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mode_from_tag() {
    assert_eq!(Mode::from_tag("nano"), Some(Mode::Nano));
    assert_eq!(Mode::from_tag("mini"), Some(Mode::Mini));
    assert_eq!(Mode::from_tag("Nano"), None);
    assert_eq!(Mode::from_tag("nanox"), None);
    assert_eq!(Mode::from_tag(""), None);
  }

  #[test]
  fn test_schema_for_unknown_tag() {
    let err = SchemaRegistry::schema_for("micro").unwrap_err();
    assert_eq!(err, UnknownModeError("micro".to_string()));
    assert!(err.to_string().contains("micro"));
  }

  #[test]
  fn test_schema_declaration_order() {
    let nano = SchemaRegistry::get(Mode::Nano);
    assert_eq!(nano.metric_names().len(), 6);
    assert_eq!(nano.metric_names()[0], "y-cruncher pi 500m");
    assert_eq!(nano.metric_names()[5], "Total score");

    let mini = SchemaRegistry::schema_for("mini").unwrap();
    assert_eq!(mini.mode(), Mode::Mini);
    assert_eq!(mini.metric_names().len(), 13);
    assert_eq!(mini.metric_names()[0], "stress-ng cpu-cache-mem");
    assert_eq!(mini.value_pattern(), DECIMAL_VALUE_PATTERN);
  }

  #[test]
  fn test_scan_escapes_metacharacters() {
    let nano = SchemaRegistry::get(Mode::Nano);
    let text = "Total time (s): 12.50\nTotal time s: 99.0\nTotal time Xs): 1.0\n";
    let found: Vec<_> = nano.scan(text).collect();
    assert_eq!(found, vec![("Total time (s)", 12.5)]);
  }

  #[test]
  fn test_scan_requires_decimal_value() {
    let nano = SchemaRegistry::get(Mode::Nano);
    let text = "xz compression: 12\nxz compression: abc\nxz compression: 3.25\n";
    let found: Vec<_> = nano.scan(text).collect();
    assert_eq!(found, vec![("xz compression", 3.25)]);
  }

  #[test]
  fn test_scan_ignores_other_modes_metrics() {
    let nano = SchemaRegistry::get(Mode::Nano);
    let text = "zstd compression: 4.00\nblender render: 8.00\n";
    let found: Vec<_> = nano.scan(text).collect();
    assert_eq!(found, vec![("blender render", 8.0)]);
  }

  #[test]
  fn test_recognizes_exact_names_only() {
    let mini = SchemaRegistry::get(Mode::Mini);
    assert!(mini.recognizes("perf memcpy"));
    assert!(!mini.recognizes("perf"));
    assert!(!mini.recognizes("blender render"));
  }
}
