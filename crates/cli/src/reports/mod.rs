//! Report renderers for finished datasets.
//!
//! - JSON: machine-readable, one document covering every mode
//! - Markdown: per-mode comparison tables for humans

mod json;
mod markdown;

use std::path::{Path, PathBuf};

use benchie_core::{ReportDataset, ReportFormat};

pub use json::{DatasetReport, JsonRenderer, JsonReport, MetricRow, ReportMetadata};
pub use markdown::{MarkdownRenderer, MarkdownReport};

/// Turns finished datasets into output files.
///
/// Implementations choose their own file names inside `out_dir` and return the
/// paths they wrote.
pub trait ReportRenderer {
  fn name(&self) -> &'static str;

  fn render(&self, datasets: &[ReportDataset], out_dir: &Path) -> crate::Result<Vec<PathBuf>>;
}

/// One renderer per requested format, duplicates removed, order kept.
pub fn renderers_for(formats: &[ReportFormat]) -> Vec<Box<dyn ReportRenderer>> {
  let mut seen = Vec::new();
  let mut renderers: Vec<Box<dyn ReportRenderer>> = Vec::new();

  for format in formats {
    if seen.contains(format) {
      continue;
    }
    seen.push(*format);
    match format {
      ReportFormat::Json => renderers.push(Box::new(JsonRenderer)),
      ReportFormat::Markdown => renderers.push(Box::new(MarkdownRenderer)),
    }
  }

  renderers
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_renderers_for_dedupes() {
    let renderers = renderers_for(&[ReportFormat::Markdown, ReportFormat::Json, ReportFormat::Markdown]);
    let names: Vec<&str> = renderers.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["markdown", "json"]);
  }

  #[test]
  fn test_renderers_for_empty() {
    assert!(renderers_for(&[]).is_empty());
  }
}
