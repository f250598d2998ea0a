//! Markdown report generation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use benchie_core::ReportDataset;
use chrono::Utc;

use super::ReportRenderer;
use crate::Result;

/// File written by [`MarkdownRenderer`]
pub const MARKDOWN_REPORT_FILE: &str = "benchie_report.md";

const MISSING: &str = "n/a";

/// Markdown report generator.
pub struct MarkdownReport {
  content: String,
}

impl MarkdownReport {
  /// Create a markdown report from finished datasets.
  pub fn from_datasets(datasets: &[ReportDataset]) -> Self {
    let mut content = String::new();

    Self::write_header(&mut content, datasets);
    for dataset in datasets {
      Self::write_comparison_table(&mut content, dataset);
      Self::write_system_info(&mut content, dataset);
    }

    Self { content }
  }

  pub fn content(&self) -> &str {
    &self.content
  }

  fn write_header(out: &mut String, datasets: &[ReportDataset]) {
    let modes: Vec<&str> = datasets.iter().map(|d| d.mode().label()).collect();

    let _ = writeln!(out, "# Benchmark Performance Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "**Generated:** {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "**Version:** {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out, "**Modes:** {}", modes.join(", "));
    let _ = writeln!(out);
    let _ = writeln!(
      out,
      "Values are averages over all runs of a kernel version. Times are in seconds, less is better."
    );
    let _ = writeln!(out);
  }

  fn write_comparison_table(out: &mut String, dataset: &ReportDataset) {
    let versions = dataset.versions();

    let _ = writeln!(out, "## {} Mode", dataset.mode().label());
    let _ = writeln!(out);

    let _ = write!(out, "| Test |");
    for version in versions {
      let _ = write!(out, " {} |", escape_cell(version));
    }
    let _ = writeln!(out);
    let _ = write!(out, "|------|");
    for _ in versions {
      let _ = write!(out, "------:|");
    }
    let _ = writeln!(out);

    for metric in dataset.metric_names() {
      let _ = write!(out, "| {} |", escape_cell(metric));
      for value in dataset.row(metric) {
        match value {
          Some(mean) => {
            let _ = write!(out, " {:.2} |", mean);
          }
          None => {
            let _ = write!(out, " {} |", MISSING);
          }
        }
      }
      let _ = writeln!(out);
    }
    let _ = writeln!(out);

    let _ = write!(out, "Runs per version:");
    for version in versions {
      let _ = write!(out, " `{}` {}", version, dataset.runs(version));
      if Some(version) != versions.last() {
        let _ = write!(out, ",");
      }
    }
    let _ = writeln!(out);
    let _ = writeln!(out);
  }

  fn write_system_info(out: &mut String, dataset: &ReportDataset) {
    let _ = writeln!(out, "### {} System Information", dataset.mode().label());
    let _ = writeln!(out);

    for version in dataset.versions() {
      let _ = writeln!(out, "#### {}", version);
      let _ = writeln!(out);
      match dataset.system_info(version) {
        Some(info) => {
          let _ = writeln!(out, "```text");
          let _ = writeln!(out, "{}", info);
          let _ = writeln!(out, "```");
        }
        None => {
          let _ = writeln!(out, "_{}_", MISSING);
        }
      }
      let _ = writeln!(out);
    }
  }

  /// Save report to a file.
  pub fn save(&self, path: &Path) -> Result<()> {
    std::fs::write(path, &self.content)?;
    Ok(())
  }
}

fn escape_cell(text: &str) -> String {
  text.replace('|', "\\|")
}

/// Writes [`MARKDOWN_REPORT_FILE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
  fn name(&self) -> &'static str {
    "markdown"
  }

  fn render(&self, datasets: &[ReportDataset], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let path = out_dir.join(MARKDOWN_REPORT_FILE);
    MarkdownReport::from_datasets(datasets).save(&path)?;
    Ok(vec![path])
  }
}
