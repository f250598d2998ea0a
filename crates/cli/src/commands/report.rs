//! `benchie report`

use std::path::PathBuf;

use anyhow::{Context, Result};
use benchie_core::{Config, PipelineError, ReportFormat};
use cli::{ReportError, generate_report, renderers_for};
use tracing::{error, info, warn};

use crate::logging::init_logging;

pub fn cmd_report(
  dir: PathBuf,
  output: Option<PathBuf>,
  formats: Vec<ReportFormat>,
  parallel: bool,
  config_path: Option<PathBuf>,
  verbose: bool,
) -> Result<()> {
  let (mut config, ignored) = Config::resolve(config_path.as_deref(), &dir).context("loading configuration")?;
  init_logging(&config.logging.level, verbose);
  for skipped in &ignored {
    warn!("Ignoring {}: {}", skipped.path.display(), skipped.error);
  }

  if let Some(output) = output {
    config.output.directory = output;
  }
  if !formats.is_empty() {
    config.output.formats = formats;
  }
  if parallel {
    config.pipeline.parallel = true;
  }

  let renderers = renderers_for(&config.output.formats);
  if renderers.is_empty() {
    warn!("No report formats configured; logs will be processed but nothing written");
  }

  match generate_report(&dir, &config, &renderers) {
    Ok(summary) => {
      let skipped = summary.outcome.skipped.len() + summary.unreadable.len();
      info!(
        "Processed {} log(s): {} accepted, {} skipped",
        summary.logs_found, summary.outcome.records_accepted, skipped
      );
      for path in &summary.written {
        println!("Wrote {}", path.display());
      }
      Ok(())
    }
    Err(ReportError::Pipeline(PipelineError::NoValidRecords { inspected })) => {
      error!(
        "No valid benchmark logs in {} ({} file(s) inspected); no report generated",
        dir.display(),
        inspected
      );
      anyhow::bail!("no valid records")
    }
    Err(e) => Err(e).with_context(|| format!("generating report for {}", dir.display())),
  }
}
