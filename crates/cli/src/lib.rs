//! benchie CLI library - log discovery, report renderers and the report run

pub mod reports;
pub mod source;

use std::path::{Path, PathBuf};

use benchie_core::{Config, ConfigError, Pipeline, PipelineError, PipelineOutcome};
use tracing::info;

pub use reports::{JsonRenderer, MarkdownRenderer, ReportRenderer, renderers_for};
pub use source::{UnreadableLog, discover_logs, read_logs};

/// Errors from a report run
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Config error: {0}")]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Pipeline(#[from] PipelineError),
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// What a report run produced.
#[derive(Debug)]
pub struct RunSummary {
  pub logs_found: usize,
  pub outcome: PipelineOutcome,
  pub unreadable: Vec<UnreadableLog>,
  /// Files written by the renderers, in renderer order
  pub written: Vec<PathBuf>,
}

/// Discover, extract and aggregate every log in `log_dir`, then render.
///
/// Renderers only run when the pipeline produced at least one dataset; an empty
/// or all-invalid corpus returns [`PipelineError::NoValidRecords`].
pub fn generate_report(log_dir: &Path, config: &Config, renderers: &[Box<dyn ReportRenderer>]) -> Result<RunSummary> {
  let paths = discover_logs(log_dir, &config.scan)?;
  info!("Found {} log file(s) in {}", paths.len(), log_dir.display());

  let (outcome, unreadable) = process_logs(&paths, config.pipeline.parallel)?;

  let out_dir = &config.output.directory;
  std::fs::create_dir_all(out_dir)?;

  let mut written = Vec::new();
  for renderer in renderers {
    let files = renderer.render(&outcome.datasets, out_dir)?;
    info!("{} renderer wrote {} file(s)", renderer.name(), files.len());
    written.extend(files);
  }

  Ok(RunSummary {
    logs_found: paths.len(),
    outcome,
    unreadable,
    written,
  })
}

/// Read and run the pipeline over already discovered logs.
///
/// `NoValidRecords` counts every path, including ones that could not be read.
pub fn process_logs(paths: &[PathBuf], parallel: bool) -> Result<(PipelineOutcome, Vec<UnreadableLog>)> {
  let (inputs, unreadable) = read_logs(paths);
  let outcome = Pipeline::new()
    .with_parallel(parallel)
    .run(&inputs)
    .map_err(|e| match e {
      PipelineError::NoValidRecords { .. } => PipelineError::NoValidRecords { inspected: paths.len() },
    })?;
  Ok((outcome, unreadable))
}
