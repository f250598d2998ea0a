//! End-to-end report run tests: discovery, extraction, aggregation, rendering.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use benchie_core::{Config, ExtractionFailure, Mode, PipelineError, ReportDataset};
use cli::reports::{JsonReport, ReportRenderer};
use cli::{JsonRenderer, MarkdownRenderer, ReportError, generate_report};
use tempfile::TempDir;

/// Counts invocations instead of writing files.
struct CountingRenderer {
  calls: Rc<Cell<usize>>,
  datasets_seen: Rc<Cell<usize>>,
}

impl ReportRenderer for CountingRenderer {
  fn name(&self) -> &'static str {
    "counting"
  }

  fn render(&self, datasets: &[ReportDataset], _out_dir: &Path) -> cli::Result<Vec<PathBuf>> {
    self.calls.set(self.calls.get() + 1);
    self.datasets_seen.set(datasets.len());
    Ok(vec![])
  }
}

fn counting() -> (Box<dyn ReportRenderer>, Rc<Cell<usize>>, Rc<Cell<usize>>) {
  let calls = Rc::new(Cell::new(0));
  let seen = Rc::new(Cell::new(0));
  let renderer = CountingRenderer {
    calls: calls.clone(),
    datasets_seen: seen.clone(),
  };
  (Box::new(renderer), calls, seen)
}

fn config_for(out: &Path) -> Config {
  let mut config = Config::default();
  config.output.directory = out.to_path_buf();
  config
}

fn nano_log(kernel: &str, total: &str) -> String {
  format!(
    "Benchie run\nMode: nano\nKernel: {kernel}\n\ny-cruncher pi 500m: 20.10\nkernel defconfig: 90.50\nTotal time (s): {total}\nTotal score: 3.30\n\nSystem:\n  OS: Test Linux\n  CPU: 16 cores\n"
  )
}

fn write(dir: &Path, name: &str, content: &str) {
  std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_report_from_directory() {
  let logs = TempDir::new().unwrap();
  let out = TempDir::new().unwrap();

  write(logs.path(), "benchie_01.log", &nano_log("6.1-test", "110.00"));
  write(logs.path(), "benchie_02.log", &nano_log("6.1-test", "130.00"));
  write(logs.path(), "benchie_03.log", &nano_log("5.15", "150.00"));
  write(logs.path(), "notes.txt", &nano_log("9.9", "1.00"));

  let renderers: Vec<Box<dyn ReportRenderer>> = vec![Box::new(JsonRenderer), Box::new(MarkdownRenderer)];
  let summary = generate_report(logs.path(), &config_for(out.path()), &renderers).unwrap();

  assert_eq!(summary.logs_found, 3);
  assert_eq!(summary.outcome.records_accepted, 3);
  assert!(summary.outcome.skipped.is_empty());
  assert_eq!(summary.written.len(), 2);

  let nano = summary.outcome.dataset(Mode::Nano).unwrap();
  assert_eq!(nano.versions(), &["5.15", "6.1-test"]);
  assert_eq!(nano.value("6.1-test", "Total time (s)"), Some(120.0));
  assert_eq!(nano.value("5.15", "Total time (s)"), Some(150.0));
  assert_eq!(nano.system_info("5.15"), Some("OS: Test Linux\n  CPU: 16 cores"));
  assert!(summary.outcome.dataset(Mode::Mini).is_none());

  let report = JsonReport::load(&out.path().join("benchie_report.json")).unwrap();
  assert_eq!(report.datasets.len(), 1);
  assert_eq!(report.datasets[0].mode, Mode::Nano);

  let markdown = std::fs::read_to_string(out.path().join("benchie_report.md")).unwrap();
  assert!(markdown.contains("| Total time (s) | 150.00 | 120.00 |"));
  assert!(markdown.contains("| blender render | n/a | n/a |"));
}

#[test]
fn test_one_malformed_file_is_skipped() {
  let logs = TempDir::new().unwrap();
  let out = TempDir::new().unwrap();

  for i in 0..4 {
    write(
      logs.path(),
      &format!("benchie_{i}.log"),
      &nano_log("6.1", &format!("{}.00", 100 + i)),
    );
  }
  write(
    logs.path(),
    "benchie_9.log",
    "Mode: hyper\nKernel: 6.1\nTotal time (s): 1.00\nSystem: x",
  );

  let (renderer, calls, seen) = counting();
  let summary = generate_report(logs.path(), &config_for(out.path()), &[renderer]).unwrap();

  assert_eq!(summary.outcome.records_accepted, 4);
  assert_eq!(summary.outcome.skipped.len(), 1);
  assert_eq!(summary.outcome.skipped[0].source, "benchie_9.log");
  assert!(matches!(
    summary.outcome.skipped[0].reason,
    ExtractionFailure::MissingOrUnknownMode { .. }
  ));

  let nano = summary.outcome.dataset(Mode::Nano).unwrap();
  assert_eq!(nano.value("6.1", "Total time (s)"), Some(101.5));
  assert_eq!(nano.sample_count("6.1", "Total time (s)"), 4);

  assert_eq!(calls.get(), 1);
  assert_eq!(seen.get(), 1);
}

#[test]
fn test_empty_corpus_never_renders() {
  let logs = TempDir::new().unwrap();
  let out = TempDir::new().unwrap();
  write(logs.path(), "readme.md", "nothing here");

  let (renderer, calls, _) = counting();
  let err = generate_report(logs.path(), &config_for(out.path()), &[renderer]).unwrap_err();

  assert!(matches!(
    err,
    ReportError::Pipeline(PipelineError::NoValidRecords { inspected: 0 })
  ));
  assert_eq!(calls.get(), 0);
  assert!(!out.path().join("benchie_report.json").exists());
}

#[test]
fn test_all_invalid_never_renders() {
  let logs = TempDir::new().unwrap();
  let out = TempDir::new().unwrap();
  write(logs.path(), "benchie_a.log", "Mode: nano\nTotal score: 1.00\nSystem: x");

  let (renderer, calls, _) = counting();
  let err = generate_report(logs.path(), &config_for(out.path()), &[renderer]).unwrap_err();

  assert!(matches!(
    err,
    ReportError::Pipeline(PipelineError::NoValidRecords { inspected: 1 })
  ));
  assert_eq!(calls.get(), 0);
}

#[test]
fn test_modes_are_reported_separately() {
  let logs = TempDir::new().unwrap();
  let out = TempDir::new().unwrap();

  write(logs.path(), "benchie_nano.log", &nano_log("6.1", "100.00"));
  write(
    logs.path(),
    "benchie_mini.log",
    "Mode: mini\nKernel: 6.1\nzstd compression: 12.00\nTotal time (s): 300.00\nSystem: mini host",
  );

  let (renderer, _, seen) = counting();
  let summary = generate_report(logs.path(), &config_for(out.path()), &[renderer]).unwrap();
  assert_eq!(seen.get(), 2);

  let nano = summary.outcome.dataset(Mode::Nano).unwrap();
  let mini = summary.outcome.dataset(Mode::Mini).unwrap();
  assert_eq!(nano.value("6.1", "Total time (s)"), Some(100.0));
  assert_eq!(mini.value("6.1", "Total time (s)"), Some(300.0));
  assert!(!nano.metric_names().iter().any(|n| n == "zstd compression"));
  assert!(!mini.metric_names().iter().any(|n| n == "y-cruncher pi 500m"));
}

#[test]
fn test_custom_scan_settings() {
  let logs = TempDir::new().unwrap();
  let out = TempDir::new().unwrap();

  write(logs.path(), "run_1.txt", &nano_log("6.1", "100.00"));
  write(logs.path(), "benchie_1.log", &nano_log("6.2", "100.00"));

  let mut config = config_for(out.path());
  config.scan.prefix = "run_".to_string();
  config.scan.extension = "txt".to_string();
  config.pipeline.parallel = true;

  let (renderer, _, _) = counting();
  let summary = generate_report(logs.path(), &config, &[renderer]).unwrap();
  assert_eq!(summary.logs_found, 1);
  assert_eq!(summary.outcome.dataset(Mode::Nano).unwrap().versions(), &["6.1"]);
}
