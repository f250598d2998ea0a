//! Log discovery and reading.

use std::path::{Path, PathBuf};

use benchie_core::LogInput;
use benchie_core::config::ScanConfig;
use tracing::{debug, warn};

/// A discovered log that could not be read.
#[derive(Debug)]
pub struct UnreadableLog {
  pub path: PathBuf,
  pub error: std::io::Error,
}

/// Regular files in `dir` (not recursive) matching the scan settings, sorted by path.
pub fn discover_logs(dir: &Path, scan: &ScanConfig) -> std::io::Result<Vec<PathBuf>> {
  let mut logs = Vec::new();

  for entry in std::fs::read_dir(dir)? {
    let path = entry?.path();
    let matches = path
      .file_name()
      .and_then(|n| n.to_str())
      .is_some_and(|name| scan.matches(name));
    if matches && path.is_file() {
      logs.push(path);
    }
  }

  // read_dir order is platform dependent
  logs.sort();
  Ok(logs)
}

/// Read each log as text. Invalid UTF-8 is replaced, unreadable files are reported and skipped.
pub fn read_logs(paths: &[PathBuf]) -> (Vec<LogInput>, Vec<UnreadableLog>) {
  let mut inputs = Vec::with_capacity(paths.len());
  let mut unreadable = Vec::new();

  for path in paths {
    match std::fs::read(path) {
      Ok(bytes) => {
        debug!("Read {} ({} bytes)", path.display(), bytes.len());
        inputs.push(LogInput::new(
          source_name(path),
          String::from_utf8_lossy(&bytes).into_owned(),
        ));
      }
      Err(error) => {
        warn!("Skipping {}: {}", path.display(), error);
        unreadable.push(UnreadableLog {
          path: path.clone(),
          error,
        });
      }
    }
  }

  (inputs, unreadable)
}

fn source_name(path: &Path) -> String {
  path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.display().to_string())
}
