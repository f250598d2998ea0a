//! Logging setup for the CLI

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Parse log level from config string
fn parse_log_level(level: &str) -> LevelFilter {
  match level.to_lowercase().as_str() {
    "off" => LevelFilter::OFF,
    "error" => LevelFilter::ERROR,
    "warn" => LevelFilter::WARN,
    "info" => LevelFilter::INFO,
    "debug" => LevelFilter::DEBUG,
    "trace" => LevelFilter::TRACE,
    _ => LevelFilter::INFO,
  }
}

/// Initialize console logging.
///
/// `--verbose` forces debug; otherwise the configured level applies. RUST_LOG
/// overrides both.
pub fn init_logging(config_level: &str, verbose: bool) {
  let level = if verbose {
    LevelFilter::DEBUG
  } else {
    parse_log_level(config_level)
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_log_level() {
    assert_eq!(parse_log_level("WARN"), LevelFilter::WARN);
    assert_eq!(parse_log_level("error"), LevelFilter::ERROR);
    assert_eq!(parse_log_level("trace"), LevelFilter::TRACE);
    assert_eq!(parse_log_level("loud"), LevelFilter::INFO);
  }

  #[test]
  fn test_off_silences_errors() {
    let off = parse_log_level("Off");
    assert_eq!(off, LevelFilter::OFF);
    assert!(tracing::Level::ERROR > off);
  }
}
