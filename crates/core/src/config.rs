//! Configuration for benchie with per-directory overrides.
//!
//! Config priority: explicit path > log directory (.benchie.toml) > user (~/.config/benchie/config.toml) > defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// File name looked up inside the log directory
pub const PROJECT_CONFIG_FILE: &str = ".benchie.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("TOML parse error in {}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("TOML serialize error: {0}")]
  Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A config file in the lookup chain that exists but failed to load.
#[derive(Debug)]
pub struct IgnoredConfig {
  pub path: PathBuf,
  pub error: ConfigError,
}

// ============================================================================
// Scan Configuration
// ============================================================================

/// Which files in the log directory count as benchmark logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
  /// File name prefix (default: "benchie_")
  pub prefix: String,

  /// File extension without the dot (default: "log")
  pub extension: String,
}

impl Default for ScanConfig {
  fn default() -> Self {
    Self {
      prefix: "benchie_".to_string(),
      extension: "log".to_string(),
    }
  }
}

impl ScanConfig {
  /// Whether a file name matches prefix and extension.
  pub fn matches(&self, file_name: &str) -> bool {
    let Some(stem) = file_name.strip_suffix(&self.extension) else {
      return false;
    };
    stem.ends_with('.') && file_name.starts_with(&self.prefix)
  }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Report formats the CLI can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
  Json,
  Markdown,
}

impl ReportFormat {
  pub fn name(&self) -> &'static str {
    match self {
      ReportFormat::Json => "json",
      ReportFormat::Markdown => "markdown",
    }
  }
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl std::str::FromStr for ReportFormat {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "json" => Ok(ReportFormat::Json),
      "markdown" | "md" => Ok(ReportFormat::Markdown),
      _ => Err(format!("Unknown report format: {}", s)),
    }
  }
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
  /// Directory reports are written to, relative to the working directory
  pub directory: PathBuf,

  /// Formats to render (default: json and markdown)
  pub formats: Vec<ReportFormat>,
}

impl Default for OutputConfig {
  fn default() -> Self {
    Self {
      directory: PathBuf::from("."),
      formats: vec![ReportFormat::Json, ReportFormat::Markdown],
    }
  }
}

// ============================================================================
// Pipeline Configuration
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
  /// Extract logs in parallel (output is identical either way)
  pub parallel: bool,
}

// ============================================================================
// Logging Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Log level: error, warn, info, debug, trace (default: "info")
  pub level: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: "info".to_string(),
    }
  }
}

// ============================================================================
// Main Configuration
// ============================================================================

/// benchie configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Log discovery settings
  pub scan: ScanConfig,

  /// Report output settings
  pub output: OutputConfig,

  /// Pipeline execution settings
  pub pipeline: PipelineConfig,

  /// Logging settings
  pub logging: LoggingConfig,
}

impl Config {
  /// Load config for a log directory, optionally from an explicit file.
  ///
  /// An explicit file must exist and parse. Project and user files that fail to
  /// load are skipped with a warning; see [`Config::resolve`] to get them back.
  pub fn load(explicit: Option<&Path>, log_dir: &Path) -> Result<Self> {
    let (config, ignored) = Self::resolve(explicit, log_dir)?;
    for skipped in &ignored {
      warn!("Ignoring {}: {}", skipped.path.display(), skipped.error);
    }
    Ok(config)
  }

  /// Like [`Config::load`], but returns skipped files instead of logging them.
  ///
  /// For callers that install a subscriber only after the config is known.
  pub fn resolve(explicit: Option<&Path>, log_dir: &Path) -> Result<(Self, Vec<IgnoredConfig>)> {
    if let Some(path) = explicit {
      return Ok((Self::load_file(path)?, Vec::new()));
    }

    let mut ignored = Vec::new();
    let candidates = [Some(Self::project_config_path(log_dir)), Self::user_config_path()];
    for path in candidates.into_iter().flatten() {
      if !path.exists() {
        continue;
      }
      match Self::load_file(&path) {
        Ok(config) => return Ok((config, ignored)),
        Err(error) => ignored.push(IgnoredConfig { path, error }),
      }
    }

    Ok((Self::default(), ignored))
  }

  /// Parse one config file.
  pub fn load_file(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("BENCHIE_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("benchie").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("benchie").join("config.toml"))
  }

  /// Get the directory-relative config path
  pub fn project_config_path(log_dir: &Path) -> PathBuf {
    log_dir.join(PROJECT_CONFIG_FILE)
  }

  /// Effective config rendered as TOML.
  pub fn to_toml(&self) -> Result<String> {
    Ok(toml::to_string_pretty(self)?)
  }

  /// Generate a commented config file with default values
  pub fn generate_template() -> String {
    let defaults = Self::default();
    let formats = defaults
      .output
      .formats
      .iter()
      .map(|f| format!("\"{}\"", f.name()))
      .collect::<Vec<_>>()
      .join(", ");

    format!(
      r#"# benchie configuration
# Place in <log dir>/{project_file} (per directory) or ~/.config/benchie/config.toml (user)

# ============================================================================
# Log Discovery
# ============================================================================

[scan]
# Only files named <prefix>*.<extension> are read
prefix = "{prefix}"
extension = "{extension}"

# ============================================================================
# Reports
# ============================================================================

[output]
# Directory reports are written to
directory = "{directory}"

# Formats: json, markdown
formats = [{formats}]

# ============================================================================
# Pipeline
# ============================================================================

[pipeline]
# Extract logs on all cores. Results are identical to a sequential run.
parallel = {parallel}

# ============================================================================
# Logging
# ============================================================================

[logging]
# error, warn, info, debug, trace (RUST_LOG overrides)
level = "{level}"
"#,
      project_file = PROJECT_CONFIG_FILE,
      prefix = defaults.scan.prefix,
      extension = defaults.scan.extension,
      directory = defaults.output.directory.display(),
      formats = formats,
      parallel = defaults.pipeline.parallel,
      level = defaults.logging.level,
    )
  }
}
