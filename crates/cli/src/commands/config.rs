//! `benchie config`

use std::path::PathBuf;

use anyhow::{Context, Result};
use benchie_core::Config;
use tracing::error;

use crate::logging::init_logging;

pub fn cmd_config_init(dir: PathBuf, force: bool, verbose: bool) -> Result<()> {
  init_logging("info", verbose);

  let config_path = Config::project_config_path(&dir);
  if config_path.exists() && !force {
    error!("Config file already exists: {}", config_path.display());
    anyhow::bail!("refusing to overwrite {} (use --force)", config_path.display());
  }

  std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
  std::fs::write(&config_path, Config::generate_template())
    .with_context(|| format!("writing {}", config_path.display()))?;

  println!("Created config: {}", config_path.display());
  println!("Edit the file to customize settings.");
  Ok(())
}

pub fn cmd_config_show(dir: PathBuf, config_path: Option<PathBuf>, verbose: bool) -> Result<()> {
  init_logging("info", verbose);

  let config = Config::load(config_path.as_deref(), &dir).context("loading configuration")?;
  print!("{}", config.to_toml()?);
  Ok(())
}
