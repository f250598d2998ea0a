//! benchie - turn benchmark run logs into per-kernel-version comparison reports

use anyhow::Result;
use benchie_core::ReportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;

use commands::{cmd_config_init, cmd_config_show, cmd_modes, cmd_report};

#[derive(Parser)]
#[command(name = "benchie")]
#[command(about = "Aggregate benchmark run logs into per-kernel-version reports")]
#[command(version)]
#[command(after_help = "\
QUICK START:
  benchie report                  # Read ./benchie_*.log, write JSON and Markdown reports
  benchie report logs/ -o out/    # Read logs/, write reports to out/
  benchie modes                   # List benchmark modes and their tests")]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

/// Subcommands for `benchie config`
#[derive(Subcommand)]
pub enum ConfigCommand {
  /// Write a commented .benchie.toml into the log directory
  Init {
    /// Log directory
    #[arg(default_value = ".")]
    dir: PathBuf,
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
  },
  /// Print the effective configuration
  Show {
    /// Log directory
    #[arg(default_value = ".")]
    dir: PathBuf,
    /// Config file to use instead of the lookup chain
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

#[derive(Subcommand)]
enum Commands {
  /// Extract, aggregate and render every log in a directory
  Report {
    /// Directory containing the logs
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Output directory for reports
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report formats (json, markdown); repeat or comma-separate
    #[arg(short, long, value_delimiter = ',')]
    format: Vec<ReportFormat>,

    /// Extract logs in parallel
    #[arg(long)]
    parallel: bool,

    /// Config file to use instead of the lookup chain
    #[arg(short, long)]
    config: Option<PathBuf>,
  },

  /// Manage configuration
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },

  /// List benchmark modes and their recognized tests
  Modes,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Commands::Report {
      dir,
      output,
      format,
      parallel,
      config,
    } => cmd_report(dir, output, format, parallel, config, cli.verbose),
    Commands::Config { command } => match command {
      ConfigCommand::Init { dir, force } => cmd_config_init(dir, force, cli.verbose),
      ConfigCommand::Show { dir, config } => cmd_config_show(dir, config, cli.verbose),
    },
    Commands::Modes => cmd_modes(),
  }
}
