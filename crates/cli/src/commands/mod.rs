//! CLI command implementations

mod config;
mod modes;
mod report;

pub use config::{cmd_config_init, cmd_config_show};
pub use modes::cmd_modes;
pub use report::cmd_report;
