//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod scan;

use relot_core::RelotConfig;

/// Load the config file if one was given, otherwise use defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<RelotConfig> {
    match config_path {
        Some(path) => Ok(RelotConfig::from_file(std::path::Path::new(path))?),
        None => Ok(RelotConfig::default()),
    }
}
