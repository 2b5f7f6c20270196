//! CLI command implementations.

pub mod check;
pub mod edit;
pub mod export;
pub mod new;
pub mod schedule;
pub mod show;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use coursesite_core::{Config, CourseRecord, load_record};

/// Load the exporter configuration, falling back to defaults when the file is absent.
pub(crate) fn load_config(config_path: &Path) -> Result<Config> {
    let config = Config::load_or_default(config_path).wrap_err("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}

pub(crate) fn open_record(record_path: &Path) -> Result<CourseRecord> {
    load_record(record_path)
        .wrap_err_with(|| format!("Failed to load course record {}", record_path.display()))
}
