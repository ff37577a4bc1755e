mod config;

pub use config::{Config, SimulationConfig, SleepConfig, WorkConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/fatiguecalc[-dev]/` based on FATIGUECALC_ENV.
///
/// Set FATIGUECALC_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FATIGUECALC_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fatiguecalc-dev")
    } else {
        base_dir.join("fatiguecalc")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirectoryUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
