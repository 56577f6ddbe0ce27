//! Configuration persistence for daymeter.

mod config;

pub use config::{CalendarConfig, EventTypeDef};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/daymeter[-dev]/` based on DAYMETER_ENV.
///
/// Set DAYMETER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the configuration directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAYMETER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("daymeter-dev")
    } else {
        base_dir.join("daymeter")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
