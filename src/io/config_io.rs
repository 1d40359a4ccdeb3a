use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::DeskConfig;

/// Error type for desk.toml handling
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse desk.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Read desk.toml from the content root. A missing file is not an error;
/// it yields the default configuration.
pub fn read_config(content_dir: &Path) -> Result<DeskConfig, ConfigError> {
    let config_path = content_dir.join("desk.toml");
    if !config_path.exists() {
        return Ok(DeskConfig::default());
    }
    let text = fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}
