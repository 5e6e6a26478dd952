//! Engine configuration loaded from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use jyoti_vedic_base::{EngineConfig, VedicError};
use thiserror::Error;

/// Errors from reading `--config`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config {path}: {source}")]
    Invalid { path: PathBuf, source: VedicError },
}

/// Parse and validate an engine config from TOML text.
pub fn parse_config(text: &str, path: &Path) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config)
}

/// Load the config at `path`, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text, path)?;
    tracing::debug!(path = %path.display(), "loaded engine config");
    Ok(config)
}
