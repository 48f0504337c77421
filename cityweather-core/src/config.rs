use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fs, path::Path};

use crate::error::ConfigError;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Settings loaded once per run from a JSON file.
///
/// Example:
/// {"api_key": "..."}
///
/// Keys other than `api_key` are kept as-is in `extra`, so a loaded config
/// round-trips through [`Config::save`] unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), extra: Map::new() }
    }

    /// Load config from `path`. A missing, unreadable or malformed file is an error;
    /// there is no fallback to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;

        let cfg: Config = serde_json::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

        tracing::debug!(path = %path.display(), extra_keys = cfg.extra.len(), "loaded config");
        Ok(cfg)
    }

    /// Save config to `path` as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| ConfigError::Write { path: parent.to_path_buf(), source })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        fs::write(path, json)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })?;

        Ok(())
    }

    /// Load the config at `path` if it exists and replace its API key, keeping other keys.
    /// Used by `configure`; a present-but-malformed file is still an error.
    pub fn upsert_api_key(path: impl AsRef<Path>, api_key: String) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let mut cfg = if path.exists() { Self::load(path)? } else { Self::new(String::new()) };
        cfg.api_key = api_key;
        cfg.save(path)?;

        Ok(cfg)
    }
}
