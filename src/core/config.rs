//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::store::DEFAULT_DATA_FILE;

/// Local config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "stockroom.yaml";

/// Stockroom configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data file holding the company state
    pub data_file: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let global = Self::global_config_path();
        let mut config = Self::load_from(global.as_deref(), Some(Path::new(LOCAL_CONFIG_FILE)));

        // Environment variables
        if let Ok(data) = std::env::var("STOCKROOM_DATA") {
            if !data.is_empty() {
                config.data_file = Some(PathBuf::from(data));
            }
        }
        if let Ok(format) = std::env::var("STOCKROOM_FORMAT") {
            if !format.is_empty() {
                config.default_format = Some(format);
            }
        }

        config
    }

    /// Merge the user config and the local config files (local wins).
    ///
    /// Missing or unreadable files are skipped.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Self {
        let mut config = Config::default();
        for path in [global, local].into_iter().flatten() {
            if let Some(layer) = Self::read_file(path) {
                config.merge(layer);
            }
        }
        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                None
            }
        }
    }

    /// Get the path to the per-user config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stockroom")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// The data file to use: explicit override, then config, then the default name
    pub fn data_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}
