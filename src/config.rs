//! Configuration file handling.
//!
//! This module provides loading and parsing of `.query_layer.json` configuration files:
//! where the database lives, how to open it, and how to log.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::{ConnectOptions, DatabaseConfig};
use crate::logging::{LogConfig, LogFormat};

/// Config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".query_layer.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Database configuration
    pub database: DatabaseConfigFile,

    /// Open the database read-only
    #[serde(default)]
    pub read_only: bool,

    /// Schema version the database must carry
    #[serde(default)]
    pub required_version: Option<i64>,

    #[serde(default)]
    pub logging: LoggingConfigFile,
}

/// Database location variants, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfigFile {
    /// SQLite database file
    Sqlite { path: PathBuf },
    /// In-memory database
    #[serde(rename = "memory")]
    Mem,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfigFile {
    /// Default filter when `RUST_LOG` is unset, e.g. `"info"` or `"query_layer=debug"`
    #[serde(default)]
    pub level: Option<String>,

    /// `"compact"` (default) or `"pretty"`
    #[serde(default)]
    pub format: Option<LogFormat>,
}

impl LoggingConfigFile {
    /// Logging setup described by this section, with `level_override` taking precedence.
    pub fn to_log_config(&self, level_override: Option<&str>) -> LogConfig {
        let mut config = LogConfig::default();
        if let Some(level) = level_override.or(self.level.as_deref()) {
            config = config.with_level(level);
        }
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        config
    }
}

impl ConfigFile {
    /// Load `.query_layer.json` if present; a missing file is not an error.
    pub fn load_if_present() -> Result<Option<Self>, Box<dyn Error>> {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(None);
        }
        Self::load_from(&config_path).map(Some)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to read {}: {}", path.display(), e),
            )) as Box<dyn Error>
        })?;

        let config: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid JSON in {}: {}", path.display(), e),
            )) as Box<dyn Error>
        })?;

        Ok(config)
    }

    /// Connect options described by this file.
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            read_only: self.read_only,
            required_version: self.required_version,
        }
    }
}

impl DatabaseConfigFile {
    /// Convert this configuration to a DatabaseConfig.
    pub fn to_database_config(&self) -> DatabaseConfig {
        match self {
            Self::Sqlite { path } => DatabaseConfig::Sqlite { path: path.clone() },
            Self::Mem => DatabaseConfig::Memory,
        }
    }
}
