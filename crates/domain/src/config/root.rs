use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ConfigError, LoggingConfig, ValidationConfig};

const DEFAULT_CONFIG_FILE: &str = "nsprobe.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    /// Replaces `validation.dns_servers` when non-empty
    pub dns_servers: Vec<String>,
    pub query_timeout_ms: Option<u64>,
    pub public_suffix_list: Option<String>,
}

impl Config {
    /// Loads `config_path`, or `nsprobe.toml` from the working directory when
    /// present, or the defaults. An explicitly given path must exist.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(path, &content)
    }

    pub fn from_toml(path: &str, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if !overrides.dns_servers.is_empty() {
            self.validation.dns_servers = overrides.dns_servers;
        }
        if let Some(timeout) = overrides.query_timeout_ms {
            self.validation.query_timeout_ms = timeout;
        }
        if let Some(path) = overrides.public_suffix_list {
            self.validation.public_suffix_list = Some(path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validation.validate()?;
        self.logging.validate()
    }
}
