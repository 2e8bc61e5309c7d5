use serde::{Deserialize, Serialize};

use super::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (default: "info")
    /// Options: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ConfigError::Validation(format!(
                "Unknown log level '{}', expected one of {}",
                self.level,
                LOG_LEVELS.join(", ")
            )))
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
