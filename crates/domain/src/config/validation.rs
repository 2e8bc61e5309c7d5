use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Settings for authoritative name server discovery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Default DNS servers, tried round-robin per validation round.
    /// Each entry is an IP address, a host name, or "[System]".
    /// An empty list means the system default resolver.
    #[serde(default)]
    pub dns_servers: Vec<String>,

    /// Per-query timeout in milliseconds (default: 5000)
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Attempts per query before giving up (default: 3)
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Port used to reach every name server (default: 53)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Optional path to a public suffix list in the publicsuffix.org format
    #[serde(default)]
    pub public_suffix_list: Option<String>,
}

impl ValidationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "validation.query_timeout_ms must be greater than 0".into(),
            ));
        }
        if self.retries == 0 {
            return Err(ConfigError::Validation(
                "validation.retries must be at least 1".into(),
            ));
        }
        if self.port == 0 {
            return Err(ConfigError::Validation(
                "validation.port cannot be 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            dns_servers: vec![],
            query_timeout_ms: default_query_timeout_ms(),
            retries: default_retries(),
            port: default_port(),
            public_suffix_list: None,
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    5000
}

fn default_retries() -> u32 {
    3
}

fn default_port() -> u16 {
    53
}
