//! Configuration module for nsprobe
//!
//! - `root`: Main configuration and CLI overrides
//! - `validation`: DNS servers, timeouts and retries used by name server discovery
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod logging;
pub mod root;
pub mod validation;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use validation::ValidationConfig;
