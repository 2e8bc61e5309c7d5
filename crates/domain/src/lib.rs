//! nsprobe Domain Layer
pub mod config;
pub mod dns_answer;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod name_server;
pub mod zone_name;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ValidationConfig};
pub use dns_answer::{AnswerRecord, DnsAnswer, RecordData, ResponseStatus};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use name_server::{DnsServerEntry, NameServerTarget, SYSTEM_RESOLVER_SENTINEL};
pub use zone_name::ZoneWalk;
