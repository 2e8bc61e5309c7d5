use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("{server} answered {status}")]
    ServerFailure { server: String, status: String },

    #[error("No system name servers configured")]
    NoSystemNameServers,

    #[error("Querying {zone} at {server} failed after {attempts} attempts: {reason}")]
    QueryFailed {
        zone: String,
        server: String,
        attempts: u32,
        reason: String,
    },

    #[error("Unable to determine name servers for domain {0}")]
    NoAuthoritativeServer(String),

    #[error("Name servers of {zone} could not be resolved: {hosts}")]
    UnresolvableNameServers { zone: String, hosts: String },

    #[error("Resolver pool is no longer available")]
    PoolUnavailable,
}

impl DomainError {
    /// Network noise on a single query; absorbed by local retries.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
                | DomainError::ServerFailure { .. }
                | DomainError::InvalidDnsResponse(_)
                | DomainError::IoError(_)
        )
    }

    /// Discovery could not produce a resolver set for the requested domain.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            DomainError::QueryFailed { .. }
                | DomainError::NoAuthoritativeServer(_)
                | DomainError::UnresolvableNameServers { .. }
                | DomainError::PoolUnavailable
        )
    }
}
