use async_trait::async_trait;
use nsprobe_domain::DomainError;
use std::net::IpAddr;

/// One-off host name lookup through the host's default settings.
///
/// Only used to turn host name entries of the configured DNS server list into
/// addresses while the default resolver list is built.
#[async_trait]
pub trait HostAddressLookup: Send + Sync {
    async fn lookup_host(&self, hostname: &str) -> Result<Vec<IpAddr>, DomainError>;
}
