use crate::errors::DomainError;
use crate::zone_name;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Configuration value meaning "use the host's system default resolver".
pub const SYSTEM_RESOLVER_SENTINEL: &str = "[System]";

/// The server a resolver handle is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameServerTarget {
    /// The host's system-default resolver.
    System,
    Address(IpAddr),
}

impl NameServerTarget {
    pub fn address(&self) -> Option<IpAddr> {
        match self {
            NameServerTarget::System => None,
            NameServerTarget::Address(ip) => Some(*ip),
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, NameServerTarget::System)
    }
}

impl fmt::Display for NameServerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameServerTarget::System => write!(f, "{}", SYSTEM_RESOLVER_SENTINEL),
            NameServerTarget::Address(ip) => write!(f, "{}", ip),
        }
    }
}

/// One entry of the configured default DNS server list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsServerEntry {
    Address(IpAddr),
    System,
    /// Resolved once through a bootstrap lookup when the default list is built.
    Hostname(String),
}

impl FromStr for DnsServerEntry {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let item = s.trim();
        if item.is_empty() {
            return Err(DomainError::InvalidArgument(
                "DNS server entry cannot be empty".into(),
            ));
        }

        if let Ok(ip) = item.parse::<IpAddr>() {
            return Ok(DnsServerEntry::Address(ip));
        }

        if item.eq_ignore_ascii_case(SYSTEM_RESOLVER_SENTINEL) {
            return Ok(DnsServerEntry::System);
        }

        let host = zone_name::normalize(item).map_err(|_| {
            DomainError::InvalidArgument(format!("'{}' is not an IP address or host name", item))
        })?;
        Ok(DnsServerEntry::Hostname(host))
    }
}

impl fmt::Display for DnsServerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsServerEntry::Address(ip) => write!(f, "{}", ip),
            DnsServerEntry::System => write!(f, "{}", SYSTEM_RESOLVER_SENTINEL),
            DnsServerEntry::Hostname(host) => write!(f, "{}", host),
        }
    }
}
