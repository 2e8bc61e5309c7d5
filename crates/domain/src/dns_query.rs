use super::RecordType;
use std::fmt;
use std::sync::Arc;

/// DNS question (domain + record type).
/// Uses `Arc<str>` so retries and transports can share the name without copying.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }
}

impl fmt::Display for DnsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.domain, self.record_type)
    }
}
