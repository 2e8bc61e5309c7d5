use async_trait::async_trait;
use nsprobe_domain::{DnsAnswer, DnsQuery, DomainError, NameServerTarget};
use std::time::Duration;

/// Sends one DNS question to one server and returns the parsed answer.
///
/// `attempt` grows with every retry (offset by the validation round) and lets
/// the implementation vary the transport path: UDP vs TCP, or which system
/// name server is used. A response with a server error status is returned as
/// `Ok`; classifying it is up to the caller.
#[async_trait]
pub trait NameServerExchange: Send + Sync {
    async fn exchange(
        &self,
        target: NameServerTarget,
        query: &DnsQuery,
        timeout: Duration,
        attempt: u32,
    ) -> Result<DnsAnswer, DomainError>;
}
