use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::tcp::TcpTransport;
use super::transport::Transport;
use crate::system::system_name_servers;
use async_trait::async_trait;
use nsprobe_application::ports::NameServerExchange;
use nsprobe_domain::{DnsAnswer, DnsQuery, DomainError, NameServerTarget};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Sends single DNS questions over the wire.
///
/// `Address` targets are reached on the configured port. The `System` target
/// rotates through the host's configured name servers by attempt number.
pub struct WireExchange {
    port: u16,
    system_servers: Arc<[SocketAddr]>,
}

impl WireExchange {
    pub fn new(port: u16, system_servers: Vec<SocketAddr>) -> Self {
        Self {
            port,
            system_servers: Arc::from(system_servers),
        }
    }

    /// Reads the system name servers from the host resolver configuration.
    pub fn from_system(port: u16) -> Self {
        Self::new(port, system_name_servers())
    }

    pub fn system_servers(&self) -> &[SocketAddr] {
        &self.system_servers
    }

    pub fn server_for(
        &self,
        target: NameServerTarget,
        attempt: u32,
    ) -> Result<SocketAddr, DomainError> {
        match target {
            NameServerTarget::Address(ip) => Ok(self.socket_addr(ip)),
            NameServerTarget::System => {
                if self.system_servers.is_empty() {
                    return Err(DomainError::NoSystemNameServers);
                }
                Ok(self.system_servers[attempt as usize % self.system_servers.len()])
            }
        }
    }

    fn socket_addr(&self, ip: IpAddr) -> SocketAddr {
        SocketAddr::new(ip, self.port)
    }

    async fn round_trip(
        transport: &Transport,
        server: SocketAddr,
        query: &DnsQuery,
        id: u16,
        message: &[u8],
        timeout: Duration,
    ) -> Result<DnsAnswer, DomainError> {
        let response = transport.send(message, timeout).await?;
        let parsed = ResponseParser::parse(&response.bytes)?;

        if parsed.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} answered with id {} instead of {}",
                server, parsed.id, id
            )));
        }

        match &parsed.question {
            Some(echoed) if Self::same_question(echoed, query) => Ok(parsed.answer),
            Some(echoed) => Err(DomainError::InvalidDnsResponse(format!(
                "{} answered '{}' to '{}'",
                server, echoed, query
            ))),
            None => Err(DomainError::InvalidDnsResponse(format!(
                "{} answered '{}' without a matching question",
                server, query
            ))),
        }
    }

    fn same_question(echoed: &DnsQuery, sent: &DnsQuery) -> bool {
        echoed.record_type == sent.record_type
            && echoed
                .domain
                .eq_ignore_ascii_case(sent.domain.trim_end_matches('.'))
    }
}

#[async_trait]
impl NameServerExchange for WireExchange {
    async fn exchange(
        &self,
        target: NameServerTarget,
        query: &DnsQuery,
        timeout: Duration,
        attempt: u32,
    ) -> Result<DnsAnswer, DomainError> {
        let server = self.server_for(target, attempt)?;
        let (id, message) = MessageBuilder::build_query_with_id(&query.domain, &query.record_type)?;
        let transport = Transport::for_attempt(server, attempt);

        trace!(
            query = %query,
            server = %server,
            protocol = transport.protocol_name(),
            attempt,
            "Sending query"
        );

        let answer = Self::round_trip(&transport, server, query, id, &message, timeout).await?;
        if !(answer.truncated && transport.is_udp()) {
            return Ok(answer);
        }

        debug!(query = %query, server = %server, "Truncated UDP answer, retrying over TCP");
        let (id, message) = MessageBuilder::build_query_with_id(&query.domain, &query.record_type)?;
        let tcp = Transport::Tcp(TcpTransport::new(server));
        Self::round_trip(&tcp, server, query, id, &message, timeout).await
    }
}
