use super::{map_io_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use nsprobe_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP, one socket per query.
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let bind_addr = if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| map_io_error(self.server_addr, e))?;
        // Connected: datagrams from other sources are dropped and ICMP
        // port-unreachable surfaces as ConnectionRefused.
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| map_io_error(self.server_addr, e))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| map_io_error(self.server_addr, e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = socket
            .recv(&mut recv_buf)
            .await
            .map_err(|e| map_io_error(self.server_addr, e))?;
        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
