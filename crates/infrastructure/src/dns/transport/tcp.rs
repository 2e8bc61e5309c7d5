use super::{map_io_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::{BufMut, BytesMut};
use nsprobe_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP: every message is preceded by its length as a big-endian u16.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    /// Prefixes `message_bytes` with its 2-byte length.
    pub fn frame(message_bytes: &[u8]) -> Result<BytesMut, DomainError> {
        let len = u16::try_from(message_bytes.len()).map_err(|_| {
            DomainError::InvalidArgument(format!(
                "DNS message of {} bytes does not fit a TCP frame",
                message_bytes.len()
            ))
        })?;
        let mut frame = BytesMut::with_capacity(2 + message_bytes.len());
        frame.put_u16(len);
        frame.put_slice(message_bytes);
        Ok(frame)
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let frame = Self::frame(message_bytes)?;
        let map = |e| map_io_error(self.server_addr, e);

        let mut stream = TcpStream::connect(self.server_addr).await.map_err(map)?;
        stream.write_all(&frame).await.map_err(map)?;
        stream.flush().await.map_err(map)?;

        debug!(server = %self.server_addr, bytes_sent = frame.len(), "TCP query sent");

        let len = stream.read_u16().await.map_err(map)? as usize;
        let mut response = vec![0u8; len];
        stream.read_exact(&mut response).await.map_err(map)?;

        debug!(server = %self.server_addr, bytes_received = len, "TCP response received");

        Ok(response)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
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
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
