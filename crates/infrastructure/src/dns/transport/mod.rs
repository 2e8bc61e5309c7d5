pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use nsprobe_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Vec<u8>,
    /// Which protocol was used
    pub protocol_used: &'static str,
}

/// Trait for sending raw DNS messages over the wire
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// Enum-dispatched transport.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    /// UDP on even attempts, TCP on odd ones, so a retry sequence alternates
    /// protocols.
    pub fn for_attempt(server_addr: SocketAddr, attempt: u32) -> Self {
        if attempt % 2 == 0 {
            Self::Udp(udp::UdpTransport::new(server_addr))
        } else {
            Self::Tcp(tcp::TcpTransport::new(server_addr))
        }
    }

    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    /// Protocol name for logging.
    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }

    pub fn is_udp(&self) -> bool {
        matches!(self, Self::Udp(_))
    }
}

/// Maps socket errors onto the transport error variants.
pub(crate) fn map_io_error(server: SocketAddr, error: io::Error) -> DomainError {
    let server_name = server.to_string();
    match error.kind() {
        io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
            server: server_name,
        },
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof => DomainError::TransportConnectionReset {
            server: server_name,
        },
        io::ErrorKind::TimedOut => DomainError::TransportTimeout {
            server: server_name,
        },
        _ => DomainError::IoError(format!("{}: {}", server_name, error)),
    }
}
