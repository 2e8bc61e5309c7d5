#![allow(dead_code)]
use hickory_proto::op::Message;
use hickory_proto::serialize::binary::BinEncodable;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    Tcp,
}

/// Builds the reply for a query; `None` leaves the query unanswered.
pub type Handler = Arc<dyn Fn(&Message, Protocol) -> Option<Message> + Send + Sync>;

#[derive(Default)]
struct Counters {
    udp: AtomicUsize,
    tcp: AtomicUsize,
}

/// In-process DNS server listening on UDP and TCP on the same loopback port.
pub struct MockDnsServer {
    addr: SocketAddr,
    counters: Arc<Counters>,
    tasks: Vec<JoinHandle<()>>,
}

impl MockDnsServer {
    pub async fn start<F>(handler: F) -> std::io::Result<Self>
    where
        F: Fn(&Message, Protocol) -> Option<Message> + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        let (listener, socket) = Self::bind_pair().await?;
        let addr = socket.local_addr()?;
        let counters = Arc::new(Counters::default());

        let udp_task = {
            let handler = Arc::clone(&handler);
            let counters = Arc::clone(&counters);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                loop {
                    let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                        break;
                    };
                    counters.udp.fetch_add(1, Ordering::SeqCst);
                    if let Some(reply) = Self::answer(&handler, &buf[..len], Protocol::Udp) {
                        let _ = socket.send_to(&reply, peer).await;
                    }
                }
            })
        };

        let tcp_task = {
            let handler = Arc::clone(&handler);
            let counters = Arc::clone(&counters);
            tokio::spawn(async move {
                while let Ok((mut stream, _)) = listener.accept().await {
                    let handler = Arc::clone(&handler);
                    let counters = Arc::clone(&counters);
                    tokio::spawn(async move {
                        let Ok(len) = stream.read_u16().await else {
                            return;
                        };
                        let mut query = vec![0u8; len as usize];
                        if stream.read_exact(&mut query).await.is_err() {
                            return;
                        }
                        counters.tcp.fetch_add(1, Ordering::SeqCst);
                        if let Some(reply) = Self::answer(&handler, &query, Protocol::Tcp) {
                            let _ = stream.write_u16(reply.len() as u16).await;
                            let _ = stream.write_all(&reply).await;
                        }
                    });
                }
            })
        };

        Ok(Self {
            addr,
            counters,
            tasks: vec![udp_task, tcp_task],
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn udp_queries(&self) -> usize {
        self.counters.udp.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.counters.tcp.load(Ordering::SeqCst)
    }

    fn answer(handler: &Handler, query: &[u8], protocol: Protocol) -> Option<Vec<u8>> {
        let query = Message::from_vec(query).ok()?;
        handler(&query, protocol)?.to_vec().ok()
    }

    /// TCP listener and UDP socket sharing one ephemeral port.
    async fn bind_pair() -> std::io::Result<(TcpListener, UdpSocket)> {
        let mut last_error = None;
        for _ in 0..10 {
            let listener = TcpListener::bind("127.0.0.1:0").await?;
            let addr = listener.local_addr()?;
            match UdpSocket::bind(addr).await {
                Ok(socket) => return Ok((listener, socket)),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| std::io::Error::other("no free port")))
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
