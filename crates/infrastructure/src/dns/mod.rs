pub mod exchange;
pub mod forwarding;
pub mod transport;

pub use exchange::WireExchange;
pub use forwarding::{DnsResponse, MessageBuilder, ResponseParser};
pub use transport::Transport;
