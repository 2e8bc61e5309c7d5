use hickory_resolver::system_conf::read_system_conf;
use std::net::SocketAddr;
use tracing::{debug, warn};

/// Name servers from the host resolver configuration (`/etc/resolv.conf`
/// on Unix), in configured order and without duplicates.
///
/// An unreadable configuration yields an empty list.
pub fn system_name_servers() -> Vec<SocketAddr> {
    match read_system_conf() {
        Ok((config, _)) => {
            let servers = dedup(config.name_servers().iter().map(|ns| ns.socket_addr));
            debug!(servers = ?servers, "System name servers loaded");
            servers
        }
        Err(e) => {
            warn!(error = %e, "Unable to read system resolver configuration");
            Vec::new()
        }
    }
}

/// hickory lists every server once per protocol.
fn dedup(addresses: impl Iterator<Item = SocketAddr>) -> Vec<SocketAddr> {
    let mut unique: Vec<SocketAddr> = Vec::new();
    for addr in addresses {
        if !unique.contains(&addr) {
            unique.push(addr);
        }
    }
    unique
}
