#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_exchange;
pub mod mock_resolvers;

pub use mock_exchange::{ExchangeCall, MockExchange};
pub use mock_resolvers::{MockBootstrap, StaticRootZones};

use nsprobe_application::services::{ResolverPool, ResolverPoolSettings};
use nsprobe_domain::NameServerTarget;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

pub fn at(s: &str) -> NameServerTarget {
    NameServerTarget::Address(ip(s))
}

pub fn settings(dns_servers: &[&str]) -> ResolverPoolSettings {
    ResolverPoolSettings {
        dns_servers: dns_servers.iter().map(|s| s.to_string()).collect(),
        query_timeout: Duration::from_millis(500),
        retries: 3,
    }
}

pub fn build_pool(exchange: Arc<MockExchange>, dns_servers: &[&str]) -> Arc<ResolverPool> {
    build_pool_with(exchange, settings(dns_servers), MockBootstrap::new())
}

pub fn build_pool_with(
    exchange: Arc<MockExchange>,
    settings: ResolverPoolSettings,
    bootstrap: Arc<MockBootstrap>,
) -> Arc<ResolverPool> {
    ResolverPool::new(settings, StaticRootZones::new(), exchange, bootstrap)
}
