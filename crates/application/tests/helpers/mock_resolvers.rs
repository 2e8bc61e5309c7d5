#![allow(dead_code)]

use async_trait::async_trait;
use nsprobe_application::ports::{HostAddressLookup, RootZoneResolver};
use nsprobe_domain::zone_name::normalize;
use nsprobe_domain::DomainError;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Static RootZoneResolver
// ============================================================================

/// Registrable root = longest known suffix plus one label.
pub struct StaticRootZones {
    suffixes: Vec<&'static str>,
}

impl StaticRootZones {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            suffixes: vec!["co.uk", "uk", "com", "net", "org"],
        })
    }
}

impl RootZoneResolver for StaticRootZones {
    fn registrable_root(&self, name: &str) -> Result<String, DomainError> {
        let name = normalize(name)?;
        let suffix = self
            .suffixes
            .iter()
            .filter(|s| name.ends_with(&format!(".{}", s)))
            .max_by_key(|s| s.len())
            .ok_or_else(|| DomainError::InvalidDomainName(format!("{} has no known suffix", name)))?;

        let prefix = &name[..name.len() - suffix.len() - 1];
        let label = prefix.rsplit('.').next().unwrap_or(prefix);
        Ok(format!("{}.{}", label, suffix))
    }
}

// ============================================================================
// Mock HostAddressLookup
// ============================================================================

#[derive(Default)]
pub struct MockBootstrap {
    hosts: RwLock<HashMap<String, Vec<IpAddr>>>,
    lookups: AtomicUsize,
    delay: Option<Duration>,
}

impl MockBootstrap {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every lookup sleeps for `delay` first, widening race windows.
    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    pub async fn set_host(&self, host: &str, addresses: Vec<IpAddr>) {
        self.hosts.write().await.insert(host.to_string(), addresses);
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostAddressLookup for MockBootstrap {
    async fn lookup_host(&self, hostname: &str) -> Result<Vec<IpAddr>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.hosts
            .read()
            .await
            .get(hostname)
            .cloned()
            .ok_or_else(|| DomainError::IoError(format!("{} not found", hostname)))
    }
}
