use crate::ports::{HostAddressLookup, NameServerExchange, RootZoneResolver};
use crate::services::resolver_handle::ResolverHandle;
use dashmap::DashMap;
use nsprobe_domain::zone_name::normalize;
use nsprobe_domain::{DnsServerEntry, DomainError, NameServerTarget, ValidationConfig, ZoneWalk};
use std::net::IpAddr;
use std::sync::{Arc, OnceLock, Weak};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, debug_span, trace, warn, Instrument};

/// Settings shared by every handle the pool creates.
#[derive(Debug, Clone)]
pub struct ResolverPoolSettings {
    /// Raw default server entries: IP, host name or `[System]`.
    pub dns_servers: Vec<String>,
    pub query_timeout: Duration,
    pub retries: u32,
}

impl Default for ResolverPoolSettings {
    fn default() -> Self {
        Self::from(&ValidationConfig::default())
    }
}

impl From<&ValidationConfig> for ResolverPoolSettings {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            dns_servers: config.dns_servers.clone(),
            query_timeout: Duration::from_millis(config.query_timeout_ms),
            retries: config.retries,
        }
    }
}

/// Deepest authoritative zone found for a domain and its resolvers.
#[derive(Debug, Clone)]
pub struct AuthoritativeZone {
    pub zone: Arc<str>,
    pub resolvers: Arc<[Arc<ResolverHandle>]>,
}

impl AuthoritativeZone {
    pub fn addresses(&self) -> Vec<IpAddr> {
        self.resolvers.iter().filter_map(|r| r.address()).collect()
    }
}

/// Owns every [`ResolverHandle`] and discovers the authoritative name
/// servers of arbitrary domains.
///
/// Three caches, none of them ever evicted:
/// - the default resolver list, built once on first use from configuration;
/// - one handle per server address;
/// - one resolver list per authoritative zone, inserted exactly once.
pub struct ResolverPool {
    settings: ResolverPoolSettings,
    root_zones: Arc<dyn RootZoneResolver>,
    exchange: Arc<dyn NameServerExchange>,
    bootstrap: Arc<dyn HostAddressLookup>,
    defaults: OnceCell<Vec<Arc<ResolverHandle>>>,
    system: OnceLock<Arc<ResolverHandle>>,
    by_address: DashMap<IpAddr, Arc<ResolverHandle>>,
    by_zone: DashMap<Arc<str>, Arc<[Arc<ResolverHandle>]>>,
    this: Weak<ResolverPool>,
}

impl ResolverPool {
    pub fn new(
        settings: ResolverPoolSettings,
        root_zones: Arc<dyn RootZoneResolver>,
        exchange: Arc<dyn NameServerExchange>,
        bootstrap: Arc<dyn HostAddressLookup>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            settings,
            root_zones,
            exchange,
            bootstrap,
            defaults: OnceCell::new(),
            system: OnceLock::new(),
            by_address: DashMap::new(),
            by_zone: DashMap::new(),
            this: this.clone(),
        })
    }

    /// Default resolver for a validation round, round-robin over the
    /// configured list.
    pub async fn default_resolver(&self, round: u32) -> Arc<ResolverHandle> {
        let defaults = self.default_resolvers().await;
        Arc::clone(&defaults[round as usize % defaults.len()])
    }

    /// The configured default resolvers; never empty.
    pub async fn default_resolvers(&self) -> &[Arc<ResolverHandle>] {
        self.defaults.get_or_init(|| self.build_defaults()).await
    }

    /// The cached handle bound to `address`, created on first use.
    pub fn resolver_for(&self, address: IpAddr) -> Result<Arc<ResolverHandle>, DomainError> {
        if address.is_unspecified() {
            return Err(DomainError::InvalidArgument(format!(
                "{} is not a usable name server address",
                address
            )));
        }

        let handle = self
            .by_address
            .entry(address)
            .or_insert_with(|| Arc::new(self.new_handle(NameServerTarget::Address(address))));
        Ok(Arc::clone(handle.value()))
    }

    /// The handle bound to the host's system default resolver.
    pub fn system_resolver(&self) -> Arc<ResolverHandle> {
        Arc::clone(
            self.system
                .get_or_init(|| Arc::new(self.new_handle(NameServerTarget::System))),
        )
    }

    /// Resolvers bound to the authoritative name servers of the zone that
    /// serves `domain_name`.
    pub async fn resolvers_for(
        &self,
        domain_name: &str,
        round: u32,
    ) -> Result<Arc<[Arc<ResolverHandle>]>, DomainError> {
        Ok(self.discover(domain_name, round).await?.resolvers)
    }

    /// Walks from the registrable root of `domain_name` toward the full name,
    /// one label at a time, following every delegation found on the way.
    ///
    /// Each level is queried through the server that most recently proved
    /// authoritative, starting from `default_resolver(round)`. The result is
    /// cached under the deepest zone that returned name servers; when another
    /// walk already cached that zone, its list is returned instead.
    pub async fn discover(
        &self,
        domain_name: &str,
        round: u32,
    ) -> Result<AuthoritativeZone, DomainError> {
        let domain = normalize(domain_name)?;
        let root = normalize(&self.root_zones.registrable_root(&domain)?)?;
        let mut walk = ZoneWalk::new(&domain, &root)?;

        let mut current = self.default_resolver(round).await;
        debug!(
            domain = %domain,
            root = %root,
            server = %current.target(),
            "Start looking for authoritative DNS server"
        );

        let mut discovered: Option<(String, Vec<IpAddr>)> = None;
        loop {
            let zone = walk.zone().to_string();
            let span = debug_span!("zone", zone = %zone);
            let found = async {
                trace!(server = %current.target(), "Querying name servers");
                current.find_authoritative_servers(&zone, round).await
            }
            .instrument(span)
            .await?;

            if let Some(addresses) = found.filter(|a| !a.is_empty()) {
                current = self.resolver_for(addresses[0])?;
                discovered = Some((zone, addresses));
            }

            if !walk.descend() {
                break;
            }
        }

        let (zone, addresses) =
            discovered.ok_or_else(|| DomainError::NoAuthoritativeServer(domain.clone()))?;

        let resolvers = addresses
            .into_iter()
            .map(|ip| self.resolver_for(ip))
            .collect::<Result<Vec<_>, _>>()?;

        let zone: Arc<str> = Arc::from(zone);
        let cached = Arc::clone(
            self.by_zone
                .entry(Arc::clone(&zone))
                .or_insert_with(|| Arc::from(resolvers))
                .value(),
        );

        debug!(
            domain = %domain,
            zone = %zone,
            resolvers = cached.len(),
            "Authoritative zone determined"
        );

        Ok(AuthoritativeZone {
            zone,
            resolvers: cached,
        })
    }

    /// Resolver list cached for `zone`, if a walk has reached it.
    pub fn cached_zone(&self, zone: &str) -> Option<Arc<[Arc<ResolverHandle>]>> {
        self.by_zone.get(zone).map(|entry| Arc::clone(entry.value()))
    }

    pub fn cached_zone_count(&self) -> usize {
        self.by_zone.len()
    }

    fn new_handle(&self, target: NameServerTarget) -> ResolverHandle {
        ResolverHandle::new(
            target,
            Arc::clone(&self.exchange),
            self.settings.query_timeout,
            self.settings.retries,
            self.this.clone(),
        )
    }

    async fn build_defaults(&self) -> Vec<Arc<ResolverHandle>> {
        let mut defaults: Vec<Arc<ResolverHandle>> = Vec::new();

        for item in &self.settings.dns_servers {
            if item.trim().is_empty() {
                continue;
            }

            match item.parse::<DnsServerEntry>() {
                Ok(DnsServerEntry::Address(ip)) => match self.resolver_for(ip) {
                    Ok(handle) => {
                        trace!(ip = %ip, "Adding DNS server");
                        defaults.push(handle);
                    }
                    Err(e) => warn!(item = %item, error = %e, "Ignoring DNS server"),
                },
                Ok(DnsServerEntry::System) => {
                    trace!("Adding system default as DNS server");
                    defaults.push(self.system_resolver());
                }
                Ok(DnsServerEntry::Hostname(host)) => match self.bootstrap.lookup_host(&host).await
                {
                    Ok(addresses) => match addresses.first().map(|ip| self.resolver_for(*ip)) {
                        Some(Ok(handle)) => {
                            trace!(host = %host, ip = %handle.target(), "Adding DNS server");
                            defaults.push(handle);
                        }
                        Some(Err(e)) => warn!(host = %host, error = %e, "Ignoring DNS server"),
                        None => warn!(host = %host, "IP for DNS server could not be resolved"),
                    },
                    Err(e) => {
                        warn!(host = %host, error = %e, "IP for DNS server could not be resolved")
                    }
                },
                Err(e) => warn!(item = %item, error = %e, "Ignoring DNS server"),
            }
        }

        if defaults.is_empty() {
            debug!("Adding local system default as DNS server");
            defaults.push(self.system_resolver());
        }

        defaults
    }
}
