use crate::ports::NameServerExchange;
use crate::services::resolver_pool::ResolverPool;
use nsprobe_domain::{DnsAnswer, DnsQuery, DomainError, NameServerTarget, RecordType};
use std::fmt;
use std::net::IpAddr;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// DNS client bound to one server, or to the system default resolver.
///
/// Handles are immutable wrappers around configuration and are owned by the
/// [`ResolverPool`]. The pool reference is weak and only used to obtain the
/// default resolver for name server address lookups.
pub struct ResolverHandle {
    target: NameServerTarget,
    exchange: Arc<dyn NameServerExchange>,
    timeout: Duration,
    retries: u32,
    pool: Weak<ResolverPool>,
}

impl ResolverHandle {
    pub(crate) fn new(
        target: NameServerTarget,
        exchange: Arc<dyn NameServerExchange>,
        timeout: Duration,
        retries: u32,
        pool: Weak<ResolverPool>,
    ) -> Self {
        Self {
            target,
            exchange,
            timeout,
            retries: retries.max(1),
            pool,
        }
    }

    pub fn target(&self) -> NameServerTarget {
        self.target
    }

    /// Bound server address; `None` for the system default resolver.
    pub fn address(&self) -> Option<IpAddr> {
        self.target.address()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Asks this server which name servers are authoritative for `zone`.
    ///
    /// Returns `Ok(None)` when the server reports no delegation at `zone`
    /// (no NS records, NXDOMAIN, or an alias). Name server host names are
    /// resolved from glue when present, otherwise through the default
    /// resolver for `round`.
    pub async fn find_authoritative_servers(
        &self,
        zone: &str,
        round: u32,
    ) -> Result<Option<Vec<IpAddr>>, DomainError> {
        let query = DnsQuery::new(zone, RecordType::NS);
        let answer = self.query(&query, round).await?;

        if answer.has_cname() {
            trace!(zone, server = %self.target, "Alias, no delegation");
            return Ok(None);
        }

        let mut hosts = answer.answer_name_servers(zone);
        if hosts.is_empty() {
            hosts = answer.referral_name_servers(zone);
        }
        if hosts.is_empty() {
            trace!(zone, server = %self.target, status = %answer.status, "No delegation");
            return Ok(None);
        }

        let mut addresses: Vec<IpAddr> = Vec::with_capacity(hosts.len());
        let mut unresolved = Vec::new();
        for host in hosts {
            trace!(zone, name_server = host, "Name server");
            let mut ips = answer.glue_for(host);
            if ips.is_empty() {
                ips = match self.lookup_name_server(host, round).await {
                    Ok(ips) => ips,
                    Err(e) => {
                        warn!(zone, name_server = host, error = %e, "Name server address lookup failed");
                        Vec::new()
                    }
                };
            }
            if ips.iter().all(IpAddr::is_unspecified) {
                unresolved.push(host.to_string());
            }
            for ip in ips {
                if ip.is_unspecified() {
                    warn!(zone, name_server = host, address = %ip, "Ignoring unspecified name server address");
                    continue;
                }
                if !addresses.contains(&ip) {
                    addresses.push(ip);
                }
            }
        }

        if addresses.is_empty() {
            return Err(DomainError::UnresolvableNameServers {
                zone: zone.to_string(),
                hosts: unresolved.join(", "),
            });
        }

        debug!(zone, server = %self.target, name_servers = ?addresses, "Authoritative name servers found");
        Ok(Some(addresses))
    }

    /// A and AAAA addresses of `hostname` as seen through this server.
    pub async fn host_addresses(
        &self,
        hostname: &str,
        round: u32,
    ) -> Result<Vec<IpAddr>, DomainError> {
        let v4 = self
            .query(&DnsQuery::new(hostname, RecordType::A), round)
            .await?;
        let mut addresses = v4.addresses();

        match self
            .query(&DnsQuery::new(hostname, RecordType::AAAA), round)
            .await
        {
            Ok(v6) => addresses.extend(v6.addresses()),
            Err(e) => trace!(hostname, error = %e, "AAAA lookup failed"),
        }

        Ok(addresses)
    }

    /// TXT values published at `name` on this server. NXDOMAIN yields an empty list.
    pub async fn txt_values(&self, name: &str, round: u32) -> Result<Vec<String>, DomainError> {
        let answer = self
            .query(&DnsQuery::new(name, RecordType::TXT), round)
            .await?;
        Ok(answer.txt_values())
    }

    /// Sends `query`, retrying transient failures up to the retry budget.
    ///
    /// Server error statuses (SERVFAIL, REFUSED) count as transient. After the
    /// last attempt the failure is reported as `QueryFailed`.
    pub async fn query(&self, query: &DnsQuery, round: u32) -> Result<DnsAnswer, DomainError> {
        let mut last_error: Option<DomainError> = None;

        for attempt in 0..self.retries {
            let result = self
                .exchange
                .exchange(self.target, query, self.timeout, round.wrapping_add(attempt))
                .await;

            let error = match result {
                Ok(answer) if answer.is_server_error() => DomainError::ServerFailure {
                    server: self.target.to_string(),
                    status: answer.status.to_string(),
                },
                Ok(answer) => return Ok(answer),
                Err(e) if e.is_transient() => e,
                Err(e) => return Err(e),
            };

            debug!(
                query = %query,
                server = %self.target,
                attempt = attempt + 1,
                retries = self.retries,
                error = %error,
                "Query attempt failed"
            );
            last_error = Some(error);
        }

        Err(DomainError::QueryFailed {
            zone: query.domain.to_string(),
            server: self.target.to_string(),
            attempts: self.retries,
            reason: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempt made".to_string()),
        })
    }

    async fn lookup_name_server(&self, host: &str, round: u32) -> Result<Vec<IpAddr>, DomainError> {
        let pool = self.pool.upgrade().ok_or(DomainError::PoolUnavailable)?;
        let resolver = pool.default_resolver(round).await;
        resolver.host_addresses(host, round).await
    }
}

impl fmt::Debug for ResolverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverHandle")
            .field("target", &self.target)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .finish()
    }
}

impl fmt::Display for ResolverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target)
    }
}
