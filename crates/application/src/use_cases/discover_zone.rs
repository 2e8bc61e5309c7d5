use crate::services::{AuthoritativeZone, ResolverPool};
use futures::future::join_all;
use nsprobe_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct DiscoverAuthoritativeZoneUseCase {
    pool: Arc<ResolverPool>,
}

impl DiscoverAuthoritativeZoneUseCase {
    pub fn new(pool: Arc<ResolverPool>) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain: &str,
        round: u32,
    ) -> Result<AuthoritativeZone, DomainError> {
        let zone = self.pool.discover(domain, round).await?;

        info!(
            domain = %domain,
            zone = %zone.zone,
            name_servers = ?zone.addresses(),
            "Authoritative name servers discovered"
        );

        Ok(zone)
    }

    /// Discovers several domains concurrently. A failing domain does not
    /// affect the others; results keep the input order.
    pub async fn execute_many(
        &self,
        domains: &[String],
        round: u32,
    ) -> Vec<(String, Result<AuthoritativeZone, DomainError>)> {
        let results = join_all(domains.iter().map(|d| self.execute(d, round))).await;

        domains
            .iter()
            .cloned()
            .zip(results)
            .inspect(|(domain, result)| {
                if let Err(e) = result {
                    warn!(domain = %domain, error = %e, "Discovery failed");
                }
            })
            .collect()
    }
}
