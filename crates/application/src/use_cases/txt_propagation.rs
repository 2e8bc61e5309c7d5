use crate::services::{ResolverHandle, ResolverPool};
use futures::future::join_all;
use nsprobe_domain::{DomainError, NameServerTarget};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxtOutcome {
    Found,
    /// The values that were published instead.
    Missing(Vec<String>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ServerCheck {
    pub target: NameServerTarget,
    pub outcome: TxtOutcome,
}

/// Result of checking one TXT record against every authoritative server.
#[derive(Debug, Clone)]
pub struct PropagationReport {
    pub record: String,
    pub zone: Arc<str>,
    pub round: u32,
    pub servers: Vec<ServerCheck>,
}

impl PropagationReport {
    /// True when every authoritative server serves the expected value.
    pub fn is_visible(&self) -> bool {
        !self.servers.is_empty()
            && self
                .servers
                .iter()
                .all(|s| s.outcome == TxtOutcome::Found)
    }

    pub fn found_count(&self) -> usize {
        self.servers
            .iter()
            .filter(|s| s.outcome == TxtOutcome::Found)
            .count()
    }
}

/// Checks whether a validation TXT record is visible at the authoritative
/// name servers of its zone.
pub struct CheckTxtPropagationUseCase {
    pool: Arc<ResolverPool>,
}

impl CheckTxtPropagationUseCase {
    pub fn new(pool: Arc<ResolverPool>) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, expected))]
    pub async fn execute(
        &self,
        record: &str,
        expected: &str,
        round: u32,
    ) -> Result<PropagationReport, DomainError> {
        let zone = self.pool.discover(record, round).await?;

        let checks = zone
            .resolvers
            .iter()
            .map(|resolver| Self::check_server(resolver, record, expected, round));
        let servers = join_all(checks).await;

        let report = PropagationReport {
            record: record.to_string(),
            zone: zone.zone,
            round,
            servers,
        };

        debug!(
            record = %record,
            zone = %report.zone,
            found = report.found_count(),
            servers = report.servers.len(),
            "TXT propagation checked"
        );

        Ok(report)
    }

    /// Repeats [`execute`](Self::execute) with an increasing round until the
    /// record is visible everywhere or `max_checks` checks were made.
    ///
    /// Returns the last report, or the last error when no check succeeded.
    pub async fn wait_until_visible(
        &self,
        record: &str,
        expected: &str,
        max_checks: u32,
        interval: Duration,
    ) -> Result<PropagationReport, DomainError> {
        let mut last: Option<Result<PropagationReport, DomainError>> = None;

        for round in 0..max_checks.max(1) {
            if round > 0 {
                tokio::time::sleep(interval).await;
            }

            match self.execute(record, expected, round).await {
                Ok(report) if report.is_visible() => {
                    info!(record = %record, zone = %report.zone, round, "TXT record visible at all authoritative servers");
                    return Ok(report);
                }
                Ok(report) => {
                    info!(
                        record = %record,
                        found = report.found_count(),
                        servers = report.servers.len(),
                        round,
                        "TXT record not yet visible everywhere"
                    );
                    last = Some(Ok(report));
                }
                Err(e) => {
                    warn!(record = %record, round, error = %e, "Propagation check failed");
                    if !matches!(last, Some(Ok(_))) {
                        last = Some(Err(e));
                    }
                }
            }
        }

        last.unwrap_or_else(|| Err(DomainError::NoAuthoritativeServer(record.to_string())))
    }

    async fn check_server(
        resolver: &ResolverHandle,
        record: &str,
        expected: &str,
        round: u32,
    ) -> ServerCheck {
        let outcome = match resolver.txt_values(record, round).await {
            Ok(values) if values.iter().any(|v| v == expected) => TxtOutcome::Found,
            Ok(values) => TxtOutcome::Missing(values),
            Err(e) => TxtOutcome::Failed(e.to_string()),
        };
        ServerCheck {
            target: resolver.target(),
            outcome,
        }
    }
}
