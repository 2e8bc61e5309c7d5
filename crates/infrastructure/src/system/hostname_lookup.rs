use async_trait::async_trait;
use hickory_resolver::config::ResolverOpts;
use hickory_resolver::TokioResolver;
use nsprobe_application::ports::HostAddressLookup;
use nsprobe_domain::DomainError;
use std::net::IpAddr;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Resolves host names of configured DNS servers through the system
/// resolver. Built on first use.
pub struct HickoryHostLookup {
    timeout: Duration,
    attempts: usize,
    resolver: OnceCell<TokioResolver>,
}

impl HickoryHostLookup {
    pub fn new(timeout: Duration, attempts: u32) -> Self {
        Self {
            timeout,
            attempts: attempts.max(1) as usize,
            resolver: OnceCell::new(),
        }
    }

    async fn resolver(&self) -> Result<&TokioResolver, DomainError> {
        self.resolver
            .get_or_try_init(|| async {
                let mut opts = ResolverOpts::default();
                opts.timeout = self.timeout;
                opts.attempts = self.attempts;
                opts.ndots = 0;

                TokioResolver::builder_tokio()
                    .map(|builder| builder.with_options(opts).build())
                    .map_err(|e| {
                        DomainError::IoError(format!("Failed to create system resolver: {}", e))
                    })
            })
            .await
    }
}

#[async_trait]
impl HostAddressLookup for HickoryHostLookup {
    async fn lookup_host(&self, hostname: &str) -> Result<Vec<IpAddr>, DomainError> {
        let resolver = self.resolver().await?;

        let lookup = resolver
            .lookup_ip(hostname)
            .await
            .map_err(|e| DomainError::IoError(format!("Lookup of {} failed: {}", hostname, e)))?;

        let addresses: Vec<IpAddr> = lookup.iter().collect();
        debug!(hostname, addresses = ?addresses, "Host name resolved");
        Ok(addresses)
    }
}
