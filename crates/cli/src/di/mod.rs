use nsprobe_application::services::{ResolverPool, ResolverPoolSettings};
use nsprobe_application::use_cases::{
    CheckTxtPropagationUseCase, DiscoverAuthoritativeZoneUseCase,
};
use nsprobe_domain::Config;
use nsprobe_infrastructure::dns::WireExchange;
use nsprobe_infrastructure::public_suffix::PublicSuffixList;
use nsprobe_infrastructure::system::HickoryHostLookup;
use std::sync::Arc;
use tracing::debug;

pub struct UseCases {
    pub discover: DiscoverAuthoritativeZoneUseCase,
    pub check_txt: CheckTxtPropagationUseCase,
}

impl UseCases {
    pub fn new(pool: Arc<ResolverPool>) -> Self {
        Self {
            discover: DiscoverAuthoritativeZoneUseCase::new(Arc::clone(&pool)),
            check_txt: CheckTxtPropagationUseCase::new(pool),
        }
    }
}

/// Wires the resolver pool to its wire, system and public-suffix adapters.
pub fn build_pool(config: &Config) -> anyhow::Result<Arc<ResolverPool>> {
    let settings = ResolverPoolSettings::from(&config.validation);

    let root_zones = Arc::new(PublicSuffixList::load(
        config.validation.public_suffix_list.as_deref(),
    )?);
    let exchange = Arc::new(WireExchange::from_system(config.validation.port));
    let bootstrap = Arc::new(HickoryHostLookup::new(
        settings.query_timeout,
        settings.retries,
    ));

    debug!(
        system_servers = ?exchange.system_servers(),
        suffix_rules = root_zones.len(),
        "Resolver pool dependencies ready"
    );

    Ok(ResolverPool::new(settings, root_zones, exchange, bootstrap))
}
