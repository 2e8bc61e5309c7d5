pub mod host_address_lookup;
pub mod name_server_exchange;
pub mod root_zone_resolver;

pub use host_address_lookup::HostAddressLookup;
pub use name_server_exchange::NameServerExchange;
pub use root_zone_resolver::RootZoneResolver;
