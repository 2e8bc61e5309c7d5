pub mod hostname_lookup;
pub mod system_nameservers;

pub use hostname_lookup::HickoryHostLookup;
pub use system_nameservers::system_name_servers;
