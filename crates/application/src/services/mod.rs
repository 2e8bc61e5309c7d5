pub mod resolver_handle;
pub mod resolver_pool;

pub use resolver_handle::ResolverHandle;
pub use resolver_pool::{AuthoritativeZone, ResolverPool, ResolverPoolSettings};
