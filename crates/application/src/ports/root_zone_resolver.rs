use nsprobe_domain::DomainError;

/// Maps a domain name to its registrable root (public suffix + one label).
///
/// Pure computation, no network I/O. Malformed names and names that are
/// themselves public suffixes fail with `DomainError::InvalidDomainName`.
pub trait RootZoneResolver: Send + Sync {
    fn registrable_root(&self, name: &str) -> Result<String, DomainError>;
}
