//! Zone name arithmetic used by authoritative name server discovery.

use crate::errors::DomainError;
use std::collections::VecDeque;

const MAX_NAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// Lower-cases `name`, strips surrounding whitespace and trailing dots, and
/// rejects names that cannot be a DNS name.
pub fn normalize(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' is empty",
            name
        )));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' exceeds {} characters",
            trimmed, MAX_NAME_LENGTH
        )));
    }

    for label in trimmed.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' has an invalid label",
                trimmed
            )));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*')
        {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains invalid characters",
                trimmed
            )));
        }
    }

    Ok(trimmed.to_ascii_lowercase())
}

/// True when `name` equals `zone` or lies below it.
pub fn is_within(name: &str, zone: &str) -> bool {
    name == zone
        || (name.len() > zone.len()
            && name.ends_with(zone)
            && name.as_bytes()[name.len() - zone.len() - 1] == b'.')
}

/// Label-by-label descent from a registrable root toward a full name.
///
/// The labels between the root and the full name are materialized once, at
/// construction, and consumed front to back by [`ZoneWalk::descend`].
///
/// `_acme-challenge.sub.example.co.uk` under `example.co.uk` starts at
/// `example.co.uk`, then visits `sub.example.co.uk` and finally
/// `_acme-challenge.sub.example.co.uk`.
#[derive(Debug, Clone)]
pub struct ZoneWalk {
    zone: String,
    remaining: VecDeque<String>,
}

impl ZoneWalk {
    /// Both names must already be normalized.
    pub fn new(domain: &str, root: &str) -> Result<Self, DomainError> {
        if !is_within(domain, root) {
            return Err(DomainError::InvalidDomainName(format!(
                "{} is not within {}",
                domain, root
            )));
        }

        let remaining = if domain == root {
            VecDeque::new()
        } else {
            domain[..domain.len() - root.len() - 1]
                .split('.')
                .filter(|label| !label.is_empty())
                .rev()
                .map(str::to_string)
                .collect()
        };

        Ok(Self {
            zone: root.to_string(),
            remaining,
        })
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Moves one label deeper. Returns `false` once the full name is reached.
    pub fn descend(&mut self) -> bool {
        match self.remaining.pop_front() {
            Some(label) => {
                self.zone = format!("{}.{}", label, self.zone);
                true
            }
            None => false,
        }
    }
}
