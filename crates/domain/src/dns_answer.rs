use std::fmt;
use std::net::IpAddr;

/// Response code of a DNS answer, reduced to what discovery distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStatus {
    #[default]
    NoError,
    NxDomain,
    ServFail,
    Refused,
    Other(u16),
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::NoError => write!(f, "NOERROR"),
            ResponseStatus::NxDomain => write!(f, "NXDOMAIN"),
            ResponseStatus::ServFail => write!(f, "SERVFAIL"),
            ResponseStatus::Refused => write!(f, "REFUSED"),
            ResponseStatus::Other(code) => write!(f, "RCODE{}", code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Ns(String),
    Cname(String),
    Address(IpAddr),
    Txt(String),
    Other,
}

/// A single resource record. Owner and target names are lower case without
/// the trailing dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub owner: String,
    pub data: RecordData,
}

impl AnswerRecord {
    pub fn new(owner: impl Into<String>, data: RecordData) -> Self {
        Self {
            owner: owner.into(),
            data,
        }
    }
}

/// Parsed DNS response, independent of the wire codec.
#[derive(Debug, Clone, Default)]
pub struct DnsAnswer {
    pub status: ResponseStatus,
    pub truncated: bool,
    pub answers: Vec<AnswerRecord>,
    pub authority: Vec<AnswerRecord>,
    pub additional: Vec<AnswerRecord>,
}

impl DnsAnswer {
    pub fn nxdomain() -> Self {
        Self {
            status: ResponseStatus::NxDomain,
            ..Self::default()
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.status,
            ResponseStatus::ServFail | ResponseStatus::Refused
        )
    }

    /// NS targets from the answer section owned by `zone`.
    pub fn answer_name_servers(&self, zone: &str) -> Vec<&str> {
        self.answers
            .iter()
            .filter(|r| r.owner == zone)
            .filter_map(|r| match &r.data {
                RecordData::Ns(host) => Some(host.as_str()),
                _ => None,
            })
            .collect()
    }

    /// NS targets from the authority section owned by `zone` (a referral).
    pub fn referral_name_servers(&self, zone: &str) -> Vec<&str> {
        self.authority
            .iter()
            .filter(|r| r.owner == zone)
            .filter_map(|r| match &r.data {
                RecordData::Ns(host) => Some(host.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_cname(&self) -> bool {
        self.answers
            .iter()
            .any(|r| matches!(r.data, RecordData::Cname(_)))
    }

    /// A/AAAA records for `host` found in the additional section.
    pub fn glue_for(&self, host: &str) -> Vec<IpAddr> {
        self.additional
            .iter()
            .filter(|r| r.owner == host)
            .filter_map(|r| match r.data {
                RecordData::Address(ip) => Some(ip),
                _ => None,
            })
            .collect()
    }

    pub fn addresses(&self) -> Vec<IpAddr> {
        self.answers
            .iter()
            .filter_map(|r| match r.data {
                RecordData::Address(ip) => Some(ip),
                _ => None,
            })
            .collect()
    }

    pub fn txt_values(&self) -> Vec<String> {
        self.answers
            .iter()
            .filter_map(|r| match &r.data {
                RecordData::Txt(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }
}
