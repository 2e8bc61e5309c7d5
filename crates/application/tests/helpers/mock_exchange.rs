#![allow(dead_code)]

use async_trait::async_trait;
use nsprobe_application::ports::NameServerExchange;
use nsprobe_domain::{
    AnswerRecord, DnsAnswer, DnsQuery, DomainError, NameServerTarget, RecordData, RecordType,
    ResponseStatus,
};
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

type Key = (NameServerTarget, String, RecordType);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeCall {
    pub target: NameServerTarget,
    pub name: String,
    pub record_type: RecordType,
    pub attempt: u32,
}

// ============================================================================
// Mock NameServerExchange
// ============================================================================

/// In-memory DNS topology. Unknown questions answer NXDOMAIN.
#[derive(Default)]
pub struct MockExchange {
    responses: RwLock<HashMap<Key, DnsAnswer>>,
    transient_failures: RwLock<HashMap<Key, u32>>,
    fatal_targets: RwLock<HashSet<NameServerTarget>>,
    calls: RwLock<Vec<ExchangeCall>>,
}

impl MockExchange {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn set_response(
        &self,
        target: NameServerTarget,
        name: &str,
        record_type: RecordType,
        answer: DnsAnswer,
    ) {
        self.responses
            .write()
            .await
            .insert((target, name.to_string(), record_type), answer);
    }

    /// `zone` answers NS with each host, plus glue in the additional section.
    pub async fn delegate(&self, target: NameServerTarget, zone: &str, servers: &[(&str, IpAddr)]) {
        let answer = DnsAnswer {
            answers: servers
                .iter()
                .map(|(host, _)| AnswerRecord::new(zone, RecordData::Ns(host.to_string())))
                .collect(),
            additional: servers
                .iter()
                .map(|(host, ip)| AnswerRecord::new(*host, RecordData::Address(*ip)))
                .collect(),
            ..DnsAnswer::default()
        };
        self.set_response(target, zone, RecordType::NS, answer).await;
    }

    pub async fn delegate_without_glue(&self, target: NameServerTarget, zone: &str, hosts: &[&str]) {
        let answer = DnsAnswer {
            answers: hosts
                .iter()
                .map(|host| AnswerRecord::new(zone, RecordData::Ns(host.to_string())))
                .collect(),
            ..DnsAnswer::default()
        };
        self.set_response(target, zone, RecordType::NS, answer).await;
    }

    /// Parent-side referral: NS records in the authority section.
    pub async fn refer(&self, target: NameServerTarget, zone: &str, servers: &[(&str, IpAddr)]) {
        let answer = DnsAnswer {
            authority: servers
                .iter()
                .map(|(host, _)| AnswerRecord::new(zone, RecordData::Ns(host.to_string())))
                .collect(),
            additional: servers
                .iter()
                .map(|(host, ip)| AnswerRecord::new(*host, RecordData::Address(*ip)))
                .collect(),
            ..DnsAnswer::default()
        };
        self.set_response(target, zone, RecordType::NS, answer).await;
    }

    pub async fn set_address(&self, target: NameServerTarget, host: &str, ip: IpAddr) {
        let record_type = if ip.is_ipv4() {
            RecordType::A
        } else {
            RecordType::AAAA
        };
        let answer = DnsAnswer {
            answers: vec![AnswerRecord::new(host, RecordData::Address(ip))],
            ..DnsAnswer::default()
        };
        self.set_response(target, host, record_type, answer).await;
    }

    pub async fn set_txt(&self, target: NameServerTarget, name: &str, values: &[&str]) {
        let answer = DnsAnswer {
            answers: values
                .iter()
                .map(|v| AnswerRecord::new(name, RecordData::Txt(v.to_string())))
                .collect(),
            ..DnsAnswer::default()
        };
        self.set_response(target, name, RecordType::TXT, answer).await;
    }

    pub async fn set_status(
        &self,
        target: NameServerTarget,
        name: &str,
        record_type: RecordType,
        status: ResponseStatus,
    ) {
        let answer = DnsAnswer {
            status,
            ..DnsAnswer::default()
        };
        self.set_response(target, name, record_type, answer).await;
    }

    /// The next `times` questions for this key time out.
    pub async fn fail_times(
        &self,
        target: NameServerTarget,
        name: &str,
        record_type: RecordType,
        times: u32,
    ) {
        self.transient_failures
            .write()
            .await
            .insert((target, name.to_string(), record_type), times);
    }

    /// Every question to `target` fails with a non-transient error.
    pub async fn set_fatal(&self, target: NameServerTarget) {
        self.fatal_targets.write().await.insert(target);
    }

    pub async fn calls(&self) -> Vec<ExchangeCall> {
        self.calls.read().await.clone()
    }

    pub async fn ns_queries(&self) -> Vec<(NameServerTarget, String)> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.record_type == RecordType::NS)
            .map(|c| (c.target, c.name.clone()))
            .collect()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }
}

#[async_trait]
impl NameServerExchange for MockExchange {
    async fn exchange(
        &self,
        target: NameServerTarget,
        query: &DnsQuery,
        _timeout: Duration,
        attempt: u32,
    ) -> Result<DnsAnswer, DomainError> {
        let key = (target, query.domain.to_string(), query.record_type);

        self.calls.write().await.push(ExchangeCall {
            target,
            name: key.1.clone(),
            record_type: key.2,
            attempt,
        });

        if self.fatal_targets.read().await.contains(&target) {
            return Err(DomainError::NoSystemNameServers);
        }

        if let Some(remaining) = self.transient_failures.write().await.get_mut(&key) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(DomainError::TransportTimeout {
                    server: target.to_string(),
                });
            }
        }

        Ok(self
            .responses
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_else(DnsAnswer::nxdomain))
    }
}
