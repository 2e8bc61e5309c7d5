use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::{Name, RData, Record};
use super::record_type_map::RecordTypeMapper;
use nsprobe_domain::{
    AnswerRecord, DnsAnswer, DnsQuery, DomainError, RecordData, ResponseStatus,
};
use std::net::IpAddr;
use tracing::debug;

/// A decoded response together with the id and question it echoes.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,
    /// `None` when the question section is empty or of an unsupported type.
    pub question: Option<DnsQuery>,
    pub answer: DnsAnswer,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "Received a query instead of a response".into(),
            ));
        }

        let rcode = message.response_code();
        let answer = DnsAnswer {
            status: Self::status(rcode),
            truncated: message.truncated(),
            answers: Self::convert_all(message.answers()),
            authority: Self::convert_all(message.name_servers()),
            additional: Self::convert_all(message.additionals()),
        };

        debug!(
            id = message.id(),
            rcode = ?rcode,
            answers = answer.answers.len(),
            authority = answer.authority.len(),
            additional = answer.additional.len(),
            truncated = answer.truncated,
            "DNS response parsed"
        );

        let question = message.queries().first().and_then(|q| {
            RecordTypeMapper::from_hickory(q.query_type())
                .map(|record_type| DnsQuery::new(Self::name(q.name()), record_type))
        });

        Ok(DnsResponse {
            id: message.id(),
            question,
            answer,
        })
    }

    pub fn status(rcode: ResponseCode) -> ResponseStatus {
        match rcode {
            ResponseCode::NoError => ResponseStatus::NoError,
            ResponseCode::NXDomain => ResponseStatus::NxDomain,
            ResponseCode::ServFail => ResponseStatus::ServFail,
            ResponseCode::Refused => ResponseStatus::Refused,
            other => ResponseStatus::Other(u16::from(other)),
        }
    }

    fn convert_all(records: &[Record]) -> Vec<AnswerRecord> {
        records.iter().map(Self::convert).collect()
    }

    fn convert(record: &Record) -> AnswerRecord {
        let data = match record.data() {
            RData::NS(ns) => RecordData::Ns(Self::name(&ns.0)),
            RData::CNAME(cname) => RecordData::Cname(Self::name(&cname.0)),
            RData::A(a) => RecordData::Address(IpAddr::V4(a.0)),
            RData::AAAA(aaaa) => RecordData::Address(IpAddr::V6(aaaa.0)),
            // Character strings of one record are concatenated.
            RData::TXT(txt) => RecordData::Txt(
                txt.txt_data()
                    .iter()
                    .map(|part| String::from_utf8_lossy(part))
                    .collect(),
            ),
            _ => RecordData::Other,
        };
        AnswerRecord::new(Self::name(record.name()), data)
    }

    /// Lower-case, without the trailing dot.
    fn name(name: &Name) -> String {
        name.to_utf8().trim_end_matches('.').to_ascii_lowercase()
    }
}
