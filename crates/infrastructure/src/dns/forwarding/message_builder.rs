//! DNS Message Builder
//!
//! Constructs DNS query messages in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::BinEncodable;
use nsprobe_domain::{DomainError, RecordType};
use std::str::FromStr;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a DNS query message and serialize to wire format bytes
    pub fn build_query(domain: &str, record_type: &RecordType) -> Result<Vec<u8>, DomainError> {
        Self::build_query_with_id(domain, record_type).map(|(_, bytes)| bytes)
    }

    /// Build a query message and return both the message id and bytes.
    ///
    /// The query carries a random id, a single IN question and the RD flag.
    /// Authoritative servers ignore RD, so the same message works for the
    /// recursive defaults and for delegated servers.
    pub fn build_query_with_id(
        domain: &str,
        record_type: &RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Self::parse_name(domain)?;

        let mut query = Query::query(name, RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(query);

        let bytes = message.to_vec().map_err(|e| {
            DomainError::InvalidArgument(format!("Failed to serialize DNS message: {}", e))
        })?;
        Ok((id, bytes))
    }

    /// Parses `domain` as a fully qualified name.
    fn parse_name(domain: &str) -> Result<Name, DomainError> {
        let fqdn = format!("{}.", domain.trim_end_matches('.'));
        Name::from_str(&fqdn).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })
    }
}
