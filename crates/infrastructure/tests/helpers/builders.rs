#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, NS, TXT};
use hickory_proto::rr::{Name, RData, Record};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

pub fn name(s: &str) -> Name {
    Name::from_str(&format!("{}.", s.trim_end_matches('.'))).unwrap()
}

/// Empty response echoing the id and question of `query`.
pub fn reply_to(query: &Message, code: ResponseCode) -> Message {
    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(query.recursion_desired())
        .set_response_code(code);
    response.add_queries(query.queries().to_vec());
    response
}

pub fn ns(owner: &str, host: &str) -> Record {
    Record::from_rdata(name(owner), 3600, RData::NS(NS(name(host))))
}

pub fn a(owner: &str, ip: Ipv4Addr) -> Record {
    Record::from_rdata(name(owner), 3600, RData::A(A(ip)))
}

pub fn aaaa(owner: &str, ip: Ipv6Addr) -> Record {
    Record::from_rdata(name(owner), 3600, RData::AAAA(AAAA(ip)))
}

pub fn cname(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 3600, RData::CNAME(CNAME(name(target))))
}

pub fn txt(owner: &str, parts: &[&str]) -> Record {
    let parts = parts.iter().map(|p| p.to_string()).collect();
    Record::from_rdata(name(owner), 60, RData::TXT(TXT::new(parts)))
}
