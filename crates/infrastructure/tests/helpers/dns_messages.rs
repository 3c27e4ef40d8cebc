#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use std::net::Ipv4Addr;
use std::str::FromStr;

fn query_message(id: u16, domain: &str, record_type: RecordType) -> Message {
    let mut query = Query::new();
    query.set_name(Name::from_str(domain).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.metadata.recursion_desired = true;
    message.add_query(query);
    message
}

pub fn build_query(id: u16, domain: &str, record_type: RecordType) -> Vec<u8> {
    query_message(id, domain, record_type).to_vec().unwrap()
}

/// A query carrying a TXT additional record large enough to push the
/// message past `min_len` bytes.
pub fn padded_query(id: u16, domain: &str, min_len: usize) -> Vec<u8> {
    let strings = vec!["x".repeat(250); min_len / 250 + 1];
    let mut message = query_message(id, domain, RecordType::A);
    message.add_additional(Record::from_rdata(
        Name::root(),
        0,
        RData::TXT(TXT::new(strings)),
    ));
    message.to_vec().unwrap()
}

pub fn a_query(id: u16, domain: &str) -> Vec<u8> {
    build_query(id, domain, RecordType::A)
}

pub fn message_id(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

pub fn a_records(bytes: &[u8]) -> Vec<Ipv4Addr> {
    let message = Message::from_vec(bytes).unwrap();
    message
        .answers
        .iter()
        .filter_map(|record| match &record.data {
            RData::A(a) => Some(a.0),
            _ => None,
        })
        .collect()
}

pub fn is_response(bytes: &[u8]) -> bool {
    bytes[2] & 0x80 != 0
}

pub fn recursion_available(bytes: &[u8]) -> bool {
    bytes[3] & 0x80 != 0
}

pub fn rcode(bytes: &[u8]) -> u8 {
    bytes[3] & 0x0F
}
