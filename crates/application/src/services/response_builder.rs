//! Synthesized answers for blocked queries.

use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, PTR};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use std::net::IpAddr;
use std::str::FromStr;
use tracing::warn;

/// TTL of every synthesized record.
pub const SPOOF_TTL: u32 = 3600;

/// Max number of names in a PTR answer. Extra names are dropped.
pub const MAX_PTR_RESPONSES: usize = 10;

/// Empty NOERROR reply echoing the query's id, opcode, flags and question.
/// Recursion-available mirrors recursion-desired.
pub fn reply_to(query: &Message) -> Message {
    let mut reply = Message::new(query.id(), MessageType::Response, query.op_code());
    reply.set_recursion_desired(query.recursion_desired());
    reply.set_recursion_available(query.recursion_desired());
    reply.set_checking_disabled(query.checking_disabled());
    if let Some(question) = query.queries().first() {
        reply.add_query(question.clone());
    }
    reply.set_response_code(ResponseCode::NoError);
    reply
}

/// A/AAAA records for the addresses whose family fits the question type.
///
/// IPv4 addresses (including IPv4-mapped IPv6) only answer A questions and
/// IPv6 addresses only AAAA questions. Anything else is skipped.
pub fn spoofed_answers(question: &Query, addresses: &[IpAddr]) -> Vec<Record> {
    let qtype = question.query_type();

    addresses
        .iter()
        .filter_map(|addr| {
            let rdata = match (normalize(*addr), qtype) {
                (IpAddr::V4(ipv4), RecordType::A) => RData::A(A(ipv4)),
                (IpAddr::V6(ipv6), RecordType::AAAA) => RData::AAAA(AAAA(ipv6)),
                _ => return None,
            };
            let mut record = Record::from_rdata(question.name().clone(), SPOOF_TTL, rdata);
            record.set_dns_class(question.query_class());
            Some(record)
        })
        .collect()
}

/// PTR answer listing at most [`MAX_PTR_RESPONSES`] names.
pub fn ptr_response(query: &Message, names: &[String]) -> Message {
    let mut reply = reply_to(query);
    let Some(owner) = query.queries().first().map(|q| q.name().clone()) else {
        return reply;
    };

    let targets = names
        .iter()
        .filter_map(|name| match parse_fqdn(name) {
            Ok(target) => Some(target),
            Err(e) => {
                warn!(name = %name, error = %e, "Skipping invalid PTR name");
                None
            }
        })
        .take(MAX_PTR_RESPONSES);

    for target in targets {
        let mut record = Record::from_rdata(owner.clone(), SPOOF_TTL, RData::PTR(PTR(target)));
        record.set_dns_class(DNSClass::IN);
        reply.add_answer(record);
    }

    reply
}

pub fn mark_nxdomain(response: &mut Message) {
    response.set_response_code(ResponseCode::NXDomain);
}

fn normalize(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V6(ipv6) => ipv6
            .to_ipv4_mapped()
            .map(IpAddr::V4)
            .unwrap_or(IpAddr::V6(ipv6)),
        v4 => v4,
    }
}

fn parse_fqdn(name: &str) -> Result<Name, hickory_proto::ProtoError> {
    if name.ends_with('.') {
        Name::from_str(name)
    } else {
        Name::from_str(&format!("{}.", name))
    }
}
