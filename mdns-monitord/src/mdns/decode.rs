use std::net::IpAddr;

use anyhow::Result;
use hickory_proto::op::{Message as DnsMessage, MessageType};
use hickory_proto::rr::{Name, RData, Record as DnsRecord, RecordType};
use shared::message::{Message, Query, Record, RrType};

/// Decode one raw mDNS datagram into the monitor's typed message model.
///
/// Answer, authority and additional sections all contribute records; the
/// monitor prints whatever the packet carries.
pub fn decode_packet(buf: &[u8], source: IpAddr) -> Result<Message> {
    let dns = DnsMessage::from_vec(buf)?;

    Ok(Message {
        is_response: dns.message_type() == MessageType::Response,
        source: source.to_string(),
        queries: dns
            .queries()
            .iter()
            .map(|q| Query {
                rtype: convert_type(q.query_type()),
                name: display_name(q.name()),
            })
            .collect(),
        records: dns
            .answers()
            .iter()
            .chain(dns.name_servers())
            .chain(dns.additionals())
            .map(convert_record)
            .collect(),
    })
}

fn convert_type(rtype: RecordType) -> RrType {
    match rtype {
        RecordType::A => RrType::A,
        RecordType::AAAA => RrType::Aaaa,
        RecordType::ANY => RrType::Any,
        RecordType::PTR => RrType::Ptr,
        RecordType::SRV => RrType::Srv,
        RecordType::TXT => RrType::Txt,
        other => RrType::Other(u16::from(other)),
    }
}

/// Render a name without its trailing root dot.
fn display_name(name: &Name) -> String {
    let mut text = name.to_utf8();
    if text.len() > 1 && text.ends_with('.') {
        text.pop();
    }
    text
}

fn convert_record(rr: &DnsRecord) -> Record {
    let mut record = Record {
        rtype: convert_type(rr.record_type()),
        name: display_name(rr.name()),
        target: String::new(),
        address: String::new(),
        port: 0,
        ttl: rr.ttl(),
        attributes: Vec::new(),
    };

    match rr.data() {
        Some(RData::A(addr)) => record.address = addr.0.to_string(),
        Some(RData::AAAA(addr)) => record.address = addr.0.to_string(),
        Some(RData::PTR(ptr)) => record.target = display_name(&ptr.0),
        Some(RData::SRV(srv)) => {
            record.target = display_name(srv.target());
            record.port = srv.port();
        }
        Some(RData::TXT(txt)) => {
            for chunk in txt.txt_data() {
                let text = String::from_utf8_lossy(chunk);
                if text.is_empty() {
                    continue;
                }
                let (key, value) = match text.split_once('=') {
                    Some((key, value)) => (key.to_string(), value.to_string()),
                    None => (text.into_owned(), String::new()),
                };
                record.attributes.push((key, value));
            }
        }
        _ => {}
    }

    record
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    use hickory_proto::rr::rdata::{A, PTR, SRV, TXT};

    use super::*;

    fn name(text: &str) -> Name {
        Name::from_str(text).unwrap()
    }

    fn source() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20))
    }

    fn decode(dns: DnsMessage) -> Message {
        decode_packet(&dns.to_vec().unwrap(), source()).unwrap()
    }

    #[test]
    fn decodes_a_query() {
        let mut dns = DnsMessage::new();
        dns.add_query(hickory_proto::op::Query::query(
            name("printer.local."),
            RecordType::PTR,
        ));

        let message = decode(dns);
        assert!(!message.is_response);
        assert_eq!(message.source, "192.168.1.20");
        assert_eq!(message.queries.len(), 1);
        assert_eq!(message.queries[0].rtype, RrType::Ptr);
        assert_eq!(message.queries[0].name, "printer.local");
        assert!(message.records.is_empty());
    }

    #[test]
    fn decodes_an_a_record_response() {
        let mut dns = DnsMessage::new();
        dns.set_message_type(MessageType::Response);
        dns.add_answer(DnsRecord::from_rdata(
            name("printer.local."),
            120,
            RData::A(A(Ipv4Addr::new(192, 168, 1, 10))),
        ));

        let message = decode(dns);
        assert!(message.is_response);
        assert_eq!(message.records.len(), 1);
        let record = &message.records[0];
        assert_eq!(record.rtype, RrType::A);
        assert_eq!(record.name, "printer.local");
        assert_eq!(record.address, "192.168.1.10");
        assert_eq!(record.ttl, 120);
    }

    #[test]
    fn decodes_ptr_and_srv_targets() {
        let mut dns = DnsMessage::new();
        dns.set_message_type(MessageType::Response);
        dns.add_answer(DnsRecord::from_rdata(
            name("_http._tcp.local."),
            4500,
            RData::PTR(PTR(name("myprinter._http._tcp.local."))),
        ));
        dns.add_answer(DnsRecord::from_rdata(
            name("myprinter._http._tcp.local."),
            120,
            RData::SRV(SRV::new(0, 0, 631, name("myprinter.local."))),
        ));

        let message = decode(dns);
        assert_eq!(message.records.len(), 2);

        let ptr = &message.records[0];
        assert_eq!(ptr.rtype, RrType::Ptr);
        assert_eq!(ptr.target, "myprinter._http._tcp.local");

        let srv = &message.records[1];
        assert_eq!(srv.rtype, RrType::Srv);
        assert_eq!(srv.target, "myprinter.local");
        assert_eq!(srv.port, 631);
    }

    #[test]
    fn txt_strings_split_into_key_value_pairs_in_order() {
        let mut dns = DnsMessage::new();
        dns.set_message_type(MessageType::Response);
        dns.add_answer(DnsRecord::from_rdata(
            name("myprinter._http._tcp.local."),
            4500,
            RData::TXT(TXT::new(vec![
                "path=/".to_string(),
                "flag".to_string(),
                "note=a=b".to_string(),
            ])),
        ));

        let message = decode(dns);
        let record = &message.records[0];
        assert_eq!(record.rtype, RrType::Txt);
        assert_eq!(
            record.attributes,
            vec![
                ("path".to_string(), "/".to_string()),
                ("flag".to_string(), String::new()),
                ("note".to_string(), "a=b".to_string()),
            ]
        );
    }

    #[test]
    fn additional_section_records_are_included() {
        let mut dns = DnsMessage::new();
        dns.set_message_type(MessageType::Response);
        dns.add_additional(DnsRecord::from_rdata(
            name("printer.local."),
            120,
            RData::A(A(Ipv4Addr::new(192, 168, 1, 10))),
        ));

        let message = decode(dns);
        assert_eq!(message.records.len(), 1);
        assert_eq!(message.records[0].rtype, RrType::A);
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(decode_packet(&[0xde, 0xad], source()).is_err());
    }
}
