use chnroute_dns_domain::{ChnRouteSet, IpCheckResult, PacketError, RecordClass, RecordType};
use chnroute_dns_infrastructure::dns::wire::{
    answer_addresses, check_reply, classify_reply, first_address, Answers,
};
use std::net::IpAddr;

mod helpers;
use helpers::{PacketBuilder, CLASS_IN, PTR_TO_QUESTION, TYPE_A, TYPE_CNAME};

const CHN_V4: [u8; 4] = [114, 114, 114, 114];
const FOREIGN_V4: [u8; 4] = [8, 8, 8, 8];
// 240e::1
const CHN_V6: [u8; 16] = [0x24, 0x0e, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
// 2001:4860:4860::8888
const FOREIGN_V6: [u8; 16] = [
    0x20, 0x01, 0x48, 0x60, 0x48, 0x60, 0, 0, 0, 0, 0, 0, 0, 0, 0x88, 0x88,
];

fn routes() -> ChnRouteSet {
    ChnRouteSet::from_cidrs("test", [(1, "114.114.0.0/16"), (2, "240e::/20")]).unwrap()
}

fn classify(buf: &[u8]) -> IpCheckResult {
    let reply = check_reply(buf, None).unwrap();
    classify_reply(&reply, &routes())
}

#[test]
fn test_domestic_a_record() {
    let buf = PacketBuilder::reply("www.baidu.com").a(CHN_V4).build();
    assert_eq!(classify(&buf), IpCheckResult::IsChnIp);
}

#[test]
fn test_foreign_a_record() {
    let buf = PacketBuilder::reply("www.google.com").a(FOREIGN_V4).build();
    assert_eq!(classify(&buf), IpCheckResult::NotChnIp);
}

#[test]
fn test_domestic_aaaa_record() {
    let buf = PacketBuilder::reply("www.qq.com").qtype(28).aaaa(CHN_V6).build();
    assert_eq!(classify(&buf), IpCheckResult::IsChnIp);
}

#[test]
fn test_foreign_aaaa_record() {
    let buf = PacketBuilder::reply("dns.google").qtype(28).aaaa(FOREIGN_V6).build();
    assert_eq!(classify(&buf), IpCheckResult::NotChnIp);
}

#[test]
fn test_no_answers_is_not_found() {
    let buf = PacketBuilder::reply("nxdomain.example").build();
    assert_eq!(classify(&buf), IpCheckResult::NotFound);
}

#[test]
fn test_only_cname_answers_is_not_found() {
    let buf = PacketBuilder::reply("www.example.com")
        .cname("edge.example.net")
        .cname("edge2.example.net")
        .build();
    assert_eq!(classify(&buf), IpCheckResult::NotFound);
}

#[test]
fn test_cname_chain_then_address() {
    let buf = PacketBuilder::reply("www.taobao.com")
        .cname("www.taobao.com.danuoyi.tbcache.com")
        .record(b"\x03www\x06taobao\x03com\x00", TYPE_A, CLASS_IN, &CHN_V4)
        .build();
    assert_eq!(classify(&buf), IpCheckResult::IsChnIp);
}

#[test]
fn test_first_address_wins() {
    let buf = PacketBuilder::reply("mixed.example")
        .a(FOREIGN_V4)
        .a(CHN_V4)
        .build();
    assert_eq!(classify(&buf), IpCheckResult::NotChnIp);
}

#[test]
fn test_garbage_after_first_address_is_not_examined() {
    let buf = PacketBuilder::reply("example.com")
        .a(CHN_V4)
        .answer_count(2)
        .raw_answer_bytes(&[0x7F])
        .build();
    assert_eq!(classify(&buf), IpCheckResult::IsChnIp);
}

#[test]
fn test_rdlength_beyond_packet_is_bad() {
    let mut buf = PacketBuilder::reply("example.com").a(CHN_V4).build();
    buf.truncate(buf.len() - 1);

    let reply = check_reply(&buf, None).unwrap();
    assert_eq!(classify_reply(&reply, &routes()), IpCheckResult::BadPacket);
    assert_eq!(
        first_address(&reply).unwrap_err(),
        PacketError::RecordTruncated {
            remaining: 13,
            needed: 14,
        }
    );
}

#[test]
fn test_large_rdlength_on_skipped_record_is_bad() {
    let buf = PacketBuilder::reply("example.com")
        .raw_answer_bytes(&PTR_TO_QUESTION)
        .raw_answer_bytes(&[0x00, 0x05, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3C, 0xFF, 0xFF])
        .raw_answer_bytes(b"\x03abc\x00")
        .answer_count(1)
        .build();
    assert_eq!(classify(&buf), IpCheckResult::BadPacket);
}

#[test]
fn test_forged_answer_count_is_bad() {
    let buf = PacketBuilder::reply("example.com")
        .cname("other.example.com")
        .answer_count(20)
        .build();
    assert_eq!(classify(&buf), IpCheckResult::BadPacket);
}

#[test]
fn test_non_internet_record_class_is_bad() {
    let buf = PacketBuilder::reply("example.com")
        .record(&PTR_TO_QUESTION, TYPE_A, 3, &CHN_V4)
        .build();

    let reply = check_reply(&buf, None).unwrap();
    assert_eq!(
        first_address(&reply).unwrap_err(),
        PacketError::BadRecordClass(RecordClass(3))
    );
    assert_eq!(classify_reply(&reply, &routes()), IpCheckResult::BadPacket);
}

#[test]
fn test_a_record_with_wrong_length_is_bad() {
    let buf = PacketBuilder::reply("example.com")
        .record(&PTR_TO_QUESTION, TYPE_A, CLASS_IN, &[1, 2, 3, 4, 5])
        .build();

    let reply = check_reply(&buf, None).unwrap();
    assert_eq!(
        first_address(&reply).unwrap_err(),
        PacketError::UnexpectedAddressLength {
            rtype: RecordType::A,
            len: 5,
        }
    );
    assert_eq!(classify_reply(&reply, &routes()), IpCheckResult::BadPacket);
}

#[test]
fn test_aaaa_record_with_ipv4_payload_is_bad() {
    let buf = PacketBuilder::reply("example.com")
        .qtype(28)
        .record(&PTR_TO_QUESTION, 28, CLASS_IN, &CHN_V4)
        .build();
    assert_eq!(classify(&buf), IpCheckResult::BadPacket);
}

#[test]
fn test_illegal_label_in_answer_name_is_bad() {
    let buf = PacketBuilder::reply("example.com")
        .record(b"\x80abc\x00", TYPE_A, CLASS_IN, &CHN_V4)
        .build();
    assert_eq!(classify(&buf), IpCheckResult::BadPacket);
}

#[test]
fn test_closure_predicate_receives_address() {
    let buf = PacketBuilder::reply("example.com").a([10, 0, 0, 1]).build();
    let reply = check_reply(&buf, None).unwrap();

    let private = |addr: IpAddr| matches!(addr, IpAddr::V4(v4) if v4.is_private());
    assert_eq!(classify_reply(&reply, &private), IpCheckResult::IsChnIp);
}

#[test]
fn test_answer_addresses_collects_every_address() {
    let buf = PacketBuilder::reply("example.com")
        .cname("cdn.example.net")
        .a(CHN_V4)
        .aaaa(FOREIGN_V6)
        .a(FOREIGN_V4)
        .build();
    let reply = check_reply(&buf, None).unwrap();

    let addrs = answer_addresses(&reply).unwrap();
    assert_eq!(
        addrs.as_slice(),
        &[
            IpAddr::from(CHN_V4),
            IpAddr::from(FOREIGN_V6),
            IpAddr::from(FOREIGN_V4),
        ]
    );
}

#[test]
fn test_answers_iterator_stops_after_error() {
    let buf = PacketBuilder::reply("example.com")
        .record(&PTR_TO_QUESTION, TYPE_CNAME, 255, b"\x00")
        .a(CHN_V4)
        .build();
    let reply = check_reply(&buf, None).unwrap();

    let records: Vec<_> = Answers::new(&reply).collect();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_err());
}

#[test]
fn test_answers_iterator_reports_ttl_and_rdata() {
    let buf = PacketBuilder::reply("example.com").a(FOREIGN_V4).build();
    let reply = check_reply(&buf, None).unwrap();

    let record = Answers::new(&reply).next().unwrap().unwrap();
    assert_eq!(record.rtype, RecordType::A);
    assert_eq!(record.rclass, RecordClass::INTERNET);
    assert_eq!(record.ttl, 300);
    assert_eq!(record.rdata, &FOREIGN_V4);
}
