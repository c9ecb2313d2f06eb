use super::cursor::WireCursor;
use super::name::skip_name;
use super::packet::CheckedPacket;
use chnroute_dns_domain::wire::{DNS_RECORD_HEADER_SIZE, IPV4_BINADDR_LEN, IPV6_BINADDR_LEN};
use chnroute_dns_domain::{DomesticRange, IpCheckResult, PacketError, RecordClass, RecordType};
use smallvec::SmallVec;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::{debug, warn};

/// One answer record, its name already skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord<'a> {
    pub rtype: RecordType,
    pub rclass: RecordClass,
    pub ttl: u32,
    pub rdata: &'a [u8],
}

impl AnswerRecord<'_> {
    /// The address carried by an A or AAAA record, `None` for other types.
    pub fn address(&self) -> Result<Option<IpAddr>, PacketError> {
        let unexpected = || PacketError::UnexpectedAddressLength {
            rtype: self.rtype,
            len: self.rdata.len(),
        };
        match self.rtype {
            RecordType::A => {
                let octets: [u8; IPV4_BINADDR_LEN] =
                    self.rdata.try_into().map_err(|_| unexpected())?;
                Ok(Some(IpAddr::V4(Ipv4Addr::from(octets))))
            }
            RecordType::AAAA => {
                let octets: [u8; IPV6_BINADDR_LEN] =
                    self.rdata.try_into().map_err(|_| unexpected())?;
                Ok(Some(IpAddr::V6(Ipv6Addr::from(octets))))
            }
            _ => Ok(None),
        }
    }
}

/// Iterator over the answer section of a checked reply.
///
/// Yields at most `answer_count` records. The count comes from the header
/// and is not trusted: every record is bounds-checked on its own, and the
/// iterator stops after the first error.
#[derive(Debug, Clone)]
pub struct Answers<'a> {
    cursor: WireCursor<'a>,
    left: u16,
    failed: bool,
}

impl<'a> Answers<'a> {
    pub fn new(reply: &CheckedPacket<'a>) -> Self {
        Self {
            cursor: WireCursor::new(reply.answer_section()),
            left: reply.header().answer_count,
            failed: false,
        }
    }
}

impl<'a> Iterator for Answers<'a> {
    type Item = Result<AnswerRecord<'a>, PacketError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.left == 0 {
            return None;
        }
        self.left -= 1;

        let record = read_record(&mut self.cursor);
        self.failed = record.is_err();
        Some(record)
    }
}

fn read_record<'a>(cursor: &mut WireCursor<'a>) -> Result<AnswerRecord<'a>, PacketError> {
    skip_name(cursor)?;

    let available = cursor.remaining();
    let header_truncated = PacketError::RecordTruncated {
        remaining: available,
        needed: DNS_RECORD_HEADER_SIZE,
    };
    let (Some(rtype), Some(rclass), Some(ttl), Some(rdlen)) = (
        cursor.read_u16(),
        cursor.read_u16(),
        cursor.read_u32(),
        cursor.read_u16(),
    ) else {
        return Err(header_truncated);
    };

    let rclass = RecordClass(rclass);
    if rclass != RecordClass::INTERNET {
        return Err(PacketError::BadRecordClass(rclass));
    }

    let rdlen = usize::from(rdlen);
    let rdata = cursor
        .read_bytes(rdlen)
        .ok_or(PacketError::RecordTruncated {
            remaining: available,
            needed: DNS_RECORD_HEADER_SIZE + rdlen,
        })?;

    Ok(AnswerRecord {
        rtype: RecordType::from_u16(rtype),
        rclass,
        ttl,
        rdata,
    })
}

/// Address of the first A/AAAA answer, if any.
///
/// Later records are not examined once an address is found, so a malformed
/// record after it goes unnoticed.
pub fn first_address(reply: &CheckedPacket<'_>) -> Result<Option<IpAddr>, PacketError> {
    for record in Answers::new(reply) {
        if let Some(addr) = record?.address()? {
            return Ok(Some(addr));
        }
    }
    Ok(None)
}

/// Classifies a validated reply by its first A/AAAA answer.
///
/// The caller checks the qtype first: classification only makes sense for
/// A and AAAA questions. Only the first address counts; resolvers are
/// expected to put the relevant address first.
pub fn classify_reply<R>(reply: &CheckedPacket<'_>, ranges: &R) -> IpCheckResult
where
    R: DomesticRange + ?Sized,
{
    let result = match first_address(reply) {
        Ok(Some(addr)) if ranges.contains(addr) => IpCheckResult::IsChnIp,
        Ok(Some(_)) => IpCheckResult::NotChnIp,
        Ok(None) => IpCheckResult::NotFound,
        Err(e) => {
            warn!(id = reply.id(), error = %e, "bad answer section");
            IpCheckResult::BadPacket
        }
    };

    debug!(id = reply.id(), result = %result, "reply classified");
    result
}

/// Every A/AAAA address among the answers, in wire order.
pub fn answer_addresses(reply: &CheckedPacket<'_>) -> Result<SmallVec<[IpAddr; 4]>, PacketError> {
    let mut addrs = SmallVec::new();
    for record in Answers::new(reply) {
        if let Some(addr) = record?.address()? {
            addrs.push(addr);
        }
    }
    Ok(addrs)
}
