use chnroute_dns_domain::wire::{header::RCODE_NOERROR, DNS_HEADER_SIZE, DNS_QUERY_RECORD_SIZE};
use chnroute_dns_domain::{Direction, Header, PacketError};

/// Turns a checked packet into a NOERROR reply with no records.
///
/// The header becomes a reply with zero answer, authority and additional
/// counts, and everything after the question is dropped. Used to answer an
/// AAAA query locally, or to strip a reply whose address is filtered.
/// Returns the new packet length; bytes past it are left untouched.
pub fn rewrite_as_empty_reply(buf: &mut [u8], name_len: usize) -> Result<usize, PacketError> {
    let new_len = DNS_HEADER_SIZE + name_len + DNS_QUERY_RECORD_SIZE;
    if buf.len() < new_len {
        return Err(PacketError::InsufficientQuerySection {
            remaining: buf.len().saturating_sub(DNS_HEADER_SIZE + name_len),
            needed: DNS_QUERY_RECORD_SIZE,
        });
    }

    let mut header = Header::parse(buf).ok_or(PacketError::PacketTooShort(buf.len()))?;
    header.set_direction(Direction::Reply);
    header.set_rcode(RCODE_NOERROR);
    header.answer_count = 0;
    header.authority_count = 0;
    header.additional_count = 0;
    buf[..DNS_HEADER_SIZE].copy_from_slice(&header.encode());

    Ok(new_len)
}
