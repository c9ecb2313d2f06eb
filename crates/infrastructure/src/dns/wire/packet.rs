use super::cursor::WireCursor;
use super::name::{decode_name, DomainName};
use chnroute_dns_domain::wire::{
    ascii_name_len, DNS_HEADER_SIZE, DNS_NAME_ENC_MAXLEN, DNS_NAME_ENC_MINLEN,
    DNS_PACKET_MAXSIZE, DNS_PACKET_MINSIZE, DNS_QUERY_RECORD_SIZE,
};
use chnroute_dns_domain::{Direction, Header, Opcode, PacketError, RecordClass, RecordType};
use tracing::{debug, warn};

/// A query or reply whose header and single question passed validation.
///
/// Only obtainable through [`check_packet`], so holding one proves the
/// question section is in bounds and the answer section starts at
/// [`CheckedPacket::question_end`].
#[derive(Debug, Clone, Copy)]
pub struct CheckedPacket<'a> {
    buf: &'a [u8],
    direction: Direction,
    header: Header,
    name_len: usize,
    qtype: RecordType,
    qclass: RecordClass,
}

impl<'a> CheckedPacket<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        self.buf
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Encoded length of the question name, terminator included.
    pub fn name_len(&self) -> usize {
        self.name_len
    }

    /// Length of the question name once decoded (0 for the root).
    pub fn ascii_name_len(&self) -> usize {
        ascii_name_len(self.name_len)
    }

    pub fn encoded_name(&self) -> &'a [u8] {
        &self.buf[DNS_HEADER_SIZE..DNS_HEADER_SIZE + self.name_len]
    }

    pub fn qtype(&self) -> RecordType {
        self.qtype
    }

    pub fn qclass(&self) -> RecordClass {
        self.qclass
    }

    /// Offset of the first byte after the question, where answers begin.
    pub fn question_end(&self) -> usize {
        DNS_HEADER_SIZE + self.name_len + DNS_QUERY_RECORD_SIZE
    }

    /// Bytes from the answer section to the end of the packet.
    pub fn answer_section(&self) -> &'a [u8] {
        self.buf.get(self.question_end()..).unwrap_or_default()
    }
}

/// Checks a client query. See [`check_packet`].
pub fn check_query<'a>(
    buf: &'a [u8],
    name_out: Option<&mut DomainName>,
) -> Result<CheckedPacket<'a>, PacketError> {
    check_packet(Direction::Query, buf, name_out)
}

/// Checks an upstream reply. See [`check_packet`].
pub fn check_reply<'a>(
    buf: &'a [u8],
    name_out: Option<&mut DomainName>,
) -> Result<CheckedPacket<'a>, PacketError> {
    check_packet(Direction::Reply, buf, name_out)
}

/// Validates the header and the single question of a datagram.
///
/// When `name_out` is given the question name is decoded into it. Any
/// failure invalidates the whole packet and is logged once here.
pub fn check_packet<'a>(
    direction: Direction,
    buf: &'a [u8],
    name_out: Option<&mut DomainName>,
) -> Result<CheckedPacket<'a>, PacketError> {
    match validate(direction, buf, name_out) {
        Ok(packet) => {
            debug!(
                direction = %direction,
                id = packet.id(),
                len = buf.len(),
                qtype = %packet.qtype(),
                "dns packet accepted"
            );
            Ok(packet)
        }
        Err(e) => {
            warn!(direction = %direction, len = buf.len(), error = %e, "dns packet rejected");
            Err(e)
        }
    }
}

fn validate<'a>(
    direction: Direction,
    buf: &'a [u8],
    name_out: Option<&mut DomainName>,
) -> Result<CheckedPacket<'a>, PacketError> {
    if buf.len() < DNS_PACKET_MINSIZE {
        return Err(PacketError::PacketTooShort(buf.len()));
    }
    if buf.len() > DNS_PACKET_MAXSIZE {
        return Err(PacketError::PacketTooLong(buf.len()));
    }

    let header = Header::parse(buf).ok_or(PacketError::PacketTooShort(buf.len()))?;
    if header.qr() != direction.qr() {
        return Err(PacketError::DirectionMismatch {
            expected: direction,
            qr: header.qr(),
        });
    }
    if header.opcode() != Opcode::QUERY {
        return Err(PacketError::UnsupportedOpcode(header.opcode()));
    }
    if header.question_count != 1 {
        return Err(PacketError::WrongQuestionCount(header.question_count));
    }

    // encoded name: "\3www\6google\3com\0"
    let question = &buf[DNS_HEADER_SIZE..];
    let terminator = question
        .iter()
        .position(|&b| b == 0)
        .ok_or(PacketError::NameTerminatorNotFound)?;

    let name_len = terminator + 1;
    if name_len < DNS_NAME_ENC_MINLEN {
        return Err(PacketError::EncodedNameTooShort(name_len));
    }
    if name_len > DNS_NAME_ENC_MAXLEN {
        return Err(PacketError::EncodedNameTooLong(name_len));
    }

    if let Some(out) = name_out {
        decode_name(&question[..name_len], out)?;
    }

    let mut cursor = WireCursor::new(&question[name_len..]);
    let insufficient = PacketError::InsufficientQuerySection {
        remaining: cursor.remaining(),
        needed: DNS_QUERY_RECORD_SIZE,
    };
    let (Some(qtype), Some(qclass)) = (cursor.read_u16(), cursor.read_u16()) else {
        return Err(insufficient);
    };

    let qclass = RecordClass(qclass);
    if qclass != RecordClass::INTERNET {
        return Err(PacketError::UnsupportedClass(qclass));
    }

    Ok(CheckedPacket {
        buf,
        direction,
        header,
        name_len,
        qtype: RecordType::from_u16(qtype),
        qclass,
    })
}
