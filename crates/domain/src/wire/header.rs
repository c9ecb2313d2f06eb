use super::constants::DNS_HEADER_SIZE;
use std::fmt;

const QR_SHIFT: u16 = 15;
const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0x0F;
const AA_BIT: u16 = 1 << 10;
const TC_BIT: u16 = 1 << 9;
const RD_BIT: u16 = 1 << 8;
const RA_BIT: u16 = 1 << 7;
const Z_SHIFT: u16 = 4;
const Z_MASK: u16 = 0x07;
const RCODE_MASK: u16 = 0x0F;

pub const RCODE_NOERROR: u8 = 0;

/// Which side of an exchange a packet is expected to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Query,
    Reply,
}

impl Direction {
    /// Value of the header QR bit for this direction.
    pub fn qr(self) -> u8 {
        match self {
            Direction::Query => 0,
            Direction::Reply => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Query => "query",
            Direction::Reply => "reply",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(pub u8);

impl Opcode {
    /// Standard query.
    pub const QUERY: Opcode = Opcode(0);
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decoded copy of the 12-byte DNS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    /// Reads the header from the front of `buf`, or `None` if it is shorter
    /// than a header.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        let raw: &[u8; DNS_HEADER_SIZE] = buf.get(..DNS_HEADER_SIZE)?.try_into().ok()?;
        let word = |i: usize| u16::from_be_bytes([raw[i], raw[i + 1]]);
        Some(Self {
            id: word(0),
            flags: word(2),
            question_count: word(4),
            answer_count: word(6),
            authority_count: word(8),
            additional_count: word(10),
        })
    }

    pub fn encode(&self) -> [u8; DNS_HEADER_SIZE] {
        let mut out = [0u8; DNS_HEADER_SIZE];
        let words = [
            self.id,
            self.flags,
            self.question_count,
            self.answer_count,
            self.authority_count,
            self.additional_count,
        ];
        for (chunk, word) in out.chunks_exact_mut(2).zip(words) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    pub fn qr(&self) -> u8 {
        (self.flags >> QR_SHIFT) as u8
    }

    pub fn opcode(&self) -> Opcode {
        Opcode(((self.flags >> OPCODE_SHIFT) & OPCODE_MASK) as u8)
    }

    pub fn authoritative(&self) -> bool {
        self.flags & AA_BIT != 0
    }

    pub fn truncated(&self) -> bool {
        self.flags & TC_BIT != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & RD_BIT != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & RA_BIT != 0
    }

    pub fn z(&self) -> u8 {
        ((self.flags >> Z_SHIFT) & Z_MASK) as u8
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & RCODE_MASK) as u8
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.flags = (self.flags & !(1 << QR_SHIFT)) | (u16::from(direction.qr()) << QR_SHIFT);
    }

    pub fn set_rcode(&mut self, rcode: u8) {
        self.flags = (self.flags & !RCODE_MASK) | (u16::from(rcode) & RCODE_MASK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        // id=0x1234, QR=1 opcode=0 AA=1 TC=0 RD=1 | RA=1 Z=0 RCODE=3
        let buf = [0x12, 0x34, 0x85, 0x83, 0, 1, 0, 2, 0, 3, 0, 4];
        let header = Header::parse(&buf).unwrap();

        assert_eq!(header.id, 0x1234);
        assert_eq!(header.qr(), 1);
        assert_eq!(header.opcode(), Opcode::QUERY);
        assert!(header.authoritative());
        assert!(!header.truncated());
        assert!(header.recursion_desired());
        assert!(header.recursion_available());
        assert_eq!(header.z(), 0);
        assert_eq!(header.rcode(), 3);
        assert_eq!(header.question_count, 1);
        assert_eq!(header.answer_count, 2);
        assert_eq!(header.authority_count, 3);
        assert_eq!(header.additional_count, 4);
    }

    #[test]
    fn test_parse_short_buffer() {
        assert!(Header::parse(&[0u8; 11]).is_none());
    }

    #[test]
    fn test_opcode_extraction() {
        // opcode 2 (STATUS) sits in bits 11..=14
        let buf = [0, 0, 0x10, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];
        assert_eq!(Header::parse(&buf).unwrap().opcode(), Opcode(2));
    }

    #[test]
    fn test_encode_after_rewrite() {
        let buf = [0xAB, 0xCD, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];
        let mut header = Header::parse(&buf).unwrap();
        header.set_direction(Direction::Reply);
        header.set_rcode(RCODE_NOERROR);

        let encoded = header.encode();
        assert_eq!(&encoded[..4], &[0xAB, 0xCD, 0x81, 0x00]);
        assert_eq!(Header::parse(&encoded).unwrap().qr(), 1);
    }
}
