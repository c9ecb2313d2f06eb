use crate::wire::{Direction, Opcode, RecordClass, RecordType};
use thiserror::Error;

/// Why a span of label bytes failed to decode into a dotted name.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFault {
    #[error("zero-length label before the end of the name")]
    EmptyLabel,

    #[error("label length is too long: {0}")]
    LabelTooLong(u8),

    #[error("label length is greater than remaining length: {label_len} > {remaining}")]
    LabelOverrun { label_len: u8, remaining: usize },

    #[error("labels do not cover the name, {0} byte(s) left over")]
    TrailingBytes(usize),
}

/// Every way a query or reply can be rejected by the parser.
///
/// Each check fails fast; a packet producing any of these is dropped whole.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketError {
    #[error("dns packet is too short: {0}")]
    PacketTooShort(usize),

    #[error("dns packet is too long: {0}")]
    PacketTooLong(usize),

    #[error("expected a {expected} packet, but header qr is {qr}")]
    DirectionMismatch { expected: Direction, qr: u8 },

    #[error("this is not a standard query, opcode: {0}")]
    UnsupportedOpcode(Opcode),

    #[error("there should be one and only one question section: {0}")]
    WrongQuestionCount(u16),

    #[error("format error: domain name end byte not found")]
    NameTerminatorNotFound,

    #[error("encoded domain name is too short: {0}")]
    EncodedNameTooShort(usize),

    #[error("encoded domain name is too long: {0}")]
    EncodedNameTooLong(usize),

    #[error("malformed domain name: {0}")]
    MalformedName(#[from] NameFault),

    #[error("remaining length is less than the query record: {remaining} < {needed}")]
    InsufficientQuerySection { remaining: usize, needed: usize },

    #[error("only supports standard internet query class: {0}")]
    UnsupportedClass(RecordClass),

    #[error("only supports standard internet record class: {0}")]
    BadRecordClass(RecordClass),

    #[error("remaining length is less than the record: {remaining} < {needed}")]
    RecordTruncated { remaining: usize, needed: usize },

    #[error("illegal label length pattern: {0:#04x}")]
    IllegalLabelLengthPattern(u8),

    #[error("{rtype} record has unexpected rdata length: {len}")]
    UnexpectedAddressLength { rtype: RecordType, len: usize },
}

/// Failure to build the domestic address range set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChnRouteError {
    #[error("Failed to read chnroute file {0}: {1}")]
    FileRead(String, String),

    #[error("Invalid CIDR '{value}' at {source_name}:{line}: {reason}")]
    InvalidCidr {
        source_name: String,
        line: usize,
        value: String,
        reason: String,
    },
}
