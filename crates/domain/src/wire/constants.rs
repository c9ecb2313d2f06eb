/// Fixed DNS header: id, flags and the four section counts.
pub const DNS_HEADER_SIZE: usize = 12;

/// Fixed part of a question entry: qtype + qclass.
pub const DNS_QUERY_RECORD_SIZE: usize = 4;

/// Fixed part of a resource record after its name: rtype + rclass + ttl + rdlength.
pub const DNS_RECORD_HEADER_SIZE: usize = 10;

/// Shortest encoded name: the root, a single zero byte.
pub const DNS_NAME_ENC_MINLEN: usize = 1;

/// Longest encoded name allowed on the wire (RFC 1035 §2.3.4).
pub const DNS_NAME_ENC_MAXLEN: usize = 255;

/// Longest dotted-text name an encoded name can decode to.
pub const DNS_NAME_MAXLEN: usize = DNS_NAME_ENC_MAXLEN - 2;

pub const DNS_LABEL_MAXLEN: u8 = 63;

/// Length bytes at or above this value start a compression pointer.
pub const DNS_COMPRESSION_MINVAL: u8 = 0xC0;

pub const DNS_COMPRESSION_POINTER_SIZE: usize = 2;

/// Header plus the smallest possible question (root name, qtype, qclass).
pub const DNS_PACKET_MINSIZE: usize = DNS_HEADER_SIZE + DNS_NAME_ENC_MINLEN + DNS_QUERY_RECORD_SIZE;

/// Upper bound for a single UDP datagram handled by the proxy; large enough
/// for EDNS0-sized replies over a 1500-byte MTU.
pub const DNS_PACKET_MAXSIZE: usize = 1472;

pub const IPV4_BINADDR_LEN: usize = 4;
pub const IPV6_BINADDR_LEN: usize = 16;

/// Number of bytes the dotted text of an encoded name occupies.
///
/// The first length byte and the terminator disappear, every other length
/// byte becomes a dot. The root renders as "." and is reported as 0 here,
/// matching how callers size name-based lookups.
pub fn ascii_name_len(encoded_len: usize) -> usize {
    encoded_len.saturating_sub(2)
}
