use super::cursor::WireCursor;
use chnroute_dns_domain::wire::{
    DNS_COMPRESSION_MINVAL, DNS_COMPRESSION_POINTER_SIZE, DNS_LABEL_MAXLEN, DNS_NAME_ENC_MAXLEN,
    DNS_NAME_ENC_MINLEN, DNS_NAME_MAXLEN, DNS_RECORD_HEADER_SIZE,
};
use chnroute_dns_domain::{NameFault, PacketError};
use std::fmt;

/// Dotted text of a question name, held in a fixed stack buffer.
///
/// A name of `n` encoded bytes decodes to `n - 2` bytes of text (the root
/// decodes to `"."`), so the buffer holds the longest decodable name. Bytes
/// are copied as they appear on the wire: no case folding, no escaping.
#[derive(Clone)]
pub struct DomainName {
    buf: [u8; DNS_NAME_MAXLEN],
    len: usize,
}

impl DomainName {
    pub fn new() -> Self {
        Self {
            buf: [0u8; DNS_NAME_MAXLEN],
            len: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The name as text, or `None` if the wire bytes are not UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_root(&self) -> bool {
        self.as_bytes() == b"."
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    // decode_name pushes at most DNS_NAME_MAXLEN bytes for an encoded name
    // of at most DNS_NAME_ENC_MAXLEN bytes.
    fn push_slice(&mut self, bytes: &[u8]) {
        let end = self.len + bytes.len();
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
    }
}

impl Default for DomainName {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DomainName")
            .field(&String::from_utf8_lossy(self.as_bytes()))
            .finish()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl PartialEq<str> for DomainName {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for DomainName {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

/// Decodes `"\x03www\x06google\x03com\x00"` into `"www.google.com"`.
///
/// `encoded` is the whole encoded name including its terminating zero byte;
/// the terminator itself is not inspected. The root (a lone zero byte)
/// decodes to `"."`. On error `out` holds garbage and must not be used.
pub fn decode_name(encoded: &[u8], out: &mut DomainName) -> Result<(), PacketError> {
    out.clear();

    if encoded.len() > DNS_NAME_ENC_MAXLEN {
        return Err(PacketError::EncodedNameTooLong(encoded.len()));
    }
    if encoded.len() <= DNS_NAME_ENC_MINLEN {
        out.push_slice(b".");
        return Ok(());
    }

    let mut labels = WireCursor::new(&encoded[..encoded.len() - 1]);
    let mut first = true;

    // A label needs its length byte plus at least one byte of text.
    while labels.remaining() >= 2 {
        let Some(label_len) = labels.read_u8() else {
            break;
        };
        if label_len == 0 {
            return Err(NameFault::EmptyLabel.into());
        }
        if label_len > DNS_LABEL_MAXLEN {
            return Err(NameFault::LabelTooLong(label_len).into());
        }
        let remaining = labels.remaining();
        let label = labels
            .read_bytes(usize::from(label_len))
            .ok_or(NameFault::LabelOverrun {
                label_len,
                remaining,
            })?;

        if first {
            first = false;
        } else {
            out.push_slice(b".");
        }
        out.push_slice(label);
    }

    if !labels.is_empty() {
        return Err(NameFault::TrailingBytes(labels.remaining()).into());
    }

    Ok(())
}

/// Steps over a possibly compressed name inside a resource record.
///
/// ```text
///          \0 => root domain
///      \2cn\0 => normal domain
///     [ptr:2] => fully compressed
/// \2cn[ptr:2] => partially compressed
/// ```
///
/// Pointer targets are never followed; only the bytes the name occupies at
/// this position matter. On success the cursor sits on the fixed record
/// header, which is guaranteed to be fully present.
pub fn skip_name(cursor: &mut WireCursor<'_>) -> Result<(), PacketError> {
    while let Some(label_len) = cursor.read_u8() {
        match label_len {
            0 => break,
            DNS_COMPRESSION_MINVAL..=u8::MAX => {
                cursor
                    .skip(DNS_COMPRESSION_POINTER_SIZE - 1)
                    .ok_or(truncated(cursor))?;
                break;
            }
            1..=DNS_LABEL_MAXLEN => {
                cursor
                    .skip(usize::from(label_len))
                    .ok_or(truncated(cursor))?;
            }
            _ => return Err(PacketError::IllegalLabelLengthPattern(label_len)),
        }
    }

    if cursor.remaining() < DNS_RECORD_HEADER_SIZE {
        return Err(truncated(cursor));
    }

    Ok(())
}

fn truncated(cursor: &WireCursor<'_>) -> PacketError {
    PacketError::RecordTruncated {
        remaining: cursor.remaining(),
        needed: DNS_RECORD_HEADER_SIZE,
    }
}
