//! Bounds-checked parsing of raw DNS datagrams.
//!
//! Everything here works on caller-owned byte slices and keeps no state
//! between calls.

pub mod answer;
pub mod cursor;
pub mod name;
pub mod packet;
pub mod rewrite;

pub use answer::{answer_addresses, classify_reply, first_address, AnswerRecord, Answers};
pub use cursor::WireCursor;
pub use name::{decode_name, skip_name, DomainName};
pub use packet::{check_packet, check_query, check_reply, CheckedPacket};
pub use rewrite::rewrite_as_empty_reply;
