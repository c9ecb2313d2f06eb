pub mod wire;

pub use wire::{
    answer_addresses, check_packet, check_query, check_reply, classify_reply, decode_name,
    first_address, rewrite_as_empty_reply, skip_name, AnswerRecord, Answers, CheckedPacket,
    DomainName, WireCursor,
};
