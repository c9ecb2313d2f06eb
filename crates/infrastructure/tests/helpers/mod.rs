#![allow(dead_code)]
pub mod builders;

pub use builders::{
    encode_name, PacketBuilder, CLASS_IN, PTR_TO_QUESTION, TYPE_A, TYPE_AAAA, TYPE_CNAME,
};
