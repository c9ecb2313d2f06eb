//! Wire-format vocabulary shared by the packet validator and the answer
//! classifier.
//!
//! Every protocol number the parser relies on lives here, so the rest of the
//! workspace never spells a raw literal for a label limit, a class code or a
//! record type.

pub mod constants;
pub mod header;
pub mod record_class;
pub mod record_type;

pub use constants::*;
pub use header::{Direction, Header, Opcode};
pub use record_class::RecordClass;
pub use record_type::RecordType;
