//! chnroute-dns Domain Layer
pub mod chnroute;
pub mod config;
pub mod errors;
pub mod ip_check;
pub mod wire;

pub use chnroute::{ChnRouteSet, DomesticRange};
pub use config::{CliOverrides, Config};
pub use errors::{ChnRouteError, NameFault, PacketError};
pub use ip_check::IpCheckResult;
pub use wire::{Direction, Header, Opcode, RecordClass, RecordType};
