//! chnroute-dns Infrastructure Layer
pub mod chnroute;
pub mod dns;
