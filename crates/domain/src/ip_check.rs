use std::fmt;

/// Outcome of classifying the first address record of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpCheckResult {
    /// The answer section could not be walked safely.
    BadPacket,
    /// The first A/AAAA address belongs to the domestic route set.
    IsChnIp,
    NotChnIp,
    /// No A/AAAA record among the answers.
    NotFound,
}

impl IpCheckResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpCheckResult::BadPacket => "bad_packet",
            IpCheckResult::IsChnIp => "is_chnip",
            IpCheckResult::NotChnIp => "not_chnip",
            IpCheckResult::NotFound => "not_found",
        }
    }
}

impl fmt::Display for IpCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
