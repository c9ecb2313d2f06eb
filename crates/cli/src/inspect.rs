use chnroute_dns_domain::config::InspectConfig;
use chnroute_dns_domain::{ChnRouteSet, Direction, Header, IpCheckResult, PacketError};
use chnroute_dns_infrastructure::dns::wire::{
    answer_addresses, check_packet, check_query, check_reply, classify_reply,
    rewrite_as_empty_reply, CheckedPacket, DomainName,
};
use clap::ValueEnum;
use std::path::Path;

/// How packet files are stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PacketFormat {
    /// Raw datagram bytes
    Binary,
    /// Hex digits, whitespace ignored
    Hex,
}

pub fn read_packet(path: &Path, format: PacketFormat) -> anyhow::Result<Vec<u8>> {
    match format {
        PacketFormat::Binary => Ok(std::fs::read(path)?),
        PacketFormat::Hex => decode_hex(&std::fs::read_to_string(path)?),
    }
}

pub fn decode_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        anyhow::bail!("odd number of hex digits: {}", digits.len());
    }

    digits
        .chunks_exact(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair)?;
            u8::from_str_radix(pair, 16)
                .map_err(|e| anyhow::anyhow!("invalid hex byte '{}': {}", pair, e))
        })
        .collect()
}

/// What the proxy would do with a reply from the domestic upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyVerdict {
    Accept,
    Filter,
}

impl ReplyVerdict {
    pub fn from_check(result: IpCheckResult, noip_as_chnip: bool) -> Self {
        match result {
            IpCheckResult::IsChnIp => ReplyVerdict::Accept,
            IpCheckResult::NotFound if noip_as_chnip => ReplyVerdict::Accept,
            IpCheckResult::NotFound | IpCheckResult::NotChnIp | IpCheckResult::BadPacket => {
                ReplyVerdict::Filter
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyVerdict::Accept => "accept",
            ReplyVerdict::Filter => "filter",
        }
    }
}

/// Validates packets and renders one report line per packet.
pub struct Inspector<'a> {
    routes: &'a ChnRouteSet,
    config: &'a InspectConfig,
}

impl<'a> Inspector<'a> {
    pub fn new(routes: &'a ChnRouteSet, config: &'a InspectConfig) -> Self {
        Self { routes, config }
    }

    pub fn query(&self, buf: &[u8]) -> Result<String, PacketError> {
        let mut name = DomainName::new();
        let packet = check_query(buf, self.name_buf(&mut name))?;
        Ok(self.describe(&packet, &name))
    }

    pub fn reply(&self, buf: &[u8]) -> Result<String, PacketError> {
        let mut name = DomainName::new();
        let packet = check_reply(buf, self.name_buf(&mut name))?;
        let mut line = self.describe(&packet, &name);

        if !packet.qtype().is_address() {
            line.push_str(&format!(" result=- verdict={}", ReplyVerdict::Accept.as_str()));
            return Ok(line);
        }

        let result = classify_reply(&packet, self.routes);
        let verdict = ReplyVerdict::from_check(result, self.config.noip_as_chnip);
        let addrs = answer_addresses(&packet)
            .map(|addrs| {
                addrs
                    .iter()
                    .map(|addr| addr.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default();

        line.push_str(&format!(
            " result={} verdict={} answers=[{}]",
            result,
            verdict.as_str(),
            addrs
        ));
        Ok(line)
    }

    /// Rewrites `buf` in place into an empty NOERROR reply and returns the
    /// shortened packet. Queries and replies are both accepted; the packet is
    /// validated once in the direction its QR bit claims.
    pub fn strip<'b>(&self, buf: &'b mut [u8]) -> Result<&'b [u8], PacketError> {
        let header = Header::parse(buf).ok_or(PacketError::PacketTooShort(buf.len()))?;
        let direction = if header.qr() == Direction::Reply.qr() {
            Direction::Reply
        } else {
            Direction::Query
        };
        let name_len = check_packet(direction, buf, None)?.name_len();
        let len = rewrite_as_empty_reply(buf, name_len)?;
        Ok(&buf[..len])
    }

    fn name_buf<'n>(&self, name: &'n mut DomainName) -> Option<&'n mut DomainName> {
        self.config.decode_names.then_some(name)
    }

    fn describe(&self, packet: &CheckedPacket<'_>, name: &DomainName) -> String {
        let name = if name.is_empty() {
            "-".to_string()
        } else {
            name.to_string()
        };
        format!(
            "{} id={:#06x} name={} qtype={}",
            packet.direction(),
            packet.id(),
            name,
            packet.qtype()
        )
    }
}
