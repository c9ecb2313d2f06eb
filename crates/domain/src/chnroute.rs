use crate::errors::ChnRouteError;
use ipnetwork::IpNetwork;
use std::net::IpAddr;

/// Membership test against the preloaded domestic ("chnroute") address set.
pub trait DomesticRange {
    fn contains(&self, addr: IpAddr) -> bool;
}

impl<F> DomesticRange for F
where
    F: Fn(IpAddr) -> bool,
{
    fn contains(&self, addr: IpAddr) -> bool {
        self(addr)
    }
}

/// Sorted, non-overlapping inclusive address ranges for both families.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChnRouteSet {
    v4: Vec<(u32, u32)>,
    v6: Vec<(u128, u128)>,
}

impl ChnRouteSet {
    pub fn new(networks: impl IntoIterator<Item = IpNetwork>) -> Self {
        let mut v4 = Vec::new();
        let mut v6 = Vec::new();

        for network in networks {
            match network {
                IpNetwork::V4(net) => {
                    let start = u32::from(net.network());
                    v4.push((start, start | !u32::from(net.mask())));
                }
                IpNetwork::V6(net) => {
                    let start = u128::from(net.network());
                    v6.push((start, start | !u128::from(net.mask())));
                }
            }
        }

        Self {
            v4: merge_ranges(v4, |n| n.checked_add(1)),
            v6: merge_ranges(v6, |n| n.checked_add(1)),
        }
    }

    /// Builds the set from CIDR text, one entry per item. `source_name` only
    /// labels errors.
    pub fn from_cidrs<'a>(
        source_name: &str,
        cidrs: impl IntoIterator<Item = (usize, &'a str)>,
    ) -> Result<Self, ChnRouteError> {
        let networks = parse_cidrs(source_name, cidrs)?;
        Ok(Self::new(networks))
    }

    pub fn extend(&mut self, networks: impl IntoIterator<Item = IpNetwork>) {
        let added = Self::new(networks);
        self.v4.extend(added.v4);
        self.v6.extend(added.v6);
        self.v4 = merge_ranges(std::mem::take(&mut self.v4), |n| n.checked_add(1));
        self.v6 = merge_ranges(std::mem::take(&mut self.v6), |n| n.checked_add(1));
    }

    pub fn contains_ip(&self, addr: IpAddr) -> bool {
        match addr {
            IpAddr::V4(ip) => range_contains(&self.v4, u32::from(ip)),
            IpAddr::V6(ip) => range_contains(&self.v6, u128::from(ip)),
        }
    }

    pub fn v4_ranges(&self) -> usize {
        self.v4.len()
    }

    pub fn v6_ranges(&self) -> usize {
        self.v6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }
}

impl DomesticRange for ChnRouteSet {
    fn contains(&self, addr: IpAddr) -> bool {
        self.contains_ip(addr)
    }
}

/// Parses `(line_number, text)` pairs into networks.
pub fn parse_cidrs<'a>(
    source_name: &str,
    cidrs: impl IntoIterator<Item = (usize, &'a str)>,
) -> Result<Vec<IpNetwork>, ChnRouteError> {
    cidrs
        .into_iter()
        .map(|(line, value)| {
            value
                .parse::<IpNetwork>()
                .map_err(|e| ChnRouteError::InvalidCidr {
                    source_name: source_name.to_string(),
                    line,
                    value: value.to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

fn merge_ranges<T: Ord + Copy>(mut ranges: Vec<(T, T)>, succ: impl Fn(T) -> Option<T>) -> Vec<(T, T)> {
    ranges.sort_unstable();
    let mut merged: Vec<(T, T)> = Vec::with_capacity(ranges.len());

    for (start, end) in ranges {
        if let Some(last) = merged.last_mut() {
            let adjacent = succ(last.1).is_some_and(|next| start <= next);
            if start <= last.1 || adjacent {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

fn range_contains<T: Ord + Copy>(ranges: &[(T, T)], value: T) -> bool {
    let idx = ranges.partition_point(|&(start, _)| start <= value);
    idx > 0 && ranges[idx - 1].1 >= value
}
