use chnroute_dns_domain::chnroute::parse_cidrs;
use chnroute_dns_domain::config::ChnRouteConfig;
use chnroute_dns_domain::{ChnRouteError, ChnRouteSet};
use ipnetwork::IpNetwork;
use std::path::Path;
use tracing::info;

/// Parses a route list: one CIDR per line, `#` starts a comment.
pub fn parse_route_list(source_name: &str, contents: &str) -> Result<Vec<IpNetwork>, ChnRouteError> {
    let entries = contents
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, strip_comment(line)))
        .filter(|(_, line)| !line.is_empty());

    parse_cidrs(source_name, entries)
}

pub fn load_file(path: &Path) -> Result<Vec<IpNetwork>, ChnRouteError> {
    let name = path.display().to_string();
    let contents =
        std::fs::read_to_string(path).map_err(|e| ChnRouteError::FileRead(name.clone(), e.to_string()))?;

    let networks = parse_route_list(&name, &contents)?;
    info!(path = %name, entries = networks.len(), "Loaded chnroute list");
    Ok(networks)
}

/// Builds the domestic set from every list the configuration names.
pub fn load_route_set(config: &ChnRouteConfig) -> Result<ChnRouteSet, ChnRouteError> {
    let mut set = ChnRouteSet::default();

    for path in [&config.ipv4_file, &config.ipv6_file].into_iter().flatten() {
        set.extend(load_file(Path::new(path))?);
    }

    info!(
        v4_ranges = set.v4_ranges(),
        v6_ranges = set.v6_ranges(),
        "Domestic route set ready"
    );
    Ok(set)
}

fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or_default().trim()
}
