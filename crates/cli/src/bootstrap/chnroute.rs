use chnroute_dns_domain::config::ChnRouteConfig;
use chnroute_dns_domain::ChnRouteSet;
use chnroute_dns_infrastructure::chnroute::load_route_set;
use tracing::{error, warn};

pub fn load_chnroute(config: &ChnRouteConfig) -> anyhow::Result<ChnRouteSet> {
    if !config.is_configured() {
        warn!("No chnroute list configured, every address will be reported as not domestic");
        return Ok(ChnRouteSet::default());
    }

    load_route_set(config).map_err(|e| {
        error!("Failed to load chnroute list: {}", e);
        anyhow::anyhow!(e)
    })
}
