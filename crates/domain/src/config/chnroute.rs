use serde::{Deserialize, Serialize};

/// Where the domestic address lists are loaded from. Each file holds one
/// CIDR per line; blank lines and `#` comments are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChnRouteConfig {
    #[serde(default)]
    pub ipv4_file: Option<String>,

    #[serde(default)]
    pub ipv6_file: Option<String>,
}

impl ChnRouteConfig {
    pub fn is_configured(&self) -> bool {
        self.ipv4_file.is_some() || self.ipv6_file.is_some()
    }
}
