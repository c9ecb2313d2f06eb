use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InspectConfig {
    /// Decode the question name while validating.
    #[serde(default = "default_true")]
    pub decode_names: bool,

    /// Treat a reply without any A/AAAA answer as domestic when reporting
    /// the accept/filter verdict.
    #[serde(default)]
    pub noip_as_chnip: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            decode_names: true,
            noip_as_chnip: false,
        }
    }
}

fn default_true() -> bool {
    true
}
