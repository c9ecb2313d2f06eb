pub mod chnroute;
pub mod errors;
pub mod inspect;
pub mod logging;
pub mod root;

pub use chnroute::ChnRouteConfig;
pub use errors::ConfigError;
pub use inspect::InspectConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
