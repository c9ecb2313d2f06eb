mod chnroute;
mod config;
mod logging;

pub use chnroute::load_chnroute;
pub use config::load_config;
pub use logging::init_logging;
