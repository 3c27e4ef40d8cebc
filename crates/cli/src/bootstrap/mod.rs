mod config;
mod logging;

pub use config::{listener_port, load_config, log_config};
pub use logging::init_logging;
