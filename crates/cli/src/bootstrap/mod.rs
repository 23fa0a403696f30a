mod config;
mod contract;
mod logging;

pub use config::load_config;
pub use contract::{build_rpc_client, resolve_contract};
pub use logging::init_logging;
