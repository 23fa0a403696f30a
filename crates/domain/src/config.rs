pub mod errors;
pub mod logging;
pub mod mapping;
pub mod resolution;
pub mod root;
pub mod rpc;
pub mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use mapping::MappingConfig;
pub use resolution::{ResolutionConfig, ResolutionMode, DEFAULT_ITERATOR_PAGE_SIZE};
pub use root::{CliOverrides, Config};
pub use rpc::{ContractSource, RpcConfig};
pub use server::{FallbackCode, ServerConfig};
