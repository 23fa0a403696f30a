use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::mapping::MappingConfig;
use super::resolution::ResolutionConfig;
use super::rpc::RpcConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "nns-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/nns-dns/config.toml";

/// Main configuration structure for NNS DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// DNS listener configuration (port, bind address, fallback)
    #[serde(default)]
    pub server: ServerConfig,

    /// Neo node and NNS contract
    #[serde(default)]
    pub rpc: RpcConfig,

    /// DNS zone to NNS domain mapping
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Answer policy
    #[serde(default)]
    pub resolution: ResolutionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. nns-dns.toml in current directory
    /// 3. /etc/nns-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(endpoint) = overrides.endpoint {
            self.rpc.endpoint = endpoint;
        }
        if let Some(contract) = overrides.contract {
            self.rpc.contract = contract;
        }
        if let Some(domain) = overrides.nns_domain {
            self.mapping.nns_domain = domain;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.workers == 0 {
            return Err(ConfigError::Validation(
                "At least one DNS worker is required".to_string(),
            ));
        }

        self.rpc
            .validate_endpoint()
            .map_err(ConfigError::Validation)?;

        self.rpc
            .contract_source()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.resolution.iterator_page_size == 0 {
            return Err(ConfigError::Validation(
                "Iterator page size must be at least 1".to_string(),
            ));
        }

        if self.resolution.gateway_host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Gateway host cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub endpoint: Option<String>,
    pub contract: Option<String>,
    pub nns_domain: Option<String>,
    pub log_level: Option<String>,
}
