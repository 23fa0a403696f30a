use serde::{Deserialize, Serialize};

/// Response code sent when a query cannot be answered from the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FallbackCode {
    #[default]
    Servfail,
    Refused,
    Nxdomain,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Number of UDP sockets bound to the same address with SO_REUSEPORT.
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default)]
    pub fallback: FallbackCode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            workers: default_workers(),
            fallback: FallbackCode::default(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_workers() -> usize {
    1
}
