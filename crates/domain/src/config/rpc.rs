use crate::{ContractHash, DomainError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::Url;

/// Marker for "look the contract up by its well-known id".
const DISCOVER_MARKER: &str = "-";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RpcConfig {
    /// Neo node JSON-RPC endpoint; scheme and port are mandatory.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Contract script hash, or `-` to resolve it from `contract_id`.
    #[serde(default = "default_contract")]
    pub contract: String,

    #[serde(default = "default_contract_id")]
    pub contract_id: i32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Where the NNS contract hash comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractSource {
    Hash(ContractHash),
    WellKnownId(i32),
}

impl RpcConfig {
    pub fn contract_source(&self) -> Result<ContractSource, DomainError> {
        let contract = self.contract.trim();
        if contract.is_empty() || contract == DISCOVER_MARKER {
            return Ok(ContractSource::WellKnownId(self.contract_id));
        }
        let hash = ContractHash::from_str(contract)?;
        if hash.is_zero() {
            return Ok(ContractSource::WellKnownId(self.contract_id));
        }
        Ok(ContractSource::Hash(hash))
    }

    /// Checks `scheme://host:port[/path]`. The port must be spelled out.
    pub fn validate_endpoint(&self) -> Result<(), String> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| format!("invalid endpoint {}: {}", self.endpoint, e))?;

        if url.scheme().is_empty() || url.host_str().map_or(true, str::is_empty) {
            return Err(format!("invalid endpoint: {}", self.endpoint));
        }
        if url.port().is_none() {
            return Err(format!("endpoint {} has no port", self.endpoint));
        }
        Ok(())
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            contract: default_contract(),
            contract_id: default_contract_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:30333".to_string()
}

fn default_contract() -> String {
    DISCOVER_MARKER.to_string()
}

fn default_contract_id() -> i32 {
    1
}

fn default_timeout_secs() -> u64 {
    10
}
