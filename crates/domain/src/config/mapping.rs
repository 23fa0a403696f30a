use crate::DomainMapping;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MappingConfig {
    /// Zone served over DNS, e.g. `containers.testnet.fs.neo.org`.
    #[serde(default)]
    pub dns_domain: String,

    /// Domain substituted for `dns_domain` when querying the contract.
    #[serde(default)]
    pub nns_domain: String,

    #[serde(default)]
    pub strip_suffix: String,
}

impl MappingConfig {
    pub fn to_mapping(&self) -> DomainMapping {
        DomainMapping::new(&self.dns_domain, &self.nns_domain).with_strip_suffix(&self.strip_suffix)
    }
}
