//! NNS DNS Domain Layer
pub mod config;
pub mod contract_hash;
pub mod dns_query;
pub mod dns_record;
pub mod domain_mapping;
pub mod errors;
pub mod soa;
pub mod stack_item;

pub use config::{CliOverrides, Config, ConfigError};
pub use contract_hash::ContractHash;
pub use dns_query::{DnsQuery, DNS_CLASS_IN};
pub use dns_record::{append_root, NameRecord, NnsRecordType, RecordType};
pub use domain_mapping::DomainMapping;
pub use errors::DomainError;
pub use soa::SoaFields;
pub use stack_item::{IteratorHandle, StackItem};
