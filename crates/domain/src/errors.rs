use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("RPC transport error: {0}")]
    Transport(String),

    #[error("Invocation failed: {0}")]
    Invocation(String),

    #[error("Result stack is empty")]
    EmptyStack,

    #[error("Bad conversion: {0}")]
    Conversion(String),

    #[error("Invalid NNS record type: {0}")]
    InvalidType(String),

    #[error("Invalid response struct: expected 3 fields, got {0}")]
    MalformedRecord(usize),

    #[error("Invalid domain name: {0}")]
    InvalidName(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedType(String),

    #[error("Invalid {record_type} record data: {value}")]
    InvalidRecordData { record_type: String, value: String },

    #[error("Records must not be empty")]
    EmptyZone,

    #[error("Invalid number of SOA records: {0}")]
    SoaCount(usize),

    #[error("Invalid SOA record, mismatched names: {record} {primary}")]
    SoaMismatch { record: String, primary: String },

    #[error("Invalid SOA record: {0}")]
    SoaFieldCount(String),

    #[error("Invalid SOA record, invalid serial: {0}")]
    SoaSerial(String),

    #[error("Invalid SOA record, invalid {field}: {value}")]
    SoaField { field: &'static str, value: String },

    #[error("Invalid type for SOA record: {0}")]
    NotSoaRecord(String),

    #[error("Not authoritative for zone {0}")]
    NotAuthoritative(String),

    #[error("Invalid NNS contract address: {0}")]
    InvalidContractHash(String),
}
