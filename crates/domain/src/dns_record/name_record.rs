use super::RecordType;
use std::fmt;

/// Record type codes stored by the NNS contract. The contract reuses DNS type
/// numbers; codes this server has no rule for are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NnsRecordType {
    A,
    Cname,
    Soa,
    Txt,
    Aaaa,
    Other(u8),
}

impl NnsRecordType {
    pub fn from_byte(code: u8) -> Self {
        match code {
            1 => NnsRecordType::A,
            5 => NnsRecordType::Cname,
            6 => NnsRecordType::Soa,
            16 => NnsRecordType::Txt,
            28 => NnsRecordType::Aaaa,
            other => NnsRecordType::Other(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            NnsRecordType::A => 1,
            NnsRecordType::Cname => 5,
            NnsRecordType::Soa => 6,
            NnsRecordType::Txt => 16,
            NnsRecordType::Aaaa => 28,
            NnsRecordType::Other(code) => code,
        }
    }

    pub fn to_dns(self) -> Option<RecordType> {
        RecordType::from_u16(u16::from(self.to_byte()))
    }

    /// NNS type to ask the contract for when answering a DNS question.
    pub fn for_query(record_type: RecordType) -> Option<Self> {
        match record_type {
            RecordType::A => Some(NnsRecordType::A),
            RecordType::AAAA => Some(NnsRecordType::Aaaa),
            RecordType::CNAME => Some(NnsRecordType::Cname),
            RecordType::TXT => Some(NnsRecordType::Txt),
            RecordType::SOA => Some(NnsRecordType::Soa),
            _ => None,
        }
    }
}

impl fmt::Display for NnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_dns() {
            Some(rt) => write!(f, "{}", rt),
            None => write!(f, "TYPE{}", self.to_byte()),
        }
    }
}

/// One `(name, type, data)` entry decoded from a contract reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub name: String,
    pub record_type: NnsRecordType,
    pub data: String,
}

impl NameRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: NnsRecordType,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            data: data.into(),
        }
    }

    pub fn is_soa(&self) -> bool {
        self.record_type == NnsRecordType::Soa
    }

    /// Same record with its name terminated by the root label.
    pub fn rooted(mut self) -> Self {
        self.name = append_root(&self.name);
        self
    }
}

/// Appends the root separator unless the name is empty or already rooted.
pub fn append_root(name: &str) -> String {
    if name.is_empty() || name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}
