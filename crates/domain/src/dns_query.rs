use super::RecordType;
use std::sync::Arc;

pub const DNS_CLASS_IN: u16 = 1;

/// A single DNS question as received from the wire.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    /// Question name, case preserved and root-terminated.
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub dns_class: u16,
}

impl DnsQuery {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            dns_class: DNS_CLASS_IN,
        }
    }

    pub fn with_class(mut self, dns_class: u16) -> Self {
        self.dns_class = dns_class;
        self
    }
}
