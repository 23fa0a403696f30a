use nns_dns_domain::{NameRecord, NnsRecordType, RecordType};

/// Answer chosen for a query: DNS type plus the value to synthesize.
pub type Selection = (RecordType, String);

/// Picks one answer out of every record stored for a name.
///
/// Records are scanned in the order the contract returned them and the first
/// A, CNAME, TXT or AAAA record wins. TXT records are content links: they are
/// served verbatim only to dnslink lookups, everyone else gets a CNAME to the
/// content gateway.
#[derive(Debug, Clone)]
pub struct ResolutionPolicy {
    gateway_host: String,
    dnslink_prefix: String,
}

impl ResolutionPolicy {
    pub fn new(gateway_host: impl Into<String>, dnslink_prefix: impl Into<String>) -> Self {
        Self {
            gateway_host: gateway_host.into(),
            dnslink_prefix: dnslink_prefix.into().to_lowercase(),
        }
    }

    pub fn gateway_host(&self) -> &str {
        &self.gateway_host
    }

    pub fn is_dnslink_name(&self, name: &str) -> bool {
        !self.dnslink_prefix.is_empty() && name.to_lowercase().starts_with(&self.dnslink_prefix)
    }

    /// Name to look up in the contract. Content records live under the bare
    /// name, so TXT lookups drop the dnslink prefix.
    pub fn contract_name<'a>(&self, mapped: &'a str, query_type: RecordType) -> &'a str {
        if query_type == RecordType::TXT && !self.dnslink_prefix.is_empty() {
            mapped.strip_prefix(self.dnslink_prefix.as_str()).unwrap_or(mapped)
        } else {
            mapped
        }
    }

    /// `query_name` is the question name before mapping.
    pub fn select(
        &self,
        records: &[NameRecord],
        query_type: RecordType,
        query_name: &str,
    ) -> Option<Selection> {
        records.iter().find_map(|record| match record.record_type {
            NnsRecordType::A => Some((RecordType::A, record.data.clone())),
            NnsRecordType::Cname => Some((RecordType::CNAME, record.data.clone())),
            NnsRecordType::Txt => {
                if query_type == RecordType::TXT && self.is_dnslink_name(query_name) {
                    Some((RecordType::TXT, record.data.clone()))
                } else {
                    Some((RecordType::CNAME, self.gateway_host.clone()))
                }
            }
            NnsRecordType::Aaaa => Some((RecordType::AAAA, record.data.clone())),
            NnsRecordType::Soa | NnsRecordType::Other(_) => None,
        })
    }
}
