use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::Record;
use nns_dns_domain::DnsQuery;

/// What the next handler in the chain decided for a query.
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    Answer(Vec<Record>),
    Rcode(ResponseCode),
}

/// Handler consulted when the contract has no answer for a query.
#[async_trait]
pub trait NextHandler: Send + Sync {
    async fn handle_unresolved(&self, query: &DnsQuery) -> NextOutcome;
}
