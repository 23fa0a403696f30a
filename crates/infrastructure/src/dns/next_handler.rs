use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use nns_dns_application::ports::{NextHandler, NextOutcome};
use nns_dns_domain::config::FallbackCode;
use nns_dns_domain::DnsQuery;
use tracing::debug;

/// End of the handler chain: answers every unresolved query with one fixed
/// response code.
#[derive(Debug, Clone, Copy)]
pub struct StaticNextHandler {
    rcode: ResponseCode,
}

impl StaticNextHandler {
    pub fn new(rcode: ResponseCode) -> Self {
        Self { rcode }
    }

    pub fn from_fallback(fallback: FallbackCode) -> Self {
        Self::new(fallback_rcode(fallback))
    }

    pub fn rcode(&self) -> ResponseCode {
        self.rcode
    }
}

impl Default for StaticNextHandler {
    fn default() -> Self {
        Self::from_fallback(FallbackCode::default())
    }
}

#[async_trait]
impl NextHandler for StaticNextHandler {
    async fn handle_unresolved(&self, query: &DnsQuery) -> NextOutcome {
        debug!(name = %query.name, rcode = %self.rcode, "No next handler, answering with fallback code");
        NextOutcome::Rcode(self.rcode)
    }
}

pub fn fallback_rcode(fallback: FallbackCode) -> ResponseCode {
    match fallback {
        FallbackCode::Servfail => ResponseCode::ServFail,
        FallbackCode::Refused => ResponseCode::Refused,
        FallbackCode::Nxdomain => ResponseCode::NXDomain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nns_dns_domain::RecordType;

    #[test]
    fn test_fallback_codes() {
        assert_eq!(fallback_rcode(FallbackCode::Servfail), ResponseCode::ServFail);
        assert_eq!(fallback_rcode(FallbackCode::Refused), ResponseCode::Refused);
        assert_eq!(fallback_rcode(FallbackCode::Nxdomain), ResponseCode::NXDomain);
    }

    #[tokio::test]
    async fn test_default_answers_servfail() {
        let handler = StaticNextHandler::default();
        let outcome = handler
            .handle_unresolved(&DnsQuery::new("neo.org.", RecordType::A))
            .await;
        assert_eq!(outcome, NextOutcome::Rcode(ResponseCode::ServFail));
    }
}
