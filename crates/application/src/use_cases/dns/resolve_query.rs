use crate::ports::{NextHandler, NextOutcome};
use crate::services::{synthesize, NnsContract, RecordHeader, ResolutionPolicy};
use hickory_proto::rr::{DNSClass, Record};
use nns_dns_domain::config::ResolutionMode;
use nns_dns_domain::{DnsQuery, DomainError, DomainMapping, NnsRecordType};
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_ANSWER_TTL: u32 = 3600;

/// Result of handling one question.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The contract produced the answer.
    Answered(Vec<Record>),
    /// The contract had nothing; the next handler decided.
    Deferred(NextOutcome),
}

pub struct ResolveQueryUseCase {
    contract: Arc<NnsContract>,
    mapping: DomainMapping,
    policy: ResolutionPolicy,
    mode: ResolutionMode,
    answer_ttl: u32,
    next: Arc<dyn NextHandler>,
}

impl ResolveQueryUseCase {
    pub fn new(
        contract: Arc<NnsContract>,
        mapping: DomainMapping,
        policy: ResolutionPolicy,
        next: Arc<dyn NextHandler>,
    ) -> Self {
        Self {
            contract,
            mapping,
            policy,
            mode: ResolutionMode::default(),
            answer_ttl: DEFAULT_ANSWER_TTL,
            next,
        }
    }

    pub fn with_mode(mut self, mode: ResolutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_answer_ttl(mut self, ttl: u32) -> Self {
        self.answer_ttl = ttl;
        self
    }

    /// Answers from the contract, falling through to the next handler when
    /// resolution fails or produces nothing.
    pub async fn execute(&self, query: &DnsQuery) -> QueryOutcome {
        debug!(name = %query.name, record_type = %query.record_type, "Resolving query");

        match self.answer(query).await {
            Ok(records) if !records.is_empty() => {
                debug!(name = %query.name, answers = records.len(), "Query answered");
                QueryOutcome::Answered(records)
            }
            Ok(_) => {
                debug!(name = %query.name, record_type = %query.record_type, "No records for query");
                QueryOutcome::Deferred(self.next.handle_unresolved(query).await)
            }
            Err(e) => {
                warn!(
                    name = %query.name,
                    record_type = %query.record_type,
                    mapped = %self.mapping.map_name(&query.name),
                    error = %e,
                    "Cannot resolve query"
                );
                QueryOutcome::Deferred(self.next.handle_unresolved(query).await)
            }
        }
    }

    /// Records for `query`; an empty list means the contract holds nothing
    /// suitable.
    pub async fn answer(&self, query: &DnsQuery) -> Result<Vec<Record>, DomainError> {
        if !query.record_type.is_synthesizable() {
            return Err(DomainError::UnsupportedType(query.record_type.to_string()));
        }

        let mapped = self.mapping.map_name(&query.name);
        let name = self.policy.contract_name(&mapped, query.record_type);
        let header = RecordHeader::parse(
            &query.name,
            DNSClass::from(query.dns_class),
            self.answer_ttl,
        )?;

        match self.mode {
            ResolutionMode::AllRecords => {
                let records = self.contract.get_all_records(name).await?;
                match self.policy.select(&records, query.record_type, &query.name) {
                    Some((record_type, value)) => {
                        Ok(vec![synthesize(&header, record_type, &value)?])
                    }
                    None => Ok(Vec::new()),
                }
            }
            ResolutionMode::Typed => {
                let nns_type = NnsRecordType::for_query(query.record_type)
                    .ok_or_else(|| DomainError::UnsupportedType(query.record_type.to_string()))?;
                let values = self.contract.get_records(name, nns_type).await?;
                values
                    .iter()
                    .map(|value| synthesize(&header, query.record_type, value))
                    .collect()
            }
        }
    }
}
