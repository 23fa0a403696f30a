use super::stack_decoder;
use crate::ports::{ContractInvoker, ContractParam, InvocationResult};
use nns_dns_domain::config::DEFAULT_ITERATOR_PAGE_SIZE;
use nns_dns_domain::{ContractHash, DomainError, NameRecord, NnsRecordType};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Read-only functions of the NNS contract used for resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFunction {
    Resolve,
    GetAllRecords,
    GetRecords,
    GetRecord,
}

impl ContractFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractFunction::Resolve => "resolve",
            ContractFunction::GetAllRecords => "getAllRecords",
            ContractFunction::GetRecords => "getRecords",
            ContractFunction::GetRecord => "getRecord",
        }
    }
}

impl fmt::Display for ContractFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client for one deployed NNS contract.
///
/// Shared between concurrent queries and transfers; every call is a
/// self-contained request and pagination state lives on the call stack.
pub struct NnsContract {
    invoker: Arc<dyn ContractInvoker>,
    hash: ContractHash,
    page_size: usize,
}

impl NnsContract {
    pub fn new(invoker: Arc<dyn ContractInvoker>, hash: ContractHash) -> Self {
        Self {
            invoker,
            hash,
            page_size: DEFAULT_ITERATOR_PAGE_SIZE,
        }
    }

    /// Overrides the number of iterator items fetched per round-trip.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn hash(&self) -> &ContractHash {
        &self.hash
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Invokes `function` and rejects faulted or empty replies.
    pub async fn invoke(
        &self,
        function: ContractFunction,
        params: &[ContractParam],
    ) -> Result<InvocationResult, DomainError> {
        debug!(contract = %self.hash, function = %function, "Invoking contract");

        let result = self
            .invoker
            .invoke_function(&self.hash, function.as_str(), params)
            .await?;

        if !result.is_halt() {
            return Err(DomainError::Invocation(
                result
                    .exception
                    .unwrap_or_else(|| format!("VM state {}", result.state)),
            ));
        }
        if result.stack.is_empty() {
            return Err(DomainError::EmptyStack);
        }

        Ok(result)
    }

    pub async fn resolve(
        &self,
        name: &str,
        record_type: NnsRecordType,
    ) -> Result<String, DomainError> {
        let result = self
            .invoke(ContractFunction::Resolve, &typed_params(name, record_type))
            .await?;
        stack_decoder::decode_string(&result.stack)
    }

    pub async fn get_record(
        &self,
        name: &str,
        record_type: NnsRecordType,
    ) -> Result<Vec<String>, DomainError> {
        let result = self
            .invoke(ContractFunction::GetRecord, &typed_params(name, record_type))
            .await?;
        stack_decoder::decode_string_array(&result.stack)
    }

    pub async fn get_records(
        &self,
        name: &str,
        record_type: NnsRecordType,
    ) -> Result<Vec<String>, DomainError> {
        let result = self
            .invoke(ContractFunction::GetRecords, &typed_params(name, record_type))
            .await?;
        stack_decoder::decode_string_array(&result.stack)
    }

    pub async fn get_all_records(&self, name: &str) -> Result<Vec<NameRecord>, DomainError> {
        let params = [ContractParam::String(name.to_string())];
        let result = self.invoke(ContractFunction::GetAllRecords, &params).await?;

        stack_decoder::decode_record_iterator(
            &result.stack,
            result.session.as_deref(),
            self.invoker.as_ref(),
            self.page_size,
        )
        .await
    }
}

fn typed_params(name: &str, record_type: NnsRecordType) -> [ContractParam; 2] {
    [
        ContractParam::String(name.to_string()),
        ContractParam::Integer(i64::from(record_type.to_byte())),
    ]
}
