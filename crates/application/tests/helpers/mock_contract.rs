#![allow(dead_code)]
#![allow(unused_imports)]

use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use nns_dns_application::ports::{
    ContractInvoker, ContractParam, InvocationResult, NextHandler, NextOutcome,
};
use nns_dns_application::services::NnsContract;
use nns_dns_domain::{ContractHash, DnsQuery, DomainError, IteratorHandle, StackItem};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_CONTRACT: &str = "0x50ac1c37690cc2cfc594472833cf57505d5f46de";

pub fn test_hash() -> ContractHash {
    TEST_CONTRACT.parse().unwrap()
}

pub fn bytes(value: &str) -> StackItem {
    StackItem::ByteString(value.as_bytes().to_vec())
}

pub fn record_item(name: &str, record_type: i128, data: &str) -> StackItem {
    StackItem::Struct(vec![
        bytes(name),
        StackItem::Integer(record_type),
        bytes(data),
    ])
}

pub fn string_array(values: &[&str]) -> StackItem {
    StackItem::Array(values.iter().map(|v| bytes(v)).collect())
}

pub fn iterator_item(id: &str) -> StackItem {
    StackItem::InteropInterface(IteratorHandle {
        id: Some(id.to_string()),
        values: Vec::new(),
        truncated: false,
    })
}

pub fn inline_iterator(values: Vec<StackItem>, truncated: bool) -> StackItem {
    StackItem::InteropInterface(IteratorHandle {
        id: None,
        values,
        truncated,
    })
}

pub fn faulted(exception: &str) -> InvocationResult {
    InvocationResult {
        state: "FAULT".to_string(),
        exception: Some(exception.to_string()),
        stack: Vec::new(),
        session: None,
    }
}

/// Invoker answering from scripted replies keyed by operation and the first
/// string argument.
#[derive(Default)]
pub struct MockContractInvoker {
    replies: Mutex<HashMap<(String, String), Result<InvocationResult, DomainError>>>,
    iterators: Mutex<HashMap<String, Vec<StackItem>>>,
    calls: Mutex<Vec<(String, Vec<ContractParam>)>>,
    requested_counts: Mutex<Vec<usize>>,
    batch_sizes: Mutex<Vec<usize>>,
}

impl MockContractInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, operation: &str, name: &str, reply: InvocationResult) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert((operation.to_string(), name.to_string()), Ok(reply));
        self
    }

    pub fn with_error(self, operation: &str, name: &str, error: DomainError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert((operation.to_string(), name.to_string()), Err(error));
        self
    }

    pub fn with_stack(self, operation: &str, name: &str, top: StackItem) -> Self {
        self.with_reply(operation, name, InvocationResult::halt(vec![top]))
    }

    /// Scripts `getAllRecords(name)` to return a session iterator over `items`.
    pub fn with_all_records(self, name: &str, items: Vec<StackItem>) -> Self {
        let iterator_id = format!("iter-{}", name);
        self.iterators
            .lock()
            .unwrap()
            .insert(iterator_id.clone(), items);
        let reply = InvocationResult::halt(vec![iterator_item(&iterator_id)])
            .with_session(format!("session-{}", name));
        self.with_reply("getAllRecords", name, reply)
    }

    pub fn calls(&self) -> Vec<(String, Vec<ContractParam>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<String> {
        self.calls().into_iter().map(|(op, _)| op).collect()
    }

    pub fn requested_counts(&self) -> Vec<usize> {
        self.requested_counts.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractInvoker for MockContractInvoker {
    async fn invoke_function(
        &self,
        _contract: &ContractHash,
        operation: &str,
        params: &[ContractParam],
    ) -> Result<InvocationResult, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), params.to_vec()));

        let name = match params.first() {
            Some(ContractParam::String(name)) => name.clone(),
            _ => String::new(),
        };

        self.replies
            .lock()
            .unwrap()
            .get(&(operation.to_string(), name.clone()))
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::Transport(format!(
                    "no reply scripted for {}({})",
                    operation, name
                )))
            })
    }

    async fn traverse_iterator(
        &self,
        _session: &str,
        iterator_id: &str,
        count: usize,
    ) -> Result<Vec<StackItem>, DomainError> {
        self.requested_counts.lock().unwrap().push(count);

        let mut iterators = self.iterators.lock().unwrap();
        let remaining = iterators
            .get_mut(iterator_id)
            .ok_or_else(|| DomainError::Transport(format!("unknown iterator {}", iterator_id)))?;
        let take = count.min(remaining.len());
        let batch: Vec<StackItem> = remaining.drain(..take).collect();

        self.batch_sizes.lock().unwrap().push(batch.len());
        Ok(batch)
    }
}

/// Next handler answering with a fixed rcode and counting how often it ran.
pub struct RecordingNextHandler {
    rcode: ResponseCode,
    seen: Mutex<Vec<String>>,
}

impl RecordingNextHandler {
    pub fn new(rcode: ResponseCode) -> Self {
        Self {
            rcode,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl NextHandler for RecordingNextHandler {
    async fn handle_unresolved(&self, query: &DnsQuery) -> NextOutcome {
        self.seen.lock().unwrap().push(query.name.to_string());
        NextOutcome::Rcode(self.rcode)
    }
}

pub fn contract_with(invoker: Arc<MockContractInvoker>) -> Arc<NnsContract> {
    Arc::new(NnsContract::new(invoker, test_hash()))
}
