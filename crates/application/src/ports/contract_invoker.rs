use async_trait::async_trait;
use nns_dns_domain::{ContractHash, DomainError, StackItem};

/// VM state reported for a successful invocation.
pub const VM_STATE_HALT: &str = "HALT";

/// Typed argument of a contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractParam {
    String(String),
    Integer(i64),
}

/// Raw reply of a read-only contract invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    pub state: String,
    pub exception: Option<String>,
    /// Result stack; the top of the stack is the last element.
    pub stack: Vec<StackItem>,
    /// Session holding iterators returned on the stack, if any.
    pub session: Option<String>,
}

impl InvocationResult {
    pub fn halt(stack: Vec<StackItem>) -> Self {
        Self {
            state: VM_STATE_HALT.to_string(),
            exception: None,
            stack,
            session: None,
        }
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn is_halt(&self) -> bool {
        self.state == VM_STATE_HALT
    }
}

/// Transport to a node able to run contract code without persisting it.
///
/// Errors returned here are transport faults: the core surfaces them as is
/// and never retries.
#[async_trait]
pub trait ContractInvoker: Send + Sync {
    async fn invoke_function(
        &self,
        contract: &ContractHash,
        operation: &str,
        params: &[ContractParam],
    ) -> Result<InvocationResult, DomainError>;

    /// Reads at most `count` items from an iterator of an open session.
    async fn traverse_iterator(
        &self,
        session: &str,
        iterator_id: &str,
        count: usize,
    ) -> Result<Vec<StackItem>, DomainError>;
}
