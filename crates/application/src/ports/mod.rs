mod contract_invoker;
mod next_handler;

pub use contract_invoker::{ContractInvoker, ContractParam, InvocationResult, VM_STATE_HALT};
pub use next_handler::{NextHandler, NextOutcome};

// Re-export for convenience
pub use nns_dns_domain::{DnsQuery, StackItem};
