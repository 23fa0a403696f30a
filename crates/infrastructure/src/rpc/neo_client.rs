use super::stack_json::{
    param_to_json, parse_stack, ContractStateDto, InvokeResultDto, StackItemDto,
};
use async_trait::async_trait;
use nns_dns_application::ports::{ContractInvoker, ContractParam, InvocationResult};
use nns_dns_domain::config::ContractSource;
use nns_dns_domain::{ContractHash, DomainError, StackItem};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// JSON-RPC 2.0 client for a Neo N3 node.
///
/// Every failure below the contract level (HTTP, JSON-RPC error objects,
/// undecodable bodies) is reported as `DomainError::Transport`.
pub struct NeoRpcClient {
    client: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl NeoRpcClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::Transport(format!("failed to build RPC client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, DomainError> {
        let body = request_body(self.next_id.fetch_add(1, Ordering::Relaxed), method, params);
        debug!(endpoint = %self.endpoint, method, "Sending RPC request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::Transport(format!("{} request to {} failed: {}", method, self.endpoint, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Transport(format!(
                "{} returned HTTP {}: {}",
                self.endpoint,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let reply: RpcResponse<T> = response.json().await.map_err(|e| {
            DomainError::Transport(format!("invalid {} response from {}: {}", method, self.endpoint, e))
        })?;

        unwrap_response(method, reply)
    }

    /// Looks up a deployed contract and returns its script hash.
    pub async fn get_contract_hash(
        &self,
        source: &ContractSource,
    ) -> Result<ContractHash, DomainError> {
        let param = match source {
            ContractSource::WellKnownId(id) => json!(id),
            ContractSource::Hash(hash) => json!(hash.to_string()),
        };
        let state: ContractStateDto = self.call("getcontractstate", json!([param])).await?;
        debug!(id = state.id, hash = %state.hash, "Contract state received");
        ContractHash::try_from(state)
    }
}

fn request_body(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

fn unwrap_response<T>(method: &str, reply: RpcResponse<T>) -> Result<T, DomainError> {
    if let Some(error) = reply.error {
        let detail = match error.data {
            Some(Value::String(data)) if !data.is_empty() => format!(" ({})", data),
            _ => String::new(),
        };
        return Err(DomainError::Transport(format!(
            "{} failed with RPC error {}: {}{}",
            method, error.code, error.message, detail
        )));
    }
    reply
        .result
        .ok_or_else(|| DomainError::Transport(format!("{} response has no result", method)))
}

#[async_trait]
impl ContractInvoker for NeoRpcClient {
    async fn invoke_function(
        &self,
        contract: &ContractHash,
        operation: &str,
        params: &[ContractParam],
    ) -> Result<InvocationResult, DomainError> {
        let args: Vec<Value> = params.iter().map(param_to_json).collect();
        let result: InvokeResultDto = self
            .call(
                "invokefunction",
                json!([contract.to_string(), operation, args]),
            )
            .await?;
        InvocationResult::try_from(result)
    }

    async fn traverse_iterator(
        &self,
        session: &str,
        iterator_id: &str,
        count: usize,
    ) -> Result<Vec<StackItem>, DomainError> {
        let items: Vec<StackItemDto> = self
            .call("traverseiterator", json!([session, iterator_id, count]))
            .await?;
        parse_stack(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let body = request_body(7, "traverseiterator", json!(["s", "i", 10]));
        assert_eq!(
            body,
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "traverseiterator",
                "params": ["s", "i", 10]
            })
        );
    }

    #[test]
    fn test_rpc_error_is_transport_error() {
        let reply: RpcResponse<Value> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -100, "message": "Unknown contract", "data": "no such id"}
        }))
        .unwrap();

        assert_eq!(
            unwrap_response("getcontractstate", reply),
            Err(DomainError::Transport(
                "getcontractstate failed with RPC error -100: Unknown contract (no such id)"
                    .to_string()
            ))
        );
    }

    #[test]
    fn test_missing_result_is_transport_error() {
        let reply: RpcResponse<Value> =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1})).unwrap();
        assert!(matches!(
            unwrap_response("invokefunction", reply),
            Err(DomainError::Transport(_))
        ));
    }

    #[test]
    fn test_result_is_returned() {
        let reply: RpcResponse<ContractStateDto> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "id": 1,
                "updatecounter": 0,
                "hash": "0x50ac1c37690cc2cfc594472833cf57505d5f46de",
                "manifest": {"name": "NameService"}
            }
        }))
        .unwrap();

        let state = unwrap_response("getcontractstate", reply).unwrap();
        let hash = ContractHash::try_from(state).unwrap();
        assert_eq!(hash.to_string(), "0x50ac1c37690cc2cfc594472833cf57505d5f46de");
    }
}
