use nns_dns_domain::config::{ContractSource, RpcConfig};
use nns_dns_domain::ContractHash;
use nns_dns_infrastructure::rpc::NeoRpcClient;
use std::time::Duration;
use tracing::{error, info};

pub fn build_rpc_client(endpoint: &str, timeout: Duration) -> anyhow::Result<NeoRpcClient> {
    info!(endpoint = %endpoint, timeout_secs = timeout.as_secs(), "Connecting to Neo RPC node");
    Ok(NeoRpcClient::new(endpoint, timeout)?)
}

/// Finds the NNS contract on the node. A configured hash must match a
/// deployed contract; otherwise the hash is looked up by well-known id.
pub async fn resolve_contract(
    client: &NeoRpcClient,
    rpc: &RpcConfig,
) -> anyhow::Result<ContractHash> {
    let source = rpc.contract_source()?;

    let hash = client.get_contract_hash(&source).await.map_err(|e| {
        error!(endpoint = %client.endpoint(), error = %e, "Failed to get NNS contract state");
        anyhow::anyhow!(e)
    })?;

    match source {
        ContractSource::Hash(expected) if expected != hash => {
            anyhow::bail!(
                "contract state hash {} does not match configured contract {}",
                hash,
                expected
            );
        }
        ContractSource::Hash(_) => info!(contract = %hash, "NNS contract verified"),
        ContractSource::WellKnownId(id) => {
            info!(contract = %hash, id, "NNS contract resolved by id")
        }
    }

    Ok(hash)
}
