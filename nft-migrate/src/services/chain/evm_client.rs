use super::ChainReader;
use crate::helpers::abi;
use crate::helpers::address::ContractAddress;
use crate::interfaces::error::ChainError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// `ChainReader` talking JSON-RPC (`eth_call`) to an EVM-compatible node.
pub struct EvmChainReader {
    client: Client,
    endpoint: String,
    contract: ContractAddress,
    next_id: AtomicU64,
}

impl EvmChainReader {
    /// Builds the reader and checks the node answers `eth_chainId`.
    pub async fn connect(endpoint: &str, contract: ContractAddress) -> Result<Self, ChainError> {
        let reader = Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            contract,
            next_id: AtomicU64::new(1),
        };

        let chain_id = reader
            .request("eth_chainId", json!([]))
            .await
            .map_err(|e| ChainError::Unreachable(format!("{}: {}", endpoint, e)))?;

        info!(
            "Connected to Ethereum node at {} (chain id {})",
            endpoint, chain_id
        );
        Ok(reader)
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RpcRequest {
                jsonrpc: "2.0",
                id,
                method,
                params,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChainError::Status(response.status().as_u16()));
        }

        let body: RpcResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(ChainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        body.result.ok_or_else(|| {
            ChainError::Decode(format!("{} response has neither result nor error", method))
        })
    }

    async fn call(&self, data: String) -> Result<Vec<u8>, ChainError> {
        let result = self
            .request(
                "eth_call",
                json!([{ "to": self.contract.to_checksum(), "data": data }, "latest"]),
            )
            .await?;

        let payload = result
            .as_str()
            .ok_or_else(|| ChainError::Decode(format!("eth_call returned {}", result)))?;
        abi::decode_hex(payload)
    }
}

#[async_trait]
impl ChainReader for EvmChainReader {
    async fn total_supply(&self) -> Result<u64, ChainError> {
        let data = self.call(abi::encode_total_supply_call()).await?;
        let supply = abi::decode_uint256(&data)?;
        debug!("totalSupply() of {} = {}", self.contract, supply);
        Ok(supply)
    }

    async fn token_uri(&self, token_id: u64) -> Result<String, ChainError> {
        let data = self.call(abi::encode_token_uri_call(token_id)).await?;
        abi::decode_string(&data)
    }
}
