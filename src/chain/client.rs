//! Chain RPC client with timeouts and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint
//! - Query chain state (block number, balances, nonces, gas, receipts)
//! - Execute read-only contract calls
//! - Submit signed transaction envelopes

use std::sync::Arc;
use std::time::Duration;

use alloy::consensus::TxEnvelope;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use tokio::time::timeout;

use crate::config::ChainConfig;
use crate::error::{ClientError, Result};

/// Chain RPC client wrapper.
#[derive(Clone)]
pub struct ChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    config: ChainConfig,
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a new chain client and verify the endpoint's chain ID.
    ///
    /// Chain verification failure is logged but does not fail construction,
    /// so the client can be built while the endpoint is unreachable.
    pub async fn connect(config: ChainConfig) -> Result<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);

        let rpc_url: url::Url = config
            .rpc_url
            .parse()
            .map_err(|e| ClientError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e)))?;
        let provider: Arc<dyn Provider + Send + Sync> =
            Arc::new(ProviderBuilder::new().connect_http(rpc_url));

        let client = Self {
            provider,
            config: config.clone(),
            timeout_duration,
        };

        match client.chain_id().await {
            Ok(chain_id) if chain_id == config.chain_id => {
                tracing::info!(
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    "Chain client initialized"
                );
            }
            Ok(chain_id) => {
                tracing::warn!(
                    expected = config.chain_id,
                    actual = chain_id,
                    "Chain ID mismatch; transactions may be rejected"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Chain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Get the chain ID from the RPC endpoint.
    pub async fn chain_id(&self) -> Result<u64> {
        match timeout(self.timeout_duration, self.provider.get_chain_id()).await {
            Ok(Ok(id)) => Ok(id),
            Ok(Err(e)) => Err(ClientError::Rpc(format!("chain ID query failed: {}", e))),
            Err(_) => Err(ClientError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get the latest block number.
    pub async fn block_number(&self) -> Result<u64> {
        match timeout(self.timeout_duration, self.provider.get_block_number()).await {
            Ok(Ok(n)) => Ok(n),
            Ok(Err(e)) => Err(ClientError::Rpc(format!("block number query failed: {}", e))),
            Err(_) => Err(ClientError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get the native token balance of an address.
    pub async fn balance(&self, address: Address) -> Result<U256> {
        match timeout(self.timeout_duration, self.provider.get_balance(address)).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => Err(ClientError::Rpc(format!("balance query failed: {}", e))),
            Err(_) => Err(ClientError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get the transaction count (next nonce) for an address.
    pub async fn transaction_count(&self, address: Address) -> Result<u64> {
        match timeout(
            self.timeout_duration,
            self.provider.get_transaction_count(address),
        )
        .await
        {
            Ok(Ok(n)) => Ok(n),
            Ok(Err(e)) => Err(ClientError::Rpc(format!("nonce query failed: {}", e))),
            Err(_) => Err(ClientError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get the current gas price in wei.
    pub async fn gas_price(&self) -> Result<u128> {
        match timeout(self.timeout_duration, self.provider.get_gas_price()).await {
            Ok(Ok(p)) => Ok(p),
            Ok(Err(e)) => Err(ClientError::Rpc(format!("gas price query failed: {}", e))),
            Err(_) => Err(ClientError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Estimate gas for a transaction request.
    pub async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64> {
        match timeout(self.timeout_duration, self.provider.estimate_gas(tx)).await {
            Ok(Ok(gas)) => Ok(gas),
            Ok(Err(e)) => Err(ClientError::Rpc(format!("gas estimation failed: {}", e))),
            Err(_) => Err(ClientError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Execute a read-only contract call and return the raw return data.
    pub async fn call_contract(&self, to: Address, data: Vec<u8>) -> Result<Bytes> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        match timeout(self.timeout_duration, self.provider.call(tx)).await {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(e)) => Err(ClientError::Rpc(format!("contract call failed: {}", e))),
            Err(_) => Err(ClientError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get a transaction receipt by hash.
    pub async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionReceipt>> {
        match timeout(
            self.timeout_duration,
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
        {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(e)) => Err(ClientError::Rpc(format!("receipt query failed: {}", e))),
            Err(_) => Err(ClientError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Submit a signed transaction envelope and return its hash.
    pub async fn send_envelope(&self, envelope: TxEnvelope) -> Result<TxHash> {
        match timeout(
            self.timeout_duration,
            self.provider.send_tx_envelope(envelope),
        )
        .await
        {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(ClientError::Rpc(format!("transaction submission failed: {}", e))),
            Err(_) => Err(ClientError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
