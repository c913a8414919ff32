//! Transaction building, signing, submission, and confirmation monitoring.
//!
//! This is the sequencing core every state-changing operation goes through:
//! query nonce → price gas → estimate → sign → submit → poll for the receipt.

use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::{Log, TransactionRequest};
use alloy::sol_types::SolEvent;
use serde::Serialize;
use tokio::time::{interval, timeout};

use crate::chain::client::ChainClient;
use crate::chain::wallet::Wallet;
use crate::config::TxConfig;
use crate::error::{ClientError, Result};

/// The settled result of one submitted transaction.
#[derive(Debug, Clone, Serialize)]
pub struct TxOutcome {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Block the transaction landed in.
    pub block_number: Option<u64>,
    /// Gas consumed.
    pub gas_used: u64,
    /// Whether the transaction succeeded (false = reverted).
    pub success: bool,
    /// Logs emitted by the transaction.
    pub logs: Vec<Log>,
}

/// Builds, signs, and submits transactions for a single wallet.
#[derive(Debug, Clone)]
pub struct TxSender {
    client: ChainClient,
    wallet: Wallet,
    config: TxConfig,
}

impl TxSender {
    pub fn new(client: ChainClient, wallet: Wallet, config: TxConfig) -> Self {
        Self {
            client,
            wallet,
            config,
        }
    }

    /// The sending address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Submit one contract call and wait for it to confirm.
    ///
    /// The nonce is queried from the chain per call; sequential operations
    /// from one wallet therefore cannot collide, but concurrent ones can.
    pub async fn send(&self, to: Address, value: U256, data: Bytes) -> Result<TxOutcome> {
        let from = self.wallet.address();
        let nonce = self.client.transaction_count(from).await?;

        let gas_price = self.client.gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;
        if gas_price_gwei > self.config.max_gas_price_gwei as u128 {
            return Err(ClientError::GasPriceTooHigh {
                current_gwei: gas_price_gwei,
                max_gwei: self.config.max_gas_price_gwei,
            });
        }
        let adjusted_gas_price = (gas_price as f64 * self.config.gas_price_multiplier) as u128;

        let mut tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_value(value)
            .with_input(data)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(self.wallet.chain_id());

        let gas_limit = match self.client.estimate_gas(tx.clone()).await {
            Ok(gas) => gas,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    fallback = self.config.gas_limit_fallback,
                    "Gas estimation failed, using fallback limit"
                );
                self.config.gas_limit_fallback
            }
        };
        tx = tx.with_gas_limit(gas_limit);

        let envelope = tx
            .build(&self.wallet.ethereum_wallet())
            .await
            .map_err(|e| ClientError::Wallet(format!("Failed to sign transaction: {}", e)))?;

        let tx_hash = self.client.send_envelope(envelope).await?;
        tracing::debug!(tx_hash = %tx_hash, nonce = nonce, to = %to, "Transaction submitted");

        self.wait_for_receipt(tx_hash).await
    }

    /// Poll until the transaction reaches the configured confirmation depth.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxOutcome> {
        let required = self.config.confirmation_blocks;
        let timeout_duration = Duration::from_secs(self.config.confirmation_timeout_secs);
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);

        let result = timeout(timeout_duration, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                let current_block = self.client.block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations < required {
                    tracing::debug!(
                        tx_hash = %tx_hash,
                        confirmations = confirmations,
                        required = required,
                        "Waiting for confirmations"
                    );
                    continue;
                }

                let success = receipt.status();
                if !success {
                    tracing::warn!(tx_hash = %tx_hash, "Transaction reverted");
                }

                return Ok(TxOutcome {
                    tx_hash,
                    block_number: receipt.block_number,
                    gas_used: receipt.gas_used,
                    success,
                    logs: receipt.inner.logs().to_vec(),
                });
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ClientError::ConfirmationTimeout(
                self.config.confirmation_timeout_secs,
            )),
        }
    }
}

/// Scan an outcome's logs for the first event of type `E` emitted by
/// `emitter`. Logs that fail to decode are skipped.
pub fn extract_event<E: SolEvent>(outcome: &TxOutcome, emitter: Address) -> Option<E> {
    for log in &outcome.logs {
        if log.address() != emitter {
            continue;
        }
        if let Ok(decoded) = log.log_decode::<E>() {
            return Some(decoded.inner.data);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{IDatasetRegistry, ITaskManager};

    fn log_for<E: SolEvent>(event: &E, emitter: Address) -> Log {
        Log {
            inner: alloy::primitives::Log {
                address: emitter,
                data: event.encode_log_data(),
            },
            ..Default::default()
        }
    }

    fn outcome_with_logs(logs: Vec<Log>) -> TxOutcome {
        TxOutcome {
            tx_hash: TxHash::ZERO,
            block_number: Some(1),
            gas_used: 21_000,
            success: true,
            logs,
        }
    }

    #[test]
    fn test_extract_event_matches_emitter() {
        let emitter = Address::repeat_byte(0x11);
        let event = ITaskManager::TaskCreated {
            taskId: U256::from(7),
            creator: Address::repeat_byte(0x22),
        };
        let outcome = outcome_with_logs(vec![log_for(&event, emitter)]);

        let found = extract_event::<ITaskManager::TaskCreated>(&outcome, emitter).unwrap();
        assert_eq!(found.taskId, U256::from(7));
    }

    #[test]
    fn test_extract_event_ignores_other_emitters() {
        let emitter = Address::repeat_byte(0x11);
        let other = Address::repeat_byte(0x33);
        let event = ITaskManager::TaskCreated {
            taskId: U256::from(7),
            creator: Address::ZERO,
        };
        let outcome = outcome_with_logs(vec![log_for(&event, other)]);

        assert!(extract_event::<ITaskManager::TaskCreated>(&outcome, emitter).is_none());
    }

    #[test]
    fn test_extract_event_skips_undecodable_logs() {
        let emitter = Address::repeat_byte(0x11);
        let unrelated = IDatasetRegistry::DatasetCreated {
            datasetId: U256::from(1),
            owner: Address::ZERO,
        };
        let wanted = ITaskManager::TaskCreated {
            taskId: U256::from(42),
            creator: Address::ZERO,
        };
        let outcome = outcome_with_logs(vec![
            log_for(&unrelated, emitter),
            log_for(&wanted, emitter),
        ]);

        let found = extract_event::<ITaskManager::TaskCreated>(&outcome, emitter).unwrap();
        assert_eq!(found.taskId, U256::from(42));
    }
}
