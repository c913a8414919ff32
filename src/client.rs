//! The DataDAO client facade.
//!
//! Holds the chain client, optional wallet, resolved contract directory, and
//! optional storage bridge. Domain operations (membership, tasks, datasets,
//! governance, token) are implemented in their own modules as further
//! `impl DataDaoClient` blocks.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::Serialize;

use crate::chain::wallet::PRIVATE_KEY_ENV_VAR;
use crate::chain::{ChainClient, TxOutcome, TxSender, Wallet};
use crate::config::ClientConfig;
use crate::contracts::IDataDAOCore;
use crate::error::{ClientError, Result};
use crate::registry::ContractDirectory;
use crate::storage::StorageClient;

/// Aggregate platform counters.
#[derive(Debug, Clone, Serialize)]
pub struct DaoStats {
    pub member_count: U256,
    pub task_count: U256,
    pub dataset_count: U256,
    pub proposal_count: U256,
}

/// Client for the DataDAO platform.
///
/// Construction succeeds without a signing key, registry, or storage API key;
/// operations that need one of these fail with the corresponding typed error.
pub struct DataDaoClient {
    chain: ChainClient,
    wallet: Option<Wallet>,
    directory: Option<ContractDirectory>,
    storage: Option<StorageClient>,
    config: ClientConfig,
}

impl DataDaoClient {
    /// Connect to the platform.
    ///
    /// The signing key is read from `DATADAO_PRIVATE_KEY` when present; the
    /// contract directory is resolved when a registry address is configured;
    /// the storage bridge is built when an API key is configured.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let chain = ChainClient::connect(config.chain.clone()).await?;

        let wallet = match std::env::var(PRIVATE_KEY_ENV_VAR) {
            Ok(key) if !key.is_empty() => {
                Some(Wallet::from_private_key(&key, config.chain.chain_id)?)
            }
            _ => {
                tracing::debug!("No signing key in environment; client is read-only");
                None
            }
        };

        let directory = match &config.chain.registry_address {
            Some(addr) => {
                let registry: Address = addr.parse().map_err(|e| {
                    ClientError::Config(format!("invalid registry address '{}': {}", addr, e))
                })?;
                Some(ContractDirectory::resolve(&chain, registry).await?)
            }
            None => None,
        };

        let storage = match config.storage.api_key {
            Some(_) => Some(StorageClient::new(config.storage.clone())?),
            None => None,
        };

        Ok(Self {
            chain,
            wallet,
            directory,
            storage,
            config,
        })
    }

    /// Replace the signing key.
    pub fn set_private_key(&mut self, private_key_hex: &str) -> Result<()> {
        self.wallet = Some(Wallet::from_private_key(
            private_key_hex,
            self.config.chain.chain_id,
        )?);
        Ok(())
    }

    /// Point the client at a registry contract and re-resolve the directory.
    pub async fn set_contract_registry(&mut self, address: &str) -> Result<()> {
        let registry: Address = address.parse().map_err(|e| {
            ClientError::Config(format!("invalid registry address '{}': {}", address, e))
        })?;
        self.directory = Some(ContractDirectory::resolve(&self.chain, registry).await?);
        self.config.chain.registry_address = Some(address.to_string());
        Ok(())
    }

    /// Set the storage API key and (re)build the storage bridge.
    pub fn set_storage_api_key(&mut self, api_key: &str) -> Result<()> {
        let mut storage_config = self.config.storage.clone();
        storage_config.api_key = Some(api_key.to_string());
        self.storage = Some(StorageClient::new(storage_config.clone())?);
        self.config.storage = storage_config;
        Ok(())
    }

    /// The wallet address, when a signing key is configured.
    pub fn address(&self) -> Option<Address> {
        self.wallet.as_ref().map(|w| w.address())
    }

    /// The underlying chain client.
    pub fn chain(&self) -> &ChainClient {
        &self.chain
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn wallet(&self) -> Result<&Wallet> {
        self.wallet.as_ref().ok_or(ClientError::MissingKey)
    }

    pub(crate) fn directory(&self) -> Result<&ContractDirectory> {
        self.directory.as_ref().ok_or(ClientError::MissingRegistry)
    }

    pub(crate) fn storage(&self) -> Result<&StorageClient> {
        self.storage.as_ref().ok_or(ClientError::MissingApiKey)
    }

    pub(crate) fn contract(&self, name: &str) -> Result<Address> {
        self.directory()?.address(name)
    }

    pub(crate) fn sender(&self) -> Result<TxSender> {
        Ok(TxSender::new(
            self.chain.clone(),
            self.wallet()?.clone(),
            self.config.tx.clone(),
        ))
    }

    /// Default a subject address to the wallet's.
    pub(crate) fn subject(&self, address: Option<Address>) -> Result<Address> {
        address
            .or_else(|| self.address())
            .ok_or(ClientError::MissingAddress)
    }

    /// Read-only contract call, decoded into the call's return type.
    pub(crate) async fn view<C: SolCall>(&self, contract: &str, call: C) -> Result<C::Return> {
        let to = self.contract(contract)?;
        let ret = self.chain.call_contract(to, call.abi_encode()).await?;
        C::abi_decode_returns(&ret).map_err(|e| {
            ClientError::Abi(format!(
                "{} returned undecodable data for {}: {}",
                contract,
                C::SIGNATURE,
                e
            ))
        })
    }

    /// State-changing contract call through the transaction helper.
    pub(crate) async fn submit<C: SolCall>(
        &self,
        contract: &str,
        call: C,
        value: U256,
    ) -> Result<TxOutcome> {
        let to = self.contract(contract)?;
        let sender = self.sender()?;
        sender.send(to, value, Bytes::from(call.abi_encode())).await
    }

    /// Signed-message auth token for encrypted storage operations.
    pub(crate) async fn storage_auth_token(&self) -> Result<String> {
        let wallet = self.wallet()?;
        let storage = self.storage()?;
        let message = storage.auth_message(wallet.address()).await?;
        let signature = wallet.sign_message(message.as_bytes()).await?;
        let signature_hex = alloy::hex::encode_prefixed(signature.as_bytes());
        storage.fetch_jwt(wallet.address(), &signature_hex).await
    }

    /// Platform-wide counters.
    pub async fn dao_stats(&self) -> Result<DaoStats> {
        let stats = self
            .view("DataDAOCore", IDataDAOCore::getDAOStatsCall {})
            .await?;
        Ok(DaoStats {
            member_count: stats.memberCount,
            task_count: stats.taskCount,
            dataset_count: stats.datasetCount,
            proposal_count: stats.proposalCount,
        })
    }
}

impl std::fmt::Debug for DataDaoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataDaoClient")
            .field("chain", &self.chain)
            .field("has_wallet", &self.wallet.is_some())
            .field("has_directory", &self.directory.is_some())
            .field("has_storage", &self.storage.is_some())
            .finish()
    }
}
