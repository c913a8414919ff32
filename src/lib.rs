//! Client SDK for the DataDAO platform.
//!
//! The SDK wraps the platform's on-chain contracts (membership, tasks,
//! datasets, governance, token) behind a single [`DataDaoClient`], and
//! bridges dataset payloads to decentralized storage via [`StorageClient`].
//! On-chain ids and amounts stay as `U256`; token amounts are in the
//! smallest dataFIL unit.
//!
//! # Example
//!
//! ```no_run
//! use datadao_client::{ClientConfig, DataDaoClient};
//!
//! # async fn run() -> datadao_client::Result<()> {
//! let config = ClientConfig::default();
//! let client = DataDaoClient::connect(config).await?;
//! let stats = client.dao_stats().await?;
//! println!("members: {}", stats.member_count);
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod client;
pub mod config;
pub mod contracts;
pub mod dataset;
pub mod datasets;
pub mod error;
pub mod governance;
pub mod hub;
pub mod membership;
pub mod registry;
pub mod storage;
pub mod tasks;
pub mod token;

pub use client::{DataDaoClient, DaoStats};
pub use config::{load_config, ClientConfig};
pub use dataset::{Dataset, Split};
pub use error::{ClientError, Result};
pub use hub::DataHub;
pub use storage::StorageClient;
