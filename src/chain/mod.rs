//! Chain access: RPC client, wallet, and the transaction helper.
//!
//! # Components
//! - [`client`]: timeout-bounded JSON-RPC queries
//! - [`wallet`]: signing key management
//! - [`tx`]: build → sign → submit → await confirmation, plus event extraction

pub mod client;
pub mod tx;
pub mod wallet;

pub use client::ChainClient;
pub use tx::{extract_event, TxOutcome, TxSender};
pub use wallet::Wallet;
