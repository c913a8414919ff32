//! Token operations for dataFIL, the platform's utility token.

use alloy::primitives::{Address, U256};

use crate::chain::TxOutcome;
use crate::client::DataDaoClient;
use crate::contracts::IDataToken;
use crate::error::Result;

impl DataDaoClient {
    /// Claim test tokens from the faucet.
    pub async fn claim_from_faucet(&self) -> Result<TxOutcome> {
        let outcome = self
            .submit("DataToken", IDataToken::claimFromFaucetCall {}, U256::ZERO)
            .await?;
        tracing::info!(tx_hash = %outcome.tx_hash, "Faucet claim submitted");
        Ok(outcome)
    }

    /// Token balance of `address` (defaults to the wallet's).
    pub async fn token_balance(&self, address: Option<Address>) -> Result<U256> {
        let account = self.subject(address)?;
        self.view("DataToken", IDataToken::balanceOfCall { account })
            .await
    }
}
