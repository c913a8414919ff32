//! Wallet management and signing.
//!
//! # Security
//! - Private keys are loaded from constructor arguments or environment variables
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::error::{ClientError, Result};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "DATADAO_PRIVATE_KEY";

/// Wallet for transaction and message signing.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string
    /// (with or without a 0x prefix).
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> Result<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ClientError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id,
            "Wallet initialized"
        );

        Ok(Self { signer, chain_id })
    }

    /// Load the wallet from the `DATADAO_PRIVATE_KEY` environment variable.
    pub fn from_env(chain_id: u64) -> Result<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR)
            .map_err(|_| ClientError::Wallet(format!("{} not set", PRIVATE_KEY_ENV_VAR)))?;
        Self::from_private_key(&private_key, chain_id)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the chain ID this wallet signs for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get a network wallet suitable for building transaction envelopes.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }

    /// Sign arbitrary message bytes with the EIP-191 personal-message prefix.
    ///
    /// Used for the storage network's signed-message authentication.
    pub async fn sign_message(&self, message: &[u8]) -> Result<alloy::signers::Signature> {
        self.signer
            .sign_message(message)
            .await
            .map_err(|e| ClientError::Wallet(format!("Message signing failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 1).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet = Wallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY), 1).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = Wallet::from_private_key("invalid_key", 1);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid private key"));
    }

    #[tokio::test]
    async fn test_sign_message() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, 1).unwrap();
        let signature = wallet.sign_message(b"auth challenge").await.unwrap();
        // 65 bytes (r, s, v)
        assert_eq!(signature.as_bytes().len(), 65);
    }
}
