//! Error definitions for the client SDK.

use alloy::primitives::U256;
use thiserror::Error;

/// Errors surfaced by the DataDAO client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A signing operation was requested but no private key is configured.
    #[error("signing key not configured")]
    MissingKey,

    /// A storage operation was requested but no storage API key is configured.
    #[error("storage API key not configured")]
    MissingApiKey,

    /// No subject address was provided and no wallet is configured to default to.
    #[error("address not provided and no wallet configured")]
    MissingAddress,

    /// Contract operations were requested before a registry was configured.
    #[error("contract registry address not configured")]
    MissingRegistry,

    /// The registry did not resolve the named contract at startup.
    #[error("contract {0} not registered")]
    ContractNotRegistered(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within the configured window.
    #[error("transaction not confirmed after {0} seconds")]
    ConfirmationTimeout(u64),

    /// Gas price exceeded the configured ceiling.
    #[error("gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u128, max_gwei: u64 },

    /// Invalid private key format or signing failure.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// A contract return value or event could not be decoded.
    #[error("ABI decode error: {0}")]
    Abi(String),

    /// Storage network request failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The storage network returned a response without a content identifier.
    #[error("upload did not return a CID")]
    MissingCid,

    /// An encrypted upload was requested without access conditions.
    #[error("access conditions required for encrypted uploads")]
    MissingAccessConditions,

    /// The caller has no access to the requested dataset.
    #[error("no access to dataset {0}")]
    AccessDenied(U256),

    /// A dataset was built with differing feature and label counts.
    #[error("feature/label length mismatch: {features} features, {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    /// A dataset split ratio was outside the unit interval.
    #[error("train ratio must be within 0.0..=1.0, got {0}")]
    InvalidRatio(f64),

    /// An on-chain enum discriminant was outside the known range.
    #[error("unknown {kind} value {value}")]
    UnknownDiscriminant { kind: &'static str, value: u8 },

    /// Configuration was malformed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Storage(e.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = ClientError::ContractNotRegistered("TaskManager".to_string());
        assert!(err.to_string().contains("TaskManager"));

        let err = ClientError::GasPriceTooHigh {
            current_gwei: 600,
            max_gwei: 500,
        };
        assert!(err.to_string().contains("600"));
    }

    #[test]
    fn test_access_denied_display() {
        let err = ClientError::AccessDenied(U256::from(7));
        assert_eq!(err.to_string(), "no access to dataset 7");
    }
}
