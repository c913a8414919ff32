//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the DataDAO client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Chain connection settings.
    pub chain: ChainConfig,

    /// Transaction submission settings.
    pub tx: TxConfig,

    /// Decentralized storage settings.
    pub storage: StorageConfig,
}

/// Chain connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID for EIP-155 replay protection
    /// (314159 is the Filecoin calibration testnet).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Address of the ContractRegistry contract, if deployed.
    pub registry_address: Option<String>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.calibration.node.glif.io/rpc/v1".to_string(),
            chain_id: 314_159,
            rpc_timeout_secs: 30,
            registry_address: None,
        }
    }
}

/// Transaction submission configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TxConfig {
    /// Number of block confirmations required for finality.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for confirmations in seconds.
    pub confirmation_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Gas price multiplier (1.0 = estimated, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,

    /// Gas limit used when estimation fails.
    pub gas_limit_fallback: u64,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self {
            confirmation_blocks: 1,
            confirmation_timeout_secs: 180,
            poll_interval_ms: 2_000,
            gas_price_multiplier: 1.2,
            max_gas_price_gwei: 500,
            gas_limit_fallback: 2_000_000,
        }
    }
}

/// Decentralized storage network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Upload node base URL.
    pub api_url: String,

    /// Public gateway base URL for downloads.
    pub gateway_url: String,

    /// Encryption/auth service base URL.
    pub auth_url: String,

    /// API key (Bearer token). Usually supplied via environment.
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            api_url: "https://node.lighthouse.storage".to_string(),
            gateway_url: "https://gateway.lighthouse.storage".to_string(),
            auth_url: "https://encryption.lighthouse.storage".to_string(),
            api_key: None,
            request_timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.chain.chain_id, 314_159);
        assert!(config.chain.registry_address.is_none());
        assert_eq!(config.tx.gas_limit_fallback, 2_000_000);
        assert!(config.storage.api_key.is_none());
    }

    #[test]
    fn test_minimal_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
            [chain]
            rpc_url = "http://localhost:8545"
            chain_id = 31337
            "#,
        )
        .unwrap();
        assert_eq!(config.chain.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain.chain_id, 31337);
        // Unspecified sections fall back to defaults
        assert_eq!(config.tx.confirmation_blocks, 1);
        assert_eq!(config.storage.request_timeout_secs, 60);
    }
}
