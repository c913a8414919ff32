//! Contract directory resolved through the on-chain registry.
//!
//! The registry contract maps logical names ("TaskManager") to deployed
//! addresses. Resolution is best-effort per name: a contract that fails to
//! resolve is logged and skipped, and later lookups of it return
//! [`ClientError::ContractNotRegistered`].

use std::collections::HashMap;

use alloy::primitives::Address;
use alloy::sol_types::SolCall;

use crate::chain::ChainClient;
use crate::contracts::IContractRegistry;
use crate::error::{ClientError, Result};

/// Logical names the registry is asked to resolve at startup.
pub const CONTRACT_NAMES: &[&str] = &[
    "DataDAOCore",
    "MembershipManager",
    "TaskManager",
    "DatasetRegistry",
    "RewardDistributor",
    "DealClient",
    "DataToken",
    "GovernanceModule",
];

/// Resolved logical-name → address table.
#[derive(Debug, Clone)]
pub struct ContractDirectory {
    registry_address: Address,
    addresses: HashMap<String, Address>,
}

impl ContractDirectory {
    /// Resolve all known contract names through the registry.
    pub async fn resolve(client: &ChainClient, registry_address: Address) -> Result<Self> {
        let mut addresses = HashMap::new();

        for name in CONTRACT_NAMES {
            let call = IContractRegistry::getContractAddressCall {
                name: (*name).to_string(),
            };
            match client
                .call_contract(registry_address, call.abi_encode())
                .await
            {
                Ok(ret) => {
                    match IContractRegistry::getContractAddressCall::abi_decode_returns(&ret) {
                        Ok(addr) if addr != Address::ZERO => {
                            tracing::debug!(contract = name, address = %addr, "Resolved contract");
                            addresses.insert((*name).to_string(), addr);
                        }
                        Ok(_) => {
                            tracing::warn!(contract = name, "Registry returned zero address, skipping");
                        }
                        Err(e) => {
                            tracing::warn!(contract = name, error = %e, "Failed to decode registry response");
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(contract = name, error = %e, "Failed to resolve contract");
                }
            }
        }

        tracing::info!(
            registry = %registry_address,
            resolved = addresses.len(),
            "Contract directory initialized"
        );

        Ok(Self {
            registry_address,
            addresses,
        })
    }

    /// Build a directory from known entries without touching the chain.
    pub fn from_entries(
        registry_address: Address,
        entries: impl IntoIterator<Item = (String, Address)>,
    ) -> Self {
        Self {
            registry_address,
            addresses: entries.into_iter().collect(),
        }
    }

    /// Look up a contract address by logical name.
    pub fn address(&self, name: &str) -> Result<Address> {
        self.addresses
            .get(name)
            .copied()
            .ok_or_else(|| ClientError::ContractNotRegistered(name.to_string()))
    }

    /// Whether a contract resolved at startup.
    pub fn contains(&self, name: &str) -> bool {
        self.addresses.contains_key(name)
    }

    /// The registry contract's own address.
    pub fn registry_address(&self) -> Address {
        self.registry_address
    }

    /// Names that resolved.
    pub fn resolved_names(&self) -> impl Iterator<Item = &str> {
        self.addresses.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_missing_contract() {
        let dir = ContractDirectory::from_entries(Address::ZERO, std::iter::empty());
        let err = dir.address("TaskManager").unwrap_err();
        assert!(matches!(err, ClientError::ContractNotRegistered(name) if name == "TaskManager"));
    }

    #[test]
    fn test_lookup_resolved_contract() {
        let task_manager = Address::repeat_byte(0x42);
        let dir = ContractDirectory::from_entries(
            Address::ZERO,
            [("TaskManager".to_string(), task_manager)],
        );
        assert_eq!(dir.address("TaskManager").unwrap(), task_manager);
        assert!(dir.contains("TaskManager"));
        assert!(!dir.contains("DataToken"));
    }
}
