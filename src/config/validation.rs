//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic validation. Returns all
//! errors, not just the first.

use alloy::primitives::Address;

use crate::config::schema::ClientConfig;

/// A single validation failure, naming the offending field.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.chain.rpc_url.is_empty() {
        errors.push(err("chain.rpc_url", "must not be empty"));
    } else if config.chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(err("chain.rpc_url", "is not a valid URL"));
    }

    if config.chain.chain_id == 0 {
        errors.push(err("chain.chain_id", "must be non-zero"));
    }

    if config.chain.rpc_timeout_secs == 0 {
        errors.push(err("chain.rpc_timeout_secs", "must be greater than zero"));
    }

    if let Some(addr) = &config.chain.registry_address {
        if addr.parse::<Address>().is_err() {
            errors.push(err("chain.registry_address", "is not a valid address"));
        }
    }

    if config.tx.gas_price_multiplier < 1.0 {
        errors.push(err("tx.gas_price_multiplier", "must be at least 1.0"));
    }

    if config.tx.max_gas_price_gwei == 0 {
        errors.push(err("tx.max_gas_price_gwei", "must be greater than zero"));
    }

    if config.tx.gas_limit_fallback < 21_000 {
        errors.push(err(
            "tx.gas_limit_fallback",
            "must cover at least the base transaction cost (21000)",
        ));
    }

    if config.tx.poll_interval_ms == 0 {
        errors.push(err("tx.poll_interval_ms", "must be greater than zero"));
    }

    for (field, value) in [
        ("storage.api_url", &config.storage.api_url),
        ("storage.gateway_url", &config.storage.gateway_url),
        ("storage.auth_url", &config.storage.auth_url),
    ] {
        if value.parse::<url::Url>().is_err() {
            errors.push(err(field, "is not a valid URL"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ClientConfig::default();
        config.chain.rpc_url = String::new();
        config.chain.chain_id = 0;
        config.tx.gas_price_multiplier = 0.5;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "chain.rpc_url"));
        assert!(errors.iter().any(|e| e.field == "tx.gas_price_multiplier"));
    }

    #[test]
    fn test_bad_registry_address() {
        let mut config = ClientConfig::default();
        config.chain.registry_address = Some("not-an-address".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "chain.registry_address");
    }
}
