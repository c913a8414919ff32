//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable for the storage API key.
pub const STORAGE_API_KEY_ENV_VAR: &str = "DATADAO_STORAGE_API_KEY";

/// Environment variable for the contract registry address.
pub const REGISTRY_ADDRESS_ENV_VAR: &str = "DATADAO_REGISTRY_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file, then apply
/// environment overrides for secrets.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: ClientConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides. Secrets never live in the config file.
pub fn apply_env_overrides(config: &mut ClientConfig) {
    if let Ok(key) = std::env::var(STORAGE_API_KEY_ENV_VAR) {
        if !key.is_empty() {
            config.storage.api_key = Some(key);
        }
    }
    if let Ok(addr) = std::env::var(REGISTRY_ADDRESS_ENV_VAR) {
        if !addr.is_empty() {
            config.chain.registry_address = Some(addr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("does_not_exist.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_roundtrip() {
        let path = std::env::temp_dir().join("datadao_client_test_config.toml");
        fs::write(
            &path,
            r#"
            [chain]
            rpc_url = "http://localhost:8545"
            chain_id = 31337

            [tx]
            confirmation_blocks = 2
            "#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.chain.chain_id, 31337);
        assert_eq!(config.tx.confirmation_blocks, 2);

        fs::remove_file(&path).unwrap_or_default();
    }
}
