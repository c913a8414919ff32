//! Offline integration tests.
//!
//! The client is built without a signing key, registry, or storage API key,
//! and every operation that needs one must fail with its typed error before
//! any network traffic happens.

use alloy::primitives::{Address, U256};
use datadao_client::config::validation::validate_config;
use datadao_client::governance::VoteChoice;
use datadao_client::tasks::SubmissionPayload;
use datadao_client::{ClientConfig, ClientError, DataDaoClient};

fn offline_config() -> ClientConfig {
    let mut config = ClientConfig::default();
    // Discard port; nothing listens, and no operation below should dial it
    config.chain.rpc_url = "http://127.0.0.1:9".to_string();
    config
}

async fn offline_client() -> DataDaoClient {
    std::env::remove_var("DATADAO_PRIVATE_KEY");
    DataDaoClient::connect(offline_config())
        .await
        .expect("offline connect should succeed")
}

#[tokio::test]
async fn test_connect_without_secrets() {
    let client = offline_client().await;
    assert!(client.address().is_none());
}

#[tokio::test]
async fn test_stats_require_registry() {
    let client = offline_client().await;
    assert!(matches!(
        client.dao_stats().await,
        Err(ClientError::MissingRegistry)
    ));
}

#[tokio::test]
async fn test_writes_require_registry() {
    let client = offline_client().await;
    assert!(matches!(
        client.claim_from_faucet().await,
        Err(ClientError::MissingRegistry)
    ));
    assert!(matches!(
        client.join_dao(U256::from(100)).await,
        Err(ClientError::MissingRegistry)
    ));
    assert!(matches!(
        client.vote_on_proposal(U256::ZERO, VoteChoice::For).await,
        Err(ClientError::MissingRegistry)
    ));
}

#[tokio::test]
async fn test_subject_defaults_require_wallet() {
    let client = offline_client().await;
    assert!(matches!(
        client.token_balance(None).await,
        Err(ClientError::MissingAddress)
    ));
    assert!(matches!(
        client.is_member(None).await,
        Err(ClientError::MissingAddress)
    ));
}

#[tokio::test]
async fn test_explicit_address_skips_wallet_check() {
    let client = offline_client().await;
    // With an address provided, the next missing precondition is the registry
    let someone = Address::repeat_byte(0x11);
    assert!(matches!(
        client.is_member(Some(someone)).await,
        Err(ClientError::MissingRegistry)
    ));
}

#[tokio::test]
async fn test_submissions_require_storage_key() {
    let client = offline_client().await;
    let payload = SubmissionPayload::Text("labeled sample".to_string());
    assert!(matches!(
        client.submit_to_task(U256::ZERO, payload, false, None).await,
        Err(ClientError::MissingApiKey)
    ));
    assert!(matches!(
        client.access_dataset(U256::ZERO).await,
        Err(ClientError::MissingApiKey)
    ));
}

#[tokio::test]
async fn test_setters_flip_preconditions() {
    let mut client = offline_client().await;

    client
        .set_private_key("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")
        .expect("valid key");
    assert!(client.address().is_some());

    client.set_storage_api_key("test-key").expect("storage key");
    // Storage is now configured, so dataset access fails on the registry next
    assert!(matches!(
        client.access_dataset(U256::ZERO).await,
        Err(ClientError::MissingRegistry)
    ));
}

#[tokio::test]
async fn test_invalid_private_key_rejected() {
    let mut client = offline_client().await;
    assert!(matches!(
        client.set_private_key("not-a-key"),
        Err(ClientError::Wallet(_))
    ));
}

#[test]
fn test_offline_config_is_valid() {
    assert!(validate_config(&offline_config()).is_ok());
}
