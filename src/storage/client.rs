//! HTTP client for the storage network.

use std::path::Path;
use std::time::Duration;

use alloy::primitives::Address;
use reqwest::multipart;

use crate::config::StorageConfig;
use crate::error::{ClientError, Result};
use crate::storage::types::{AuthMessage, Encryption, JwtResponse, UploadReceipt, UploadResponse};

/// Client for the storage network's upload, gateway, and auth services.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    config: StorageConfig,
    api_key: String,
}

impl StorageClient {
    /// Create a storage client. Fails if no API key is configured.
    pub fn new(config: StorageConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or(ClientError::MissingApiKey)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Storage(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    /// Upload a file from disk. Returns the storage receipt with the CID.
    pub async fn upload_file(
        &self,
        path: &Path,
        encryption: Option<&Encryption>,
    ) -> Result<UploadReceipt> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::Storage(format!("failed to read {}: {}", path.display(), e)))?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        self.upload_bytes(bytes, filename, encryption).await
    }

    /// Upload inline text.
    pub async fn upload_text(
        &self,
        text: &str,
        encryption: Option<&Encryption>,
    ) -> Result<UploadReceipt> {
        self.upload_bytes(text.as_bytes().to_vec(), "data.txt".to_string(), encryption)
            .await
    }

    async fn upload_bytes(
        &self,
        bytes: Vec<u8>,
        filename: String,
        encryption: Option<&Encryption>,
    ) -> Result<UploadReceipt> {
        let part = multipart::Part::bytes(bytes).file_name(filename.clone());
        let mut form = multipart::Form::new().part("file", part);

        let mut request = self
            .http
            .post(format!("{}/api/v0/add", self.config.api_url))
            .bearer_auth(&self.api_key);

        if let Some(enc) = encryption {
            form = form.text("accessConditions", enc.access_conditions.to_string());
            request = request
                .header("Encryption", "true")
                .header("X-Auth-Token", &enc.auth_token);
        }

        let response = request.multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Storage(format!(
                "upload failed with status {}: {}",
                status, body
            )));
        }

        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::Storage(format!("unexpected upload response: {}", e)))?;
        if parsed.data.hash.is_empty() {
            return Err(ClientError::MissingCid);
        }

        tracing::info!(cid = %parsed.data.hash, file = %filename, "Upload complete");
        Ok(parsed.data)
    }

    /// Download an unencrypted object by CID from the public gateway.
    pub async fn download(&self, cid: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(format!("{}/ipfs/{}", self.config.gateway_url, cid))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Storage(format!(
                "download of {} failed with status {}",
                cid, status
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch the one-time challenge message for an address.
    pub async fn auth_message(&self, address: Address) -> Result<String> {
        let response = self
            .http
            .get(format!("{}/api/message/{}", self.config.auth_url, address))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Storage(format!(
                "auth message request failed with status {}",
                status
            )));
        }
        let messages: Vec<AuthMessage> = response.json().await?;
        messages
            .into_iter()
            .next()
            .map(|m| m.message)
            .ok_or_else(|| ClientError::Storage("auth service returned no message".to_string()))
    }

    /// Exchange a signed challenge for a bearer JWT.
    pub async fn fetch_jwt(&self, address: Address, signature: &str) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/api/message/get-jwt", self.config.auth_url))
            .json(&serde_json::json!({
                "address": address.to_string(),
                "signature": signature,
            }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Storage(format!(
                "JWT exchange failed with status {}",
                status
            )));
        }
        let jwt: JwtResponse = response.json().await?;
        Ok(jwt.token)
    }

    /// Download and decrypt an encrypted object by CID.
    pub async fn decrypt(&self, cid: &str, auth_token: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .post(format!("{}/api/decrypt", self.config.auth_url))
            .bearer_auth(auth_token)
            .json(&serde_json::json!({ "cid": cid }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Storage(format!(
                "decrypt of {} failed with status {}",
                cid, status
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let config = StorageConfig::default();
        let result = StorageClient::new(config);
        assert!(matches!(result, Err(ClientError::MissingApiKey)));
    }

    #[test]
    fn test_construction_with_key() {
        let config = StorageConfig {
            api_key: Some("test-key".to_string()),
            ..StorageConfig::default()
        };
        assert!(StorageClient::new(config).is_ok());
    }
}
