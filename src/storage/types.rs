//! Storage network request/response types.

use serde::{Deserialize, Serialize};

/// Envelope returned by the upload node.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub data: UploadReceipt,
}

/// Receipt for one stored object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(rename = "Name")]
    pub name: String,
    /// Content identifier of the stored object.
    #[serde(rename = "Hash")]
    pub hash: String,
    #[serde(rename = "Size")]
    pub size: String,
}

/// One-time challenge message issued by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthMessage {
    pub message: String,
}

/// Bearer token returned after signed-message authentication.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtResponse {
    pub token: String,
}

/// Parameters for an encrypted upload.
#[derive(Debug, Clone)]
pub struct Encryption {
    /// Access-control conditions enforced by the encryption network.
    pub access_conditions: serde_json::Value,
    /// Signed-message auth token (see [`crate::storage::StorageClient::fetch_jwt`]).
    pub auth_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_shape() {
        let json = r#"{"data":{"Name":"cats.csv","Hash":"QmTestCid","Size":"1024"}}"#;
        let resp: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.hash, "QmTestCid");
        assert_eq!(resp.data.name, "cats.csv");
    }

    #[test]
    fn test_auth_message_array() {
        let json = r#"[{"message":"sign this"}]"#;
        let msgs: Vec<AuthMessage> = serde_json::from_str(json).unwrap();
        assert_eq!(msgs[0].message, "sign this");
    }
}
