//! Storage bridge to the decentralized storage network.
//!
//! Uploads, downloads, and the signed-message auth flow are delegated to the
//! network's HTTP API; this module only shapes requests and responses.

pub mod client;
pub mod types;

pub use client::StorageClient;
pub use types::{Encryption, UploadReceipt};
