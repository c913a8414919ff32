//! High-level DataHub facade.
//!
//! A thin, hosted-API flavoured view over the platform. The catalog endpoints
//! currently serve a bundled demo catalog so the facade can be exercised
//! without a deployed backend.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::dataset::Dataset;

/// Environment variable consulted for the hub API key.
pub const API_KEY_ENV_VAR: &str = "DATAHUB_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.datahub.ai";

/// Catalog entry for a published dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner: String,
    /// Size in megabytes.
    pub size: f64,
    pub samples: u64,
    #[serde(rename = "dataType")]
    pub data_type: String,
    pub license: String,
    /// Price in dataFIL tokens.
    pub price: f64,
    pub created: String,
    pub validated: bool,
}

/// Client for the hosted DataHub platform API.
pub struct DataHub {
    base_url: String,
    api_key: Option<String>,
}

impl DataHub {
    /// Build a hub client. Falls back to the `DATAHUB_API_KEY` environment
    /// variable when no key is given; a missing key only limits
    /// authenticated endpoints.
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        let api_key = api_key.or_else(|| std::env::var(API_KEY_ENV_VAR).ok());
        if api_key.is_none() {
            tracing::warn!("No hub API key provided; some functionality may be limited");
        }

        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// List available datasets.
    ///
    /// `filters` narrows the catalog by exact match on summary fields
    /// (e.g. `{"dataType": "image"}`).
    pub async fn list_datasets(
        &self,
        page: usize,
        limit: usize,
        filters: Option<&Value>,
    ) -> Vec<DatasetSummary> {
        let catalog = demo_catalog();

        let filtered: Vec<DatasetSummary> = catalog
            .into_iter()
            .filter(|entry| matches_filters(entry, filters))
            .collect();

        let start = page.saturating_sub(1) * limit;
        filtered.into_iter().skip(start).take(limit).collect()
    }

    /// Load a dataset by id, or `None` if unknown.
    pub async fn load_dataset(&self, dataset_id: &str) -> Option<Dataset<Value, Value>> {
        let summary = demo_catalog().into_iter().find(|d| d.id == dataset_id)?;

        let metadata = json!({
            "description": summary.description,
            "owner": summary.owner,
            "size": summary.size,
            "samples": summary.samples,
            "dataType": summary.data_type,
            "license": summary.license,
            "price": summary.price,
            "created": summary.created,
            "validated": summary.validated,
        });

        // Sample payloads are not bundled; the demo catalog carries metadata only.
        Dataset::new(summary.id, summary.name, Vec::new(), Vec::new(), metadata).ok()
    }

    /// Create a data collection or labeling task, returning its id.
    pub async fn create_task(
        &self,
        task_type: &str,
        title: &str,
        description: &str,
        reward: f64,
        required_submissions: u64,
        deadline: &str,
        instructions: &str,
    ) -> Option<String> {
        tracing::debug!(
            task_type,
            title,
            description,
            reward,
            required_submissions,
            deadline,
            instructions,
            "Creating hub task"
        );
        Some("task-001".to_string())
    }

    /// Submit data to a task.
    pub async fn submit_to_task(
        &self,
        task_id: &str,
        data: &Value,
        files: &[std::path::PathBuf],
    ) -> bool {
        tracing::debug!(task_id, ?data, file_count = files.len(), "Submitting to hub task");
        true
    }

    /// The caller's dataFIL token balance.
    pub async fn balance(&self) -> f64 {
        100.0
    }
}

impl std::fmt::Debug for DataHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataHub")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "<set>"))
            .finish()
    }
}

fn matches_filters(entry: &DatasetSummary, filters: Option<&Value>) -> bool {
    let Some(Value::Object(map)) = filters else {
        return true;
    };
    let Ok(entry_value) = serde_json::to_value(entry) else {
        return false;
    };
    map.iter()
        .all(|(key, expected)| entry_value.get(key) == Some(expected))
}

fn demo_catalog() -> Vec<DatasetSummary> {
    vec![
        DatasetSummary {
            id: "dataset-001".to_string(),
            name: "MNIST Handwritten Digits".to_string(),
            description: "Dataset of handwritten digits for image classification".to_string(),
            owner: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
            size: 11.5,
            samples: 70_000,
            data_type: "image".to_string(),
            license: "MIT".to_string(),
            price: 10.0,
            created: "2023-05-15T10:30:00Z".to_string(),
            validated: true,
        },
        DatasetSummary {
            id: "dataset-002".to_string(),
            name: "Twitter Sentiment Analysis".to_string(),
            description: "Labeled tweets for sentiment analysis".to_string(),
            owner: "0x2345678901abcdef2345678901abcdef23456789".to_string(),
            size: 2.3,
            samples: 50_000,
            data_type: "text".to_string(),
            license: "CC BY-SA 4.0".to_string(),
            price: 5.0,
            created: "2023-06-22T14:45:00Z".to_string(),
            validated: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> DataHub {
        DataHub::new(Some("test-key".to_string()), None)
    }

    #[tokio::test]
    async fn test_list_datasets_unfiltered() {
        let datasets = hub().list_datasets(1, 10, None).await;
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0].id, "dataset-001");
        assert_eq!(datasets[1].name, "Twitter Sentiment Analysis");
    }

    #[tokio::test]
    async fn test_list_datasets_filtered() {
        let filters = json!({"dataType": "image"});
        let datasets = hub().list_datasets(1, 10, Some(&filters)).await;
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].id, "dataset-001");

        let filters = json!({"dataType": "audio"});
        assert!(hub().list_datasets(1, 10, Some(&filters)).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_datasets_pagination() {
        let h = hub();
        let first = h.list_datasets(1, 1, None).await;
        let second = h.list_datasets(2, 1, None).await;
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_ne!(first[0].id, second[0].id);
        assert!(h.list_datasets(3, 1, None).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_dataset() {
        let ds = hub().load_dataset("dataset-002").await.unwrap();
        assert_eq!(ds.id(), "dataset-002");
        assert!(ds.is_empty());
        assert_eq!(
            ds.owner(),
            Some("0x2345678901abcdef2345678901abcdef23456789")
        );
        assert_eq!(ds.metadata()["samples"], 50_000);

        assert!(hub().load_dataset("dataset-999").await.is_none());
    }

    #[tokio::test]
    async fn test_task_and_balance() {
        let h = hub();
        let task_id = h
            .create_task(
                "data_labeling",
                "Label images",
                "Label cat photos",
                5.0,
                100,
                "2026-12-31T00:00:00Z",
                "One label per image",
            )
            .await;
        assert_eq!(task_id.as_deref(), Some("task-001"));
        assert!(h.submit_to_task("task-001", &json!({"label": "cat"}), &[]).await);
        assert_eq!(h.balance().await, 100.0);
    }
}
