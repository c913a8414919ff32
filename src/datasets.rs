//! Dataset registry operations: creation, access purchase, retrieval.

use alloy::primitives::{Address, U256};
use serde::Serialize;

use crate::chain::{extract_event, TxOutcome};
use crate::client::DataDaoClient;
use crate::contracts::{IDataDAOCore, IDataToken, IDatasetRegistry};
use crate::error::{ClientError, Result};

/// How access to a dataset is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    Public = 0,
    TokenGated = 1,
    NftGated = 2,
    Subscription = 3,
    PayPerUse = 4,
}

impl TryFrom<u8> for AccessType {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Public),
            1 => Ok(Self::TokenGated),
            2 => Ok(Self::NftGated),
            3 => Ok(Self::Subscription),
            4 => Ok(Self::PayPerUse),
            _ => Err(ClientError::UnknownDiscriminant {
                kind: "access type",
                value,
            }),
        }
    }
}

/// Parameters for registering a new dataset.
#[derive(Debug, Clone)]
pub struct NewDataset {
    pub name: String,
    pub description: String,
    pub metadata_cid: String,
    pub data_cid: String,
    pub is_encrypted: bool,
    pub access_conditions_cid: String,
    pub access_type: AccessType,
    pub price: U256,
    /// Tasks whose submissions fed this dataset.
    pub task_ids: Vec<U256>,
}

impl NewDataset {
    fn into_call(self) -> IDatasetRegistry::createDatasetCall {
        IDatasetRegistry::createDatasetCall {
            name: self.name,
            description: self.description,
            metadataCID: self.metadata_cid,
            dataCID: self.data_cid,
            isEncrypted: self.is_encrypted,
            accessConditionsCID: self.access_conditions_cid,
            accessType: self.access_type as u8,
            price: self.price,
            taskIds: self.task_ids,
        }
    }
}

/// Receipt and extracted id from dataset registration.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDatasetOutcome {
    pub create: TxOutcome,
    /// Id from the DatasetCreated event, when it could be extracted.
    pub dataset_id: Option<U256>,
}

/// Receipts from the purchase sequence.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOutcome {
    pub approve: TxOutcome,
    pub purchase: TxOutcome,
}

/// Downloaded dataset content.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetContent {
    pub dataset_id: U256,
    pub data_cid: String,
    pub content: Vec<u8>,
}

/// On-chain dataset record.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub id: U256,
    pub name: String,
    pub description: String,
    pub owner: Address,
    pub metadata_cid: String,
    pub data_cid: String,
    pub is_encrypted: bool,
    pub access_conditions_cid: String,
    pub access_type: AccessType,
    pub price: U256,
    pub created_at: U256,
    pub has_filecoin_deal: bool,
    pub deal_id: u64,
    pub validated: bool,
    pub usage_count: U256,
    pub revenue: U256,
}

impl TryFrom<IDatasetRegistry::getDatasetReturn> for DatasetInfo {
    type Error = ClientError;

    fn try_from(r: IDatasetRegistry::getDatasetReturn) -> Result<Self> {
        Ok(Self {
            id: r.id,
            name: r.name,
            description: r.description,
            owner: r.owner,
            metadata_cid: r.metadataCID,
            data_cid: r.dataCID,
            is_encrypted: r.isEncrypted,
            access_conditions_cid: r.accessConditionsCID,
            access_type: AccessType::try_from(r.accessType)?,
            price: r.price,
            created_at: r.createdAt,
            has_filecoin_deal: r.hasFilecoinDeal,
            deal_id: r.dealId,
            validated: r.validated,
            usage_count: r.usageCount,
            revenue: r.revenue,
        })
    }
}

impl DataDaoClient {
    /// Register a dataset.
    pub async fn create_dataset(&self, dataset: NewDataset) -> Result<CreateDatasetOutcome> {
        let registry = self.contract("DatasetRegistry")?;

        let create = self
            .submit("DatasetRegistry", dataset.into_call(), U256::ZERO)
            .await?;

        let dataset_id = extract_event::<IDatasetRegistry::DatasetCreated>(&create, registry)
            .map(|e| e.datasetId);
        match dataset_id {
            Some(id) => tracing::info!(dataset_id = %id, "Dataset created"),
            None => tracing::warn!("DatasetCreated event not found in receipt"),
        }

        Ok(CreateDatasetOutcome { create, dataset_id })
    }

    /// Purchase access to a dataset at its current on-chain price.
    ///
    /// `duration` is in seconds and only meaningful for subscription
    /// datasets; pass zero otherwise.
    pub async fn purchase_dataset_access(
        &self,
        dataset_id: U256,
        duration: u64,
    ) -> Result<PurchaseOutcome> {
        let registry = self.contract("DatasetRegistry")?;
        let info = self.dataset(dataset_id).await?;

        let approve = self
            .submit(
                "DataToken",
                IDataToken::approveCall {
                    spender: registry,
                    amount: info.price,
                },
                U256::ZERO,
            )
            .await?;

        let purchase = self
            .submit(
                "DatasetRegistry",
                IDatasetRegistry::purchaseAccessCall {
                    datasetId: dataset_id,
                    duration: U256::from(duration),
                },
                U256::ZERO,
            )
            .await?;

        tracing::info!(dataset_id = %dataset_id, price = %info.price, "Dataset access purchased");
        Ok(PurchaseOutcome { approve, purchase })
    }

    /// Download a dataset the caller has access to.
    ///
    /// Pay-per-use datasets incur an approval and a usage-recording
    /// transaction before the download. Encrypted content is fetched through
    /// the decrypt endpoint using the signed-message auth flow.
    pub async fn access_dataset(&self, dataset_id: U256) -> Result<DatasetContent> {
        let storage = self.storage()?;
        let user = self.subject(None)?;

        let has_access = self
            .view(
                "DatasetRegistry",
                IDatasetRegistry::hasAccessCall {
                    datasetId: dataset_id,
                    user,
                },
            )
            .await?;
        if !has_access {
            return Err(ClientError::AccessDenied(dataset_id));
        }

        let info = self.dataset(dataset_id).await?;

        if info.access_type == AccessType::PayPerUse {
            let registry = self.contract("DatasetRegistry")?;
            self.submit(
                "DataToken",
                IDataToken::approveCall {
                    spender: registry,
                    amount: info.price,
                },
                U256::ZERO,
            )
            .await?;
            self.submit(
                "DataDAOCore",
                IDataDAOCore::recordDatasetUsageCall {
                    datasetId: dataset_id,
                    user,
                },
                U256::ZERO,
            )
            .await?;
        }

        let content = if info.is_encrypted {
            let auth_token = self.storage_auth_token().await?;
            storage.decrypt(&info.data_cid, &auth_token).await?
        } else {
            storage.download(&info.data_cid).await?
        };

        tracing::info!(
            dataset_id = %dataset_id,
            cid = %info.data_cid,
            bytes = content.len(),
            "Dataset downloaded"
        );

        Ok(DatasetContent {
            dataset_id,
            data_cid: info.data_cid,
            content,
        })
    }

    /// Fetch a dataset record.
    pub async fn dataset(&self, dataset_id: U256) -> Result<DatasetInfo> {
        let raw = self
            .view(
                "DatasetRegistry",
                IDatasetRegistry::getDatasetCall {
                    datasetId: dataset_id,
                },
            )
            .await?;
        raw.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_return() -> IDatasetRegistry::getDatasetReturn {
        IDatasetRegistry::getDatasetReturn {
            id: U256::from(3),
            name: "MNIST".to_string(),
            description: "Handwritten digits".to_string(),
            owner: Address::repeat_byte(0x12),
            metadataCID: "QmMeta".to_string(),
            dataCID: "QmData".to_string(),
            isEncrypted: true,
            accessConditionsCID: "QmCond".to_string(),
            accessType: 4,
            price: U256::from(1_000),
            createdAt: U256::from(1_690_000_000u64),
            hasFilecoinDeal: true,
            dealId: 88,
            validated: true,
            usageCount: U256::from(12),
            revenue: U256::from(12_000),
        }
    }

    #[test]
    fn test_dataset_info_mapping() {
        let info = DatasetInfo::try_from(sample_return()).unwrap();
        assert_eq!(info.id, U256::from(3));
        assert_eq!(info.access_type, AccessType::PayPerUse);
        assert!(info.is_encrypted);
        assert_eq!(info.deal_id, 88);
        assert_eq!(info.revenue, U256::from(12_000));
    }

    #[test]
    fn test_access_type_conversions() {
        assert_eq!(AccessType::try_from(0).unwrap(), AccessType::Public);
        assert_eq!(AccessType::Subscription as u8, 3);
        assert!(AccessType::try_from(5).is_err());
    }
}
