//! Task management operations: creation, submission, validation, lookup.

use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use serde::Serialize;

use crate::chain::{extract_event, TxOutcome};
use crate::client::DataDaoClient;
use crate::contracts::{IDataToken, ITaskManager};
use crate::error::{ClientError, Result};
use crate::storage::{Encryption, UploadReceipt};

/// Kind of work a task asks contributors for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    DataCollection = 0,
    DataLabeling = 1,
    DataValidation = 2,
    DataCuration = 3,
}

impl TryFrom<u8> for TaskType {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::DataCollection),
            1 => Ok(Self::DataLabeling),
            2 => Ok(Self::DataValidation),
            3 => Ok(Self::DataCuration),
            _ => Err(ClientError::UnknownDiscriminant {
                kind: "task type",
                value,
            }),
        }
    }
}

/// Visibility of a task's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    Public = 0,
    Private = 1,
    Restricted = 2,
}

impl TryFrom<u8> for PrivacyLevel {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Public),
            1 => Ok(Self::Private),
            2 => Ok(Self::Restricted),
            _ => Err(ClientError::UnknownDiscriminant {
                kind: "privacy level",
                value,
            }),
        }
    }
}

/// Parameters for a new task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    /// Reward per accepted submission.
    pub reward: U256,
    /// Reward per validation review.
    pub review_reward: U256,
    pub required_submissions: u64,
    pub required_validations: u64,
    /// Unix timestamp.
    pub deadline: u64,
    pub privacy_level: PrivacyLevel,
    /// CID of access conditions (private tasks only).
    pub access_conditions_cid: String,
    /// CID of task instructions.
    pub instructions_cid: String,
}

impl NewTask {
    /// Token amount escrowed up front: submission rewards plus one review
    /// reward per required validation of each submission.
    pub fn total_escrow(&self) -> U256 {
        let submissions = U256::from(self.required_submissions);
        let validations = U256::from(self.required_validations);
        self.reward * submissions + self.review_reward * submissions * validations
    }

    fn into_call(self) -> ITaskManager::createTaskCall {
        ITaskManager::createTaskCall {
            title: self.title,
            description: self.description,
            taskType: self.task_type as u8,
            reward: self.reward,
            reviewReward: self.review_reward,
            requiredSubmissions: U256::from(self.required_submissions),
            requiredValidations: U256::from(self.required_validations),
            deadline: U256::from(self.deadline),
            privacyLevel: self.privacy_level as u8,
            accessConditionsCID: self.access_conditions_cid,
            instructionsCID: self.instructions_cid,
        }
    }
}

/// Receipts and extracted id from task creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskOutcome {
    pub approve: TxOutcome,
    pub create: TxOutcome,
    /// Id from the TaskCreated event, when it could be extracted.
    pub task_id: Option<U256>,
}

/// Data to submit to a task.
#[derive(Debug, Clone)]
pub enum SubmissionPayload {
    /// Upload a file from disk.
    File(PathBuf),
    /// Upload inline text.
    Text(String),
}

/// Result of a task submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub upload: UploadReceipt,
    pub cid: String,
    pub submit: TxOutcome,
    /// Id from the SubmissionCreated event, when it could be extracted.
    pub submission_id: Option<U256>,
}

/// On-chain task record.
#[derive(Debug, Clone, Serialize)]
pub struct TaskInfo {
    pub id: U256,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    /// Raw status discriminant as stored on-chain.
    pub status: u8,
    pub reward: U256,
    pub review_reward: U256,
    pub required_submissions: U256,
    pub required_validations: U256,
    pub deadline: U256,
    pub privacy_level: PrivacyLevel,
    pub access_conditions_cid: String,
    pub data_cid: String,
    pub instructions_cid: String,
    pub created_at: U256,
    pub completed_at: U256,
    pub submission_count: U256,
    pub validated_submission_count: U256,
}

impl TryFrom<ITaskManager::getTaskReturn> for TaskInfo {
    type Error = ClientError;

    fn try_from(r: ITaskManager::getTaskReturn) -> Result<Self> {
        Ok(Self {
            id: r.id,
            creator: r.creator,
            title: r.title,
            description: r.description,
            task_type: TaskType::try_from(r.taskType)?,
            status: r.status,
            reward: r.reward,
            review_reward: r.reviewReward,
            required_submissions: r.requiredSubmissions,
            required_validations: r.requiredValidations,
            deadline: r.deadline,
            privacy_level: PrivacyLevel::try_from(r.privacyLevel)?,
            access_conditions_cid: r.accessConditionsCID,
            data_cid: r.dataCID,
            instructions_cid: r.instructionsCID,
            created_at: r.createdAt,
            completed_at: r.completedAt,
            submission_count: r.submissionCount,
            validated_submission_count: r.validatedSubmissionCount,
        })
    }
}

impl DataDaoClient {
    /// Create a task, escrowing its full reward budget first.
    pub async fn create_task(&self, task: NewTask) -> Result<CreateTaskOutcome> {
        let task_manager = self.contract("TaskManager")?;
        let escrow = task.total_escrow();

        let approve = self
            .submit(
                "DataToken",
                IDataToken::approveCall {
                    spender: task_manager,
                    amount: escrow,
                },
                U256::ZERO,
            )
            .await?;

        let create = self
            .submit("TaskManager", task.into_call(), U256::ZERO)
            .await?;

        let task_id =
            extract_event::<ITaskManager::TaskCreated>(&create, task_manager).map(|e| e.taskId);
        match task_id {
            Some(id) => tracing::info!(task_id = %id, "Task created"),
            None => tracing::warn!("TaskCreated event not found in receipt"),
        }

        Ok(CreateTaskOutcome {
            approve,
            create,
            task_id,
        })
    }

    /// Submit data to a task: upload to storage, then record the CID on-chain.
    ///
    /// Encrypted submissions require access conditions and a configured
    /// signing key for the storage auth flow.
    pub async fn submit_to_task(
        &self,
        task_id: U256,
        payload: SubmissionPayload,
        encrypt: bool,
        access_conditions: Option<serde_json::Value>,
    ) -> Result<SubmitOutcome> {
        let storage = self.storage()?;

        let encryption = if encrypt {
            let conditions = access_conditions.ok_or(ClientError::MissingAccessConditions)?;
            let auth_token = self.storage_auth_token().await?;
            Some(Encryption {
                access_conditions: conditions,
                auth_token,
            })
        } else {
            None
        };

        let upload = match &payload {
            SubmissionPayload::File(path) => storage.upload_file(path, encryption.as_ref()).await?,
            SubmissionPayload::Text(text) => storage.upload_text(text, encryption.as_ref()).await?,
        };
        let cid = upload.hash.clone();

        let task_manager = self.contract("TaskManager")?;
        let submit = self
            .submit(
                "TaskManager",
                ITaskManager::submitToTaskCall {
                    taskId: task_id,
                    cid: cid.clone(),
                    encrypted: encrypt,
                },
                U256::ZERO,
            )
            .await?;

        let submission_id = extract_event::<ITaskManager::SubmissionCreated>(&submit, task_manager)
            .map(|e| e.submissionId);
        if submission_id.is_none() {
            tracing::warn!("SubmissionCreated event not found in receipt");
        }

        Ok(SubmitOutcome {
            upload,
            cid,
            submit,
            submission_id,
        })
    }

    /// Approve or reject a submission.
    pub async fn validate_submission(
        &self,
        submission_id: U256,
        approved: bool,
    ) -> Result<TxOutcome> {
        self.submit(
            "TaskManager",
            ITaskManager::validateSubmissionCall {
                submissionId: submission_id,
                approved,
            },
            U256::ZERO,
        )
        .await
    }

    /// Fetch a task record.
    pub async fn task(&self, task_id: U256) -> Result<TaskInfo> {
        let raw = self
            .view("TaskManager", ITaskManager::getTaskCall { taskId: task_id })
            .await?;
        raw.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> NewTask {
        NewTask {
            title: "Collect images of cats".to_string(),
            description: "High-quality cat images".to_string(),
            task_type: TaskType::DataCollection,
            reward: U256::from(10),
            review_reward: U256::from(2),
            required_submissions: 5,
            required_validations: 2,
            deadline: 1_800_000_000,
            privacy_level: PrivacyLevel::Public,
            access_conditions_cid: String::new(),
            instructions_cid: String::new(),
        }
    }

    #[test]
    fn test_total_escrow() {
        // 10 * 5 + 2 * 5 * 2 = 70
        assert_eq!(sample_task().total_escrow(), U256::from(70));
    }

    #[test]
    fn test_task_type_conversions() {
        assert_eq!(TaskType::try_from(1).unwrap(), TaskType::DataLabeling);
        assert_eq!(TaskType::DataCuration as u8, 3);
        assert!(matches!(
            TaskType::try_from(9),
            Err(ClientError::UnknownDiscriminant { value: 9, .. })
        ));
    }

    #[test]
    fn test_task_info_mapping() {
        let raw = ITaskManager::getTaskReturn {
            id: U256::from(1),
            creator: Address::repeat_byte(0xaa),
            title: "t".to_string(),
            description: "d".to_string(),
            taskType: 2,
            status: 1,
            reward: U256::from(10),
            reviewReward: U256::from(2),
            requiredSubmissions: U256::from(5),
            requiredValidations: U256::from(2),
            deadline: U256::from(1_800_000_000u64),
            privacyLevel: 0,
            accessConditionsCID: String::new(),
            dataCID: "QmData".to_string(),
            instructionsCID: "QmInstr".to_string(),
            createdAt: U256::from(1_700_000_000u64),
            completedAt: U256::ZERO,
            submissionCount: U256::from(3),
            validatedSubmissionCount: U256::from(1),
        };

        let info = TaskInfo::try_from(raw).unwrap();
        assert_eq!(info.id, U256::from(1));
        assert_eq!(info.task_type, TaskType::DataValidation);
        assert_eq!(info.privacy_level, PrivacyLevel::Public);
        assert_eq!(info.data_cid, "QmData");
        assert_eq!(info.submission_count, U256::from(3));
    }

    #[test]
    fn test_task_info_unknown_type_rejected() {
        let mut raw = ITaskManager::getTaskReturn {
            id: U256::ZERO,
            creator: Address::ZERO,
            title: String::new(),
            description: String::new(),
            taskType: 0,
            status: 0,
            reward: U256::ZERO,
            reviewReward: U256::ZERO,
            requiredSubmissions: U256::ZERO,
            requiredValidations: U256::ZERO,
            deadline: U256::ZERO,
            privacyLevel: 0,
            accessConditionsCID: String::new(),
            dataCID: String::new(),
            instructionsCID: String::new(),
            createdAt: U256::ZERO,
            completedAt: U256::ZERO,
            submissionCount: U256::ZERO,
            validatedSubmissionCount: U256::ZERO,
        };
        raw.taskType = 250;
        assert!(TaskInfo::try_from(raw).is_err());
    }
}
