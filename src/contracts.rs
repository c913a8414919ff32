//! On-chain interface declarations for the DataDAO platform contracts.
//!
//! Only the functions and events the client actually drives are declared.
//! Return parameters are named so decoded values arrive as named fields
//! rather than positional tuples.

use alloy::sol;

sol! {
    /// Logical contract name to deployed address lookup.
    interface IContractRegistry {
        function getContractAddress(string name) external view returns (address addr);
    }

    /// Platform core: membership checks, aggregate stats, usage metering.
    interface IDataDAOCore {
        function isMember(address account) external view returns (bool);

        function getDAOStats() external view returns (
            uint256 memberCount,
            uint256 taskCount,
            uint256 datasetCount,
            uint256 proposalCount
        );

        function recordDatasetUsage(uint256 datasetId, address user) external;
    }

    interface IMembershipManager {
        function joinDAO(uint256 amount) external;

        function getMember(address member) external view returns (
            bool exists,
            uint8 tier,
            uint256 reputation,
            uint256 stakedAmount,
            uint256 joinedAt,
            uint256 lastActivityAt
        );
    }

    interface ITaskManager {
        function createTask(
            string title,
            string description,
            uint8 taskType,
            uint256 reward,
            uint256 reviewReward,
            uint256 requiredSubmissions,
            uint256 requiredValidations,
            uint256 deadline,
            uint8 privacyLevel,
            string accessConditionsCID,
            string instructionsCID
        ) external;

        function submitToTask(uint256 taskId, string cid, bool encrypted) external;

        function validateSubmission(uint256 submissionId, bool approved) external;

        function getTask(uint256 taskId) external view returns (
            uint256 id,
            address creator,
            string title,
            string description,
            uint8 taskType,
            uint8 status,
            uint256 reward,
            uint256 reviewReward,
            uint256 requiredSubmissions,
            uint256 requiredValidations,
            uint256 deadline,
            uint8 privacyLevel,
            string accessConditionsCID,
            string dataCID,
            string instructionsCID,
            uint256 createdAt,
            uint256 completedAt,
            uint256 submissionCount,
            uint256 validatedSubmissionCount
        );

        /// Emitted when a task is created.
        #[derive(Debug)]
        event TaskCreated(uint256 indexed taskId, address indexed creator);

        /// Emitted when a submission is accepted.
        #[derive(Debug)]
        event SubmissionCreated(uint256 indexed submissionId, uint256 indexed taskId, address indexed submitter);
    }

    interface IDatasetRegistry {
        function createDataset(
            string name,
            string description,
            string metadataCID,
            string dataCID,
            bool isEncrypted,
            string accessConditionsCID,
            uint8 accessType,
            uint256 price,
            uint256[] taskIds
        ) external;

        function purchaseAccess(uint256 datasetId, uint256 duration) external;

        function hasAccess(uint256 datasetId, address user) external view returns (bool);

        function getDataset(uint256 datasetId) external view returns (
            uint256 id,
            string name,
            string description,
            address owner,
            string metadataCID,
            string dataCID,
            bool isEncrypted,
            string accessConditionsCID,
            uint8 accessType,
            uint256 price,
            uint256 createdAt,
            bool hasFilecoinDeal,
            uint64 dealId,
            bool validated,
            uint256 usageCount,
            uint256 revenue
        );

        /// Emitted when a dataset is registered.
        #[derive(Debug)]
        event DatasetCreated(uint256 indexed datasetId, address indexed owner);
    }

    /// The dataFIL utility token (ERC-20 plus a testnet faucet).
    interface IDataToken {
        function approve(address spender, uint256 amount) external returns (bool);

        function balanceOf(address account) external view returns (uint256);

        function claimFromFaucet() external;
    }

    interface IGovernanceModule {
        function propose(
            string title,
            string description,
            uint8 proposalType,
            address[] targets,
            uint256[] values,
            bytes[] calldatas,
            string[] signatures
        ) external;

        function castVote(uint256 proposalId, uint8 support) external;

        function executeProposal(uint256 proposalId) external;

        function getProposal(uint256 proposalId) external view returns (
            uint256 id,
            address proposer,
            string title,
            string description,
            uint8 proposalType,
            uint8 status,
            uint256 startTime,
            uint256 endTime,
            uint256 forVotes,
            uint256 againstVotes,
            uint256 abstainVotes,
            bool executed
        );

        /// Emitted when a proposal enters voting.
        #[derive(Debug)]
        event ProposalCreated(uint256 indexed proposalId, address indexed proposer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::{SolCall, SolEvent};

    #[test]
    fn test_event_signatures() {
        assert_eq!(ITaskManager::TaskCreated::SIGNATURE, "TaskCreated(uint256,address)");
        assert_eq!(
            ITaskManager::SubmissionCreated::SIGNATURE,
            "SubmissionCreated(uint256,uint256,address)"
        );
        assert_eq!(
            IDatasetRegistry::DatasetCreated::SIGNATURE,
            "DatasetCreated(uint256,address)"
        );
        assert_eq!(
            IGovernanceModule::ProposalCreated::SIGNATURE,
            "ProposalCreated(uint256,address)"
        );
    }

    #[test]
    fn test_registry_call_shape() {
        let call = IContractRegistry::getContractAddressCall {
            name: "TaskManager".to_string(),
        };
        let encoded = call.abi_encode();
        // 4-byte selector plus one dynamic string argument
        assert!(encoded.len() > 4);
        assert_eq!(&encoded[..4], IContractRegistry::getContractAddressCall::SELECTOR);
    }
}
