//! Governance operations: proposals, voting, execution.

use alloy::primitives::{Address, Bytes, U256};
use serde::Serialize;

use crate::chain::{extract_event, TxOutcome};
use crate::client::DataDaoClient;
use crate::contracts::IGovernanceModule;
use crate::error::{ClientError, Result};

/// Category of a governance proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalType {
    General = 0,
    TaskCreation = 1,
    DatasetValidation = 2,
    MembershipRule = 3,
    Treasury = 4,
    ContractUpgrade = 5,
}

impl TryFrom<u8> for ProposalType {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::General),
            1 => Ok(Self::TaskCreation),
            2 => Ok(Self::DatasetValidation),
            3 => Ok(Self::MembershipRule),
            4 => Ok(Self::Treasury),
            5 => Ok(Self::ContractUpgrade),
            _ => Err(ClientError::UnknownDiscriminant {
                kind: "proposal type",
                value,
            }),
        }
    }
}

/// A ballot choice. Discriminants match the on-chain vote encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    For = 1,
    Against = 2,
    Abstain = 3,
}

/// Parameters for a new proposal.
///
/// `targets`, `values`, `calldatas`, and `signatures` describe the calls the
/// proposal will execute if passed, index-aligned.
#[derive(Debug, Clone)]
pub struct NewProposal {
    pub title: String,
    pub description: String,
    pub proposal_type: ProposalType,
    pub targets: Vec<Address>,
    pub values: Vec<U256>,
    pub calldatas: Vec<Bytes>,
    pub signatures: Vec<String>,
}

impl NewProposal {
    fn into_call(self) -> IGovernanceModule::proposeCall {
        IGovernanceModule::proposeCall {
            title: self.title,
            description: self.description,
            proposalType: self.proposal_type as u8,
            targets: self.targets,
            values: self.values,
            calldatas: self.calldatas,
            signatures: self.signatures,
        }
    }
}

/// Receipt and extracted id from proposal creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProposalOutcome {
    pub propose: TxOutcome,
    /// Id from the ProposalCreated event, when it could be extracted.
    pub proposal_id: Option<U256>,
}

/// On-chain proposal record.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalInfo {
    pub id: U256,
    pub proposer: Address,
    pub title: String,
    pub description: String,
    pub proposal_type: ProposalType,
    /// Raw status discriminant as stored on-chain.
    pub status: u8,
    pub start_time: U256,
    pub end_time: U256,
    pub for_votes: U256,
    pub against_votes: U256,
    pub abstain_votes: U256,
    pub executed: bool,
}

impl TryFrom<IGovernanceModule::getProposalReturn> for ProposalInfo {
    type Error = ClientError;

    fn try_from(r: IGovernanceModule::getProposalReturn) -> Result<Self> {
        Ok(Self {
            id: r.id,
            proposer: r.proposer,
            title: r.title,
            description: r.description,
            proposal_type: ProposalType::try_from(r.proposalType)?,
            status: r.status,
            start_time: r.startTime,
            end_time: r.endTime,
            for_votes: r.forVotes,
            against_votes: r.againstVotes,
            abstain_votes: r.abstainVotes,
            executed: r.executed,
        })
    }
}

impl DataDaoClient {
    /// Create a governance proposal.
    pub async fn create_proposal(&self, proposal: NewProposal) -> Result<CreateProposalOutcome> {
        let governance = self.contract("GovernanceModule")?;

        let propose = self
            .submit("GovernanceModule", proposal.into_call(), U256::ZERO)
            .await?;

        let proposal_id = extract_event::<IGovernanceModule::ProposalCreated>(&propose, governance)
            .map(|e| e.proposalId);
        match proposal_id {
            Some(id) => tracing::info!(proposal_id = %id, "Proposal created"),
            None => tracing::warn!("ProposalCreated event not found in receipt"),
        }

        Ok(CreateProposalOutcome {
            propose,
            proposal_id,
        })
    }

    /// Cast a vote on a proposal.
    pub async fn vote_on_proposal(
        &self,
        proposal_id: U256,
        vote: VoteChoice,
    ) -> Result<TxOutcome> {
        self.submit(
            "GovernanceModule",
            IGovernanceModule::castVoteCall {
                proposalId: proposal_id,
                support: vote as u8,
            },
            U256::ZERO,
        )
        .await
    }

    /// Execute a passed proposal.
    pub async fn execute_proposal(&self, proposal_id: U256) -> Result<TxOutcome> {
        self.submit(
            "GovernanceModule",
            IGovernanceModule::executeProposalCall {
                proposalId: proposal_id,
            },
            U256::ZERO,
        )
        .await
    }

    /// Fetch a proposal record.
    pub async fn proposal(&self, proposal_id: U256) -> Result<ProposalInfo> {
        let raw = self
            .view(
                "GovernanceModule",
                IGovernanceModule::getProposalCall {
                    proposalId: proposal_id,
                },
            )
            .await?;
        raw.try_into()
    }
}
