//! DAO membership operations.

use alloy::primitives::{Address, U256};
use serde::Serialize;

use crate::chain::TxOutcome;
use crate::client::DataDaoClient;
use crate::contracts::{IDataDAOCore, IDataToken, IMembershipManager};
use crate::error::Result;

/// On-chain membership record.
#[derive(Debug, Clone, Serialize)]
pub struct MemberInfo {
    pub exists: bool,
    pub tier: u8,
    pub reputation: U256,
    pub staked_amount: U256,
    pub joined_at: U256,
    pub last_activity_at: U256,
}

impl From<IMembershipManager::getMemberReturn> for MemberInfo {
    fn from(r: IMembershipManager::getMemberReturn) -> Self {
        Self {
            exists: r.exists,
            tier: r.tier,
            reputation: r.reputation,
            staked_amount: r.stakedAmount,
            joined_at: r.joinedAt,
            last_activity_at: r.lastActivityAt,
        }
    }
}

/// Receipts from the two-transaction join sequence.
#[derive(Debug, Clone, Serialize)]
pub struct JoinDaoOutcome {
    pub approve: TxOutcome,
    pub join: TxOutcome,
}

impl DataDaoClient {
    /// Join the DAO by staking `amount` of the platform token.
    ///
    /// Two sequential transactions: token approval, then the join itself.
    /// The approval can succeed while the join fails; both receipts are
    /// returned so callers can see which happened.
    pub async fn join_dao(&self, amount: U256) -> Result<JoinDaoOutcome> {
        let membership_manager = self.contract("MembershipManager")?;

        let approve = self
            .submit(
                "DataToken",
                IDataToken::approveCall {
                    spender: membership_manager,
                    amount,
                },
                U256::ZERO,
            )
            .await?;

        let join = self
            .submit(
                "MembershipManager",
                IMembershipManager::joinDAOCall { amount },
                U256::ZERO,
            )
            .await?;

        tracing::info!(staked = %amount, "Joined DAO");
        Ok(JoinDaoOutcome { approve, join })
    }

    /// Membership record for `address` (defaults to the wallet's).
    pub async fn member_info(&self, address: Option<Address>) -> Result<MemberInfo> {
        let member = self.subject(address)?;
        let info = self
            .view(
                "MembershipManager",
                IMembershipManager::getMemberCall { member },
            )
            .await?;
        Ok(info.into())
    }

    /// Whether `address` (defaults to the wallet's) is a DAO member.
    pub async fn is_member(&self, address: Option<Address>) -> Result<bool> {
        let account = self.subject(address)?;
        self.view("DataDAOCore", IDataDAOCore::isMemberCall { account })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_info_mapping() {
        let raw = IMembershipManager::getMemberReturn {
            exists: true,
            tier: 2,
            reputation: U256::from(850),
            stakedAmount: U256::from(100_000),
            joinedAt: U256::from(1_700_000_000u64),
            lastActivityAt: U256::from(1_700_100_000u64),
        };

        let info = MemberInfo::from(raw);
        assert!(info.exists);
        assert_eq!(info.tier, 2);
        assert_eq!(info.reputation, U256::from(850));
        assert_eq!(info.staked_amount, U256::from(100_000));
        assert_eq!(info.joined_at, U256::from(1_700_000_000u64));
        assert_eq!(info.last_activity_at, U256::from(1_700_100_000u64));
    }
}
