//! RedeemCreditHandler - Command handler for spending credits.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::membership::{CreditGrant, CreditType, MembershipError};
use crate::ports::{CreditGrantRepository, MembershipRepository};

/// Command to redeem `credits` of `credit_type` for a member.
#[derive(Debug, Clone)]
pub struct RedeemCreditCommand {
    pub member_id: MemberId,
    pub credit_type: CreditType,
    pub credits: u32,
    pub at: Timestamp,
}

/// Result of a successful redemption.
#[derive(Debug, Clone)]
pub struct RedeemCreditResult {
    /// The grant after redemption.
    pub grant: CreditGrant,
    pub credits_remaining: u32,
}

/// Handler for credit redemption.
///
/// Spends from the usable grant that expires first. When no grant is usable,
/// the grant covering the current day (if any) decides the error.
pub struct RedeemCreditHandler {
    memberships: Arc<dyn MembershipRepository>,
    grants: Arc<dyn CreditGrantRepository>,
}

impl RedeemCreditHandler {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        grants: Arc<dyn CreditGrantRepository>,
    ) -> Self {
        Self { memberships, grants }
    }

    pub async fn handle(&self, cmd: RedeemCreditCommand) -> Result<RedeemCreditResult, MembershipError> {
        let membership = self
            .memberships
            .find_by_member_id(&cmd.member_id)
            .await?
            .ok_or_else(|| MembershipError::NotFoundForMember(cmd.member_id.clone()))?;

        if !membership.status.can_redeem() {
            return Err(MembershipError::invalid_state(
                membership.status.as_str(),
                "redeem credits for",
            ));
        }

        let now = cmd.at.naive();
        let candidates = self
            .grants
            .find_for_member_and_type(&cmd.member_id, cmd.credit_type)
            .await?;

        let mut grant = candidates
            .iter()
            .filter(|g| g.is_usable_at(now))
            .min_by_key(|g| g.expires_at)
            .or_else(|| candidates.iter().find(|g| g.cycle().contains(now.date())))
            .cloned()
            .ok_or_else(|| MembershipError::GrantNotFound {
                member_id: cmd.member_id.clone(),
                credit_type: cmd.credit_type,
            })?;

        let credits_remaining = grant.redeem(cmd.credits, now)?;
        self.grants.update(&grant).await?;

        tracing::info!(
            member_id = %cmd.member_id,
            credit_type = %cmd.credit_type,
            credits = cmd.credits,
            credits_remaining,
            cycle_start = %grant.cycle_start,
            "Credits redeemed"
        );

        Ok(RedeemCreditResult {
            grant,
            credits_remaining,
        })
    }
}
