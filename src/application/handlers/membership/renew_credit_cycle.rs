//! RenewCreditCycleHandler - Command handler for granting a membership's current cycle.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::MembershipId;
use crate::domain::membership::{grants_for_cycle, CreditGrant, CycleDates, MembershipError, MembershipStatus};
use crate::ports::{CreditGrantRepository, MembershipRepository};

/// Command to make sure the cycle containing `today` has been granted.
#[derive(Debug, Clone)]
pub struct RenewCreditCycleCommand {
    pub membership_id: MembershipId,
    pub today: NaiveDate,
}

/// What a renewal did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenewCreditCycleResult {
    /// Grants for a new cycle were created.
    Granted {
        cycle: CycleDates,
        grants: Vec<CreditGrant>,
    },
    /// The cycle had been granted before.
    AlreadyGranted { cycle: CycleDates },
    /// Frozen memberships earn no cycles.
    Skipped { status: MembershipStatus },
}

/// Handler for credit cycle renewal.
pub struct RenewCreditCycleHandler {
    memberships: Arc<dyn MembershipRepository>,
    grants: Arc<dyn CreditGrantRepository>,
}

impl RenewCreditCycleHandler {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        grants: Arc<dyn CreditGrantRepository>,
    ) -> Self {
        Self { memberships, grants }
    }

    pub async fn handle(
        &self,
        cmd: RenewCreditCycleCommand,
    ) -> Result<RenewCreditCycleResult, MembershipError> {
        let membership = self
            .memberships
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.membership_id))?;

        if membership.status == MembershipStatus::Frozen {
            tracing::debug!(membership_id = %membership.id, "Frozen membership skipped");
            return Ok(RenewCreditCycleResult::Skipped {
                status: membership.status,
            });
        }
        if !membership.status.receives_cycles() {
            return Err(MembershipError::invalid_state(membership.status.as_str(), "renew"));
        }

        let cycle = membership.current_cycle(cmd.today).ok_or_else(|| {
            MembershipError::validation("today", "date precedes the membership's first cycle")
        })?;

        if self
            .grants
            .exists_for_cycle(&membership.member_id, cycle.cycle_start)
            .await?
        {
            return Ok(RenewCreditCycleResult::AlreadyGranted { cycle });
        }

        let grants = grants_for_cycle(membership.tier, &cycle, &membership.member_id, &membership.user_id);
        self.grants.save_all(&grants).await?;

        tracing::info!(
            membership_id = %membership.id,
            member_id = %membership.member_id,
            cycle_start = %cycle.cycle_start,
            cycle_end = %cycle.cycle_end,
            grants = grants.len(),
            "Credit cycle renewed"
        );

        Ok(RenewCreditCycleResult::Granted { cycle, grants })
    }
}
