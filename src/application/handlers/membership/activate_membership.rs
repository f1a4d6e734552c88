//! ActivateMembershipHandler - Command handler for activating a membership.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{MembershipId, Timestamp};
use crate::domain::membership::{
    grants_for_cycle, CreditGrant, CycleDates, Membership, MembershipError, MembershipStatus,
};
use crate::ports::{CreditGrantRepository, MemberNotifier, MembershipRepository, Notification};

/// Command to activate a membership with its first cycle starting on `start_date`.
#[derive(Debug, Clone)]
pub struct ActivateMembershipCommand {
    pub membership_id: MembershipId,
    pub start_date: NaiveDate,
    pub activated_at: Timestamp,
}

/// Result of a successful activation.
#[derive(Debug, Clone)]
pub struct ActivateMembershipResult {
    pub membership: Membership,
    pub cycle: CycleDates,
    /// Grants created by this call; empty when the cycle was already granted.
    pub grants: Vec<CreditGrant>,
}

/// Handler for activating memberships.
///
/// Running the same command twice leaves one set of grants for the cycle and
/// sends one activation notification.
pub struct ActivateMembershipHandler {
    memberships: Arc<dyn MembershipRepository>,
    grants: Arc<dyn CreditGrantRepository>,
    notifier: Arc<dyn MemberNotifier>,
}

impl ActivateMembershipHandler {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        grants: Arc<dyn CreditGrantRepository>,
        notifier: Arc<dyn MemberNotifier>,
    ) -> Self {
        Self {
            memberships,
            grants,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: ActivateMembershipCommand,
    ) -> Result<ActivateMembershipResult, MembershipError> {
        // 1. Load the membership
        let mut membership = self
            .memberships
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.membership_id))?;

        // 2. Activate (no-op when already active from the same date)
        let was_pending = membership.status == MembershipStatus::Pending;
        let cycle = membership.activate(cmd.start_date, cmd.activated_at)?;
        if was_pending {
            self.memberships.update(&membership).await?;
        }

        // 3. Grant the first cycle unless already granted
        let grants = if self
            .grants
            .exists_for_cycle(&membership.member_id, cycle.cycle_start)
            .await?
        {
            tracing::debug!(
                membership_id = %membership.id,
                cycle_start = %cycle.cycle_start,
                "Cycle already granted"
            );
            Vec::new()
        } else {
            let grants = grants_for_cycle(
                membership.tier,
                &cycle,
                &membership.member_id,
                &membership.user_id,
            );
            self.grants.save_all(&grants).await?;
            grants
        };

        tracing::info!(
            membership_id = %membership.id,
            member_id = %membership.member_id,
            tier = %membership.tier,
            cycle_start = %cycle.cycle_start,
            cycle_end = %cycle.cycle_end,
            grants = grants.len(),
            "Membership activated"
        );

        // 4. Tell the member, once
        if was_pending {
            let notification = Notification::MembershipActivated {
                membership_id: membership.id,
                member_id: membership.member_id.clone(),
                tier: membership.tier,
                grants: grants.len(),
            };
            if let Err(e) = self.notifier.notify(notification).await {
                tracing::warn!(
                    membership_id = %membership.id,
                    error = %e,
                    "Activation notification failed"
                );
            }
        }

        Ok(ActivateMembershipResult {
            membership,
            cycle,
            grants,
        })
    }
}
