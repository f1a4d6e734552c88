//! Membership aggregate entity.
//!
//! The Membership aggregate represents a member's subscription at the club.
//!
//! # Design Decisions
//!
//! - **Tier label kept verbatim**: the raw label is stored next to the resolved tier
//! - **Cycle anchor**: the activation date anchors every later credit cycle
//! - **Explicit clock**: every mutation takes `now`, nothing reads the system time

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    membership_price, resolve_tier, BillingType, CreditAllocation, CycleDates, Gender,
    MembershipError, MembershipStatus, PriceEntry, Tier,
};
use crate::domain::foundation::{MemberId, MembershipId, StateMachine, Timestamp, UserId};

/// Membership aggregate - a member's subscription.
///
/// # Invariants
///
/// - `cycle_anchor` and `activated_at` are set once the membership has been active
/// - `freeze_until` is set exactly while the status is `Frozen`
/// - status transitions follow [`MembershipStatus`] rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub member_id: MemberId,
    pub user_id: UserId,

    /// Tier label as received from signup or the payment processor.
    pub tier_label: String,
    /// Tier resolved from `tier_label`.
    pub tier: Tier,

    pub status: MembershipStatus,
    pub billing_type: BillingType,
    pub gender: Gender,

    /// First day of the first credit cycle.
    pub cycle_anchor: Option<NaiveDate>,

    pub created_at: Timestamp,
    pub activated_at: Option<Timestamp>,
    /// End of the current freeze, while frozen.
    pub freeze_until: Option<Timestamp>,
    /// When the activation reminder went out (at most once).
    pub reminder_sent_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl Membership {
    /// Create a new membership awaiting activation.
    pub fn create_pending(
        id: MembershipId,
        member_id: MemberId,
        user_id: UserId,
        tier_label: impl Into<String>,
        billing_type: BillingType,
        gender: Gender,
        now: Timestamp,
    ) -> Self {
        let tier_label = tier_label.into();
        Self {
            id,
            member_id,
            user_id,
            tier: resolve_tier(&tier_label),
            tier_label,
            status: MembershipStatus::Pending,
            billing_type,
            gender,
            cycle_anchor: None,
            created_at: now,
            activated_at: None,
            freeze_until: None,
            reminder_sent_at: None,
            cancelled_at: None,
            updated_at: now,
        }
    }

    /// Credits this membership's tier grants per cycle.
    pub fn allocation(&self) -> CreditAllocation {
        CreditAllocation::for_tier(self.tier)
    }

    /// Catalog price of this membership, `None` if the combination is not sold.
    pub fn price(&self) -> Option<PriceEntry> {
        membership_price(self.tier, self.billing_type, self.gender)
    }

    /// Activate the membership with its first cycle starting on `start`.
    ///
    /// Activating an already active membership with the same start date is a
    /// no-op, so a retried activation returns the same cycle.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the membership is not pending, or is active
    /// with a different anchor.
    pub fn activate(&mut self, start: NaiveDate, now: Timestamp) -> Result<CycleDates, MembershipError> {
        if self.status == MembershipStatus::Active && self.cycle_anchor == Some(start) {
            return Ok(CycleDates::for_period(start, 0));
        }
        if self.status != MembershipStatus::Pending {
            return Err(MembershipError::invalid_state(self.status.as_str(), "activate"));
        }
        self.transition_to(MembershipStatus::Active, "activate")?;
        self.cycle_anchor = Some(start);
        self.activated_at = Some(now);
        self.updated_at = now;
        Ok(CycleDates::for_period(start, 0))
    }

    /// The credit cycle containing `today`, if the membership has been activated.
    pub fn current_cycle(&self, today: NaiveDate) -> Option<CycleDates> {
        self.cycle_anchor
            .and_then(|anchor| CycleDates::containing(anchor, today))
    }

    /// Freeze the membership until `until`.
    ///
    /// # Errors
    ///
    /// - `Validation` if `until` is not after `now`
    /// - `InvalidState` if the membership is not active
    pub fn freeze(&mut self, until: Timestamp, now: Timestamp) -> Result<(), MembershipError> {
        if !until.is_after(&now) {
            return Err(MembershipError::validation(
                "freeze_until",
                "freeze end must be in the future",
            ));
        }
        self.transition_to(MembershipStatus::Frozen, "freeze")?;
        self.freeze_until = Some(until);
        self.updated_at = now;
        Ok(())
    }

    /// End a freeze and return to active.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the membership is not frozen.
    pub fn unfreeze(&mut self, now: Timestamp) -> Result<(), MembershipError> {
        if self.status != MembershipStatus::Frozen {
            return Err(MembershipError::invalid_state(self.status.as_str(), "unfreeze"));
        }
        self.transition_to(MembershipStatus::Active, "unfreeze")?;
        self.freeze_until = None;
        self.updated_at = now;
        Ok(())
    }

    /// Cancel this membership.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the transition is not allowed.
    pub fn cancel(&mut self, now: Timestamp) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Cancelled, "cancel")?;
        self.freeze_until = None;
        self.cancelled_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Mark a cancelled membership as expired.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the membership is not cancelled.
    pub fn expire(&mut self, now: Timestamp) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Expired, "expire")?;
        self.updated_at = now;
        Ok(())
    }

    /// True if the membership has waited at least `after_days` for activation
    /// and no reminder has been sent yet.
    pub fn activation_reminder_due(&self, now: Timestamp, after_days: u32) -> bool {
        self.status == MembershipStatus::Pending
            && self.reminder_sent_at.is_none()
            && now.duration_since(&self.created_at).num_days() >= i64::from(after_days)
    }

    /// Record that the activation reminder went out.
    pub fn mark_reminder_sent(&mut self, now: Timestamp) {
        self.reminder_sent_at = Some(now);
        self.updated_at = now;
    }

    /// Undo `mark_reminder_sent` after a delivery that did not go out.
    pub fn clear_reminder_sent(&mut self) {
        self.reminder_sent_at = None;
    }

    /// True if frozen and the freeze end has been reached.
    pub fn freeze_elapsed(&self, now: Timestamp) -> bool {
        self.status == MembershipStatus::Frozen
            && self.freeze_until.is_some_and(|until| !now.is_before(&until))
    }

    fn transition_to(&mut self, target: MembershipStatus, attempted: &str) -> Result<(), MembershipError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| MembershipError::invalid_state(self.status.as_str(), attempted))?;
        Ok(())
    }
}
