//! Waitlist entry entity.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{WaitlistError, WaitlistStatus};
use crate::domain::foundation::{
    ClassSessionId, MemberId, StateMachine, Timestamp, WaitlistEntryId,
};

/// A member's place in line for a class session.
///
/// # Invariants
///
/// - `offered_at` and `offer_expires_at` are set once the entry has been offered
/// - lower `position` is served first within a class session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: WaitlistEntryId,
    pub class_session_id: ClassSessionId,
    pub member_id: MemberId,
    pub position: u32,
    pub status: WaitlistStatus,
    pub offered_at: Option<Timestamp>,
    pub offer_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl WaitlistEntry {
    /// Join the waitlist at `position`.
    pub fn join(
        id: WaitlistEntryId,
        class_session_id: ClassSessionId,
        member_id: MemberId,
        position: u32,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            class_session_id,
            member_id,
            position,
            status: WaitlistStatus::Waiting,
            offered_at: None,
            offer_expires_at: None,
            created_at: now,
        }
    }

    /// Offer an open spot for `window`.
    pub fn offer(&mut self, now: Timestamp, window: Duration) -> Result<Timestamp, WaitlistError> {
        self.transition_to(WaitlistStatus::Offered, "offer")?;
        let expires_at = Timestamp::from_datetime(*now.as_datetime() + window);
        self.offered_at = Some(now);
        self.offer_expires_at = Some(expires_at);
        Ok(expires_at)
    }

    /// Claim the offered spot.
    ///
    /// # Errors
    ///
    /// - `OfferExpired` if the offer window has passed
    /// - `InvalidState` if no offer is outstanding
    pub fn claim(&mut self, now: Timestamp) -> Result<(), WaitlistError> {
        if let Some(expires_at) = self.offer_expires_at {
            if self.status == WaitlistStatus::Offered && !now.is_before(&expires_at) {
                return Err(WaitlistError::OfferExpired(expires_at));
            }
        }
        self.transition_to(WaitlistStatus::Claimed, "claim")
    }

    /// Expire an unclaimed offer.
    pub fn expire(&mut self) -> Result<(), WaitlistError> {
        self.transition_to(WaitlistStatus::Expired, "expire")
    }

    /// Leave the waitlist.
    pub fn cancel(&mut self) -> Result<(), WaitlistError> {
        self.transition_to(WaitlistStatus::Cancelled, "cancel")
    }

    /// True if an offer is outstanding and its window has passed.
    pub fn offer_elapsed(&self, now: Timestamp) -> bool {
        self.status == WaitlistStatus::Offered
            && self
                .offer_expires_at
                .is_some_and(|expires_at| !now.is_before(&expires_at))
    }

    fn transition_to(&mut self, target: WaitlistStatus, attempted: &str) -> Result<(), WaitlistError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| WaitlistError::invalid_state(self.status.as_str(), attempted))?;
        Ok(())
    }
}
