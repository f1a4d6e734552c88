//! Waitlist entry status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Status of a member's place on a class waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    /// In line for a spot.
    Waiting,
    /// A spot was offered and the offer window is running.
    Offered,
    /// The member took the spot.
    Claimed,
    /// The offer window passed without a claim.
    Expired,
    /// The member left the waitlist.
    Cancelled,
}

impl WaitlistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitlistStatus::Waiting => "waiting",
            WaitlistStatus::Offered => "offered",
            WaitlistStatus::Claimed => "claimed",
            WaitlistStatus::Expired => "expired",
            WaitlistStatus::Cancelled => "cancelled",
        }
    }
}

impl StateMachine for WaitlistStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WaitlistStatus::*;
        matches!(
            (self, target),
            (Waiting, Offered)
                | (Waiting, Cancelled)
                | (Offered, Claimed)
                | (Offered, Expired)
                | (Offered, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WaitlistStatus::*;
        match self {
            Waiting => vec![Offered, Cancelled],
            Offered => vec![Claimed, Expired, Cancelled],
            Claimed | Expired | Cancelled => vec![],
        }
    }
}
