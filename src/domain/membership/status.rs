//! Membership status state machine.
//!
//! Defines all membership states and the valid transitions between them.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Membership lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Signed up, waiting for activation (first payment or front-desk check-in).
    Pending,

    /// Credits are granted each cycle and can be redeemed.
    Active,

    /// Temporarily paused until a freeze end date.
    Frozen,

    /// Member cancelled. No new cycles are granted.
    Cancelled,

    /// Membership ended. Terminal.
    Expired,
}

impl MembershipStatus {
    /// Returns true if the member may book and redeem credits.
    pub fn can_redeem(&self) -> bool {
        matches!(self, MembershipStatus::Active)
    }

    /// Stored identifier of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pending",
            MembershipStatus::Active => "active",
            MembershipStatus::Frozen => "frozen",
            MembershipStatus::Cancelled => "cancelled",
            MembershipStatus::Expired => "expired",
        }
    }

    /// Returns true if new credit cycles should be granted.
    pub fn receives_cycles(&self) -> bool {
        matches!(self, MembershipStatus::Active)
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Active)
                | (Pending, Cancelled)
            // From ACTIVE
                | (Active, Frozen)
                | (Active, Cancelled)
                | (Active, Active) // Renewal
            // From FROZEN
                | (Frozen, Active)
                | (Frozen, Cancelled)
            // From CANCELLED
                | (Cancelled, Expired)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Pending => vec![Active, Cancelled],
            Active => vec![Frozen, Cancelled, Active],
            Frozen => vec![Active, Cancelled],
            Cancelled => vec![Expired],
            Expired => vec![],
        }
    }
}
