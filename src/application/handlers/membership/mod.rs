//! Membership handlers.
//!
//! Command handlers for the credit side of the membership lifecycle:
//!
//! ## Commands
//! - Activating a membership and granting its first cycle
//! - Granting the cycle that contains a given day
//! - Redeeming credits

mod activate_membership;
mod redeem_credit;
mod renew_credit_cycle;

pub use activate_membership::{
    ActivateMembershipCommand, ActivateMembershipHandler, ActivateMembershipResult,
};
pub use redeem_credit::{RedeemCreditCommand, RedeemCreditHandler, RedeemCreditResult};
pub use renew_credit_cycle::{
    RenewCreditCycleCommand, RenewCreditCycleHandler, RenewCreditCycleResult,
};
