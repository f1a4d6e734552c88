//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod membership;

pub use membership::{
    ActivateMembershipCommand, ActivateMembershipHandler, ActivateMembershipResult,
    RedeemCreditCommand, RedeemCreditHandler, RedeemCreditResult, RenewCreditCycleCommand,
    RenewCreditCycleHandler, RenewCreditCycleResult,
};
