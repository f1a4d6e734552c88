//! Application layer - Command handlers and lifecycle jobs.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
pub mod jobs;

pub use handlers::{
    ActivateMembershipCommand, ActivateMembershipHandler, ActivateMembershipResult,
    RedeemCreditCommand, RedeemCreditHandler, RedeemCreditResult, RenewCreditCycleCommand,
    RenewCreditCycleHandler, RenewCreditCycleResult,
};
pub use jobs::{
    ActivationReminderJob, FreezeExpirationJob, JobReport, LifecycleJob, LifecycleScheduler,
    PassReport, WaitlistExpirationJob,
};
