//! Lifecycle jobs - periodic sweeps over memberships and waitlists.
//!
//! Each job finds the records that are due at `now`, moves them along their
//! state machine and notifies the affected members. Records that are not due
//! are left untouched, so running a job twice in a row is harmless.

mod activation_reminders;
mod freeze_expirations;
mod scheduler;
mod waitlist_expirations;

pub use activation_reminders::ActivationReminderJob;
pub use freeze_expirations::FreezeExpirationJob;
pub use scheduler::{LifecycleScheduler, PassReport};
pub use waitlist_expirations::WaitlistExpirationJob;

use std::ops::AddAssign;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};

/// Outcome of one job run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobReport {
    /// Records moved to their next state.
    pub processed: usize,
    /// Due records that could not be handled this run.
    pub failed: usize,
}

impl JobReport {
    pub fn is_empty(&self) -> bool {
        self.processed == 0 && self.failed == 0
    }
}

impl AddAssign for JobReport {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.failed += other.failed;
    }
}

/// A periodic lifecycle sweep.
#[async_trait]
pub trait LifecycleJob: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Process every record due at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the due records cannot be listed. Failures
    /// on individual records are counted in the report.
    async fn run(&self, now: Timestamp) -> Result<JobReport, DomainError>;
}
