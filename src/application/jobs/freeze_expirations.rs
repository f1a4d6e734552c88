//! FreezeExpirationJob - returns frozen memberships to active once the freeze ends.

use std::sync::Arc;

use async_trait::async_trait;

use super::{JobReport, LifecycleJob};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::{MemberNotifier, MembershipRepository, Notification};

pub struct FreezeExpirationJob {
    memberships: Arc<dyn MembershipRepository>,
    notifier: Arc<dyn MemberNotifier>,
}

impl FreezeExpirationJob {
    pub fn new(memberships: Arc<dyn MembershipRepository>, notifier: Arc<dyn MemberNotifier>) -> Self {
        Self { memberships, notifier }
    }

    async fn unfreeze(&self, mut membership: Membership, now: Timestamp) -> Result<(), DomainError> {
        membership.unfreeze(now)?;
        self.memberships.update(&membership).await?;

        let notification = Notification::FreezeEnded {
            membership_id: membership.id,
            member_id: membership.member_id.clone(),
        };
        if let Err(e) = self.notifier.notify(notification).await {
            // membership is already active again
            tracing::warn!(membership_id = %membership.id, error = %e, "Freeze end notification failed");
        }
        Ok(())
    }
}

#[async_trait]
impl LifecycleJob for FreezeExpirationJob {
    fn name(&self) -> &'static str {
        "freeze_expirations"
    }

    async fn run(&self, now: Timestamp) -> Result<JobReport, DomainError> {
        let mut report = JobReport::default();
        let frozen = self.memberships.find_by_status(MembershipStatus::Frozen).await?;

        for membership in frozen.into_iter().filter(|m| m.freeze_elapsed(now)) {
            let membership_id = membership.id;
            match self.unfreeze(membership, now).await {
                Ok(()) => {
                    tracing::info!(membership_id = %membership_id, "Freeze ended");
                    report.processed += 1;
                }
                Err(e) => {
                    tracing::warn!(membership_id = %membership_id, error = %e, "Unfreeze failed");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryMembershipRepository, RecordingNotifier};
    use crate::domain::foundation::{MemberId, MembershipId, UserId};
    use crate::domain::membership::{BillingType, Gender};
    use chrono::{TimeZone, Utc};

    fn at(d: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 6, d, 8, 0, 0).unwrap())
    }

    fn frozen_until(member: &str, until: Timestamp) -> Membership {
        let mut membership = Membership::create_pending(
            MembershipId::new(),
            MemberId::new(member).unwrap(),
            UserId::new(format!("user-{member}")).unwrap(),
            "platinum",
            BillingType::Monthly,
            Gender::Men,
            at(1),
        );
        membership.activate(at(1).date(), at(1)).unwrap();
        membership.freeze(until, at(2)).unwrap();
        membership
    }

    #[tokio::test]
    async fn unfreezes_elapsed_and_notifies() {
        let elapsed = frozen_until("elapsed", at(10));
        let ongoing = frozen_until("ongoing", at(20));
        let repo = Arc::new(InMemoryMembershipRepository::new());
        repo.save(&elapsed).await.unwrap();
        repo.save(&ongoing).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let job = FreezeExpirationJob::new(repo.clone(), notifier.clone());

        let report = job.run(at(10)).await.unwrap();

        assert_eq!(report, JobReport { processed: 1, failed: 0 });
        let stored = repo.find_by_id(&elapsed.id).await.unwrap().unwrap();
        assert_eq!(stored.status, MembershipStatus::Active);
        assert!(stored.freeze_until.is_none());
        assert_eq!(
            repo.find_by_id(&ongoing.id).await.unwrap().unwrap().status,
            MembershipStatus::Frozen
        );
        assert_eq!(notifier.count_of("freeze_ended").await, 1);
    }

    #[tokio::test]
    async fn nothing_due_reports_empty() {
        let repo = Arc::new(InMemoryMembershipRepository::new());
        repo.save(&frozen_until("ongoing", at(20))).await.unwrap();
        let job = FreezeExpirationJob::new(repo, Arc::new(RecordingNotifier::new()));

        assert!(job.run(at(19)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn notification_failure_still_unfreezes() {
        let elapsed = frozen_until("elapsed", at(10));
        let repo = Arc::new(InMemoryMembershipRepository::new());
        repo.save(&elapsed).await.unwrap();
        let job = FreezeExpirationJob::new(repo.clone(), Arc::new(RecordingNotifier::failing()));

        let report = job.run(at(11)).await.unwrap();

        assert_eq!(report.processed, 1);
        assert_eq!(
            repo.find_by_id(&elapsed.id).await.unwrap().unwrap().status,
            MembershipStatus::Active
        );
    }
}
