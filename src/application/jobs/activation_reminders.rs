//! ActivationReminderJob - nudges members whose signup was never activated.

use std::sync::Arc;

use async_trait::async_trait;

use super::{JobReport, LifecycleJob};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::{MemberNotifier, MembershipRepository, Notification};

/// Sends one reminder to each membership pending for at least `remind_after_days`.
pub struct ActivationReminderJob {
    memberships: Arc<dyn MembershipRepository>,
    notifier: Arc<dyn MemberNotifier>,
    remind_after_days: u32,
}

impl ActivationReminderJob {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        notifier: Arc<dyn MemberNotifier>,
        remind_after_days: u32,
    ) -> Self {
        Self {
            memberships,
            notifier,
            remind_after_days,
        }
    }

    /// Records the reminder before sending it; a failed send clears the
    /// record again for the next pass.
    async fn remind(&self, mut membership: Membership, now: Timestamp) -> Result<(), DomainError> {
        membership.mark_reminder_sent(now);
        self.memberships.update(&membership).await?;

        let sent = self
            .notifier
            .notify(Notification::ActivationReminder {
                membership_id: membership.id,
                member_id: membership.member_id.clone(),
            })
            .await;

        if let Err(e) = sent {
            membership.clear_reminder_sent();
            if let Err(rollback) = self.memberships.update(&membership).await {
                tracing::error!(
                    membership_id = %membership.id,
                    error = %rollback,
                    "Could not clear reminder after failed delivery"
                );
            }
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl LifecycleJob for ActivationReminderJob {
    fn name(&self) -> &'static str {
        "activation_reminders"
    }

    async fn run(&self, now: Timestamp) -> Result<JobReport, DomainError> {
        let mut report = JobReport::default();
        let pending = self.memberships.find_by_status(MembershipStatus::Pending).await?;

        for membership in pending
            .into_iter()
            .filter(|m| m.activation_reminder_due(now, self.remind_after_days))
        {
            let membership_id = membership.id;
            match self.remind(membership, now).await {
                Ok(()) => {
                    tracing::info!(membership_id = %membership_id, "Activation reminder sent");
                    report.processed += 1;
                }
                Err(e) => {
                    tracing::warn!(membership_id = %membership_id, error = %e, "Activation reminder failed");
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
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap())
    }

    fn pending_since(member: &str, created: Timestamp) -> Membership {
        Membership::create_pending(
            MembershipId::new(),
            MemberId::new(member).unwrap(),
            UserId::new(format!("user-{member}")).unwrap(),
            "gold",
            BillingType::Monthly,
            Gender::Women,
            created,
        )
    }

    async fn setup(
        memberships: &[Membership],
        notifier: Arc<RecordingNotifier>,
    ) -> (ActivationReminderJob, Arc<InMemoryMembershipRepository>) {
        let repo = Arc::new(InMemoryMembershipRepository::new());
        for membership in memberships {
            repo.save(membership).await.unwrap();
        }
        (ActivationReminderJob::new(repo.clone(), notifier, 3), repo)
    }

    #[tokio::test]
    async fn reminds_only_memberships_past_the_delay() {
        let due = pending_since("due", at(1));
        let fresh = pending_since("fresh", at(3));
        let notifier = Arc::new(RecordingNotifier::new());
        let (job, repo) = setup(&[due.clone(), fresh.clone()], notifier.clone()).await;

        let report = job.run(at(4)).await.unwrap();

        assert_eq!(report, JobReport { processed: 1, failed: 0 });
        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].member_id(), &due.member_id);

        let stored = repo.find_by_id(&due.id).await.unwrap().unwrap();
        assert_eq!(stored.reminder_sent_at, Some(at(4)));
        let untouched = repo.find_by_id(&fresh.id).await.unwrap().unwrap();
        assert!(untouched.reminder_sent_at.is_none());
    }

    #[tokio::test]
    async fn sends_at_most_one_reminder() {
        let notifier = Arc::new(RecordingNotifier::new());
        let (job, _) = setup(&[pending_since("due", at(1))], notifier.clone()).await;

        job.run(at(5)).await.unwrap();
        let second = job.run(at(6)).await.unwrap();

        assert!(second.is_empty());
        assert_eq!(notifier.count_of("activation_reminder").await, 1);
    }

    #[tokio::test]
    async fn skips_active_memberships() {
        let mut active = pending_since("active", at(1));
        active.activate(at(2).date(), at(2)).unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let (job, _) = setup(&[active], notifier.clone()).await;

        assert!(job.run(at(10)).await.unwrap().is_empty());
        assert!(notifier.sent().await.is_empty());
    }

    /// Delegates to the in-memory repository but rejects every update.
    struct RejectingUpdates(InMemoryMembershipRepository);

    #[async_trait]
    impl MembershipRepository for RejectingUpdates {
        async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
            self.0.save(membership).await
        }

        async fn update(&self, _membership: &Membership) -> Result<(), DomainError> {
            Err(DomainError::new(
                crate::domain::foundation::ErrorCode::DatabaseError,
                "write refused",
            ))
        }

        async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
            self.0.find_by_id(id).await
        }

        async fn find_by_member_id(&self, member_id: &MemberId) -> Result<Option<Membership>, DomainError> {
            self.0.find_by_member_id(member_id).await
        }

        async fn find_by_status(&self, status: MembershipStatus) -> Result<Vec<Membership>, DomainError> {
            self.0.find_by_status(status).await
        }
    }

    #[tokio::test]
    async fn unrecorded_reminder_is_never_sent() {
        let repo = Arc::new(RejectingUpdates(InMemoryMembershipRepository::new()));
        repo.save(&pending_since("due", at(1))).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let job = ActivationReminderJob::new(repo, notifier.clone(), 3);

        let first = job.run(at(5)).await.unwrap();
        let second = job.run(at(6)).await.unwrap();

        assert_eq!(first, JobReport { processed: 0, failed: 1 });
        assert_eq!(second, JobReport { processed: 0, failed: 1 });
        assert!(notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn failed_delivery_is_retried_next_run() {
        let due = pending_since("due", at(1));
        let notifier = Arc::new(RecordingNotifier::failing());
        let (job, repo) = setup(&[due.clone()], notifier.clone()).await;

        let report = job.run(at(5)).await.unwrap();
        assert_eq!(report, JobReport { processed: 0, failed: 1 });
        assert!(repo.find_by_id(&due.id).await.unwrap().unwrap().reminder_sent_at.is_none());

        notifier.set_failing(false);
        let report = job.run(at(6)).await.unwrap();
        assert_eq!(report.processed, 1);
    }
}
