//! WaitlistExpirationJob - expires unclaimed offers and passes the spot on.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use super::{JobReport, LifecycleJob};
use crate::domain::foundation::{ClassSessionId, DomainError, Timestamp};
use crate::domain::waitlist::{WaitlistEntry, WaitlistStatus};
use crate::ports::{MemberNotifier, Notification, WaitlistRepository};

/// Expires elapsed offers, then offers each freed spot to the next member in line.
///
/// Every expired offer frees one spot in its class session, so a session with
/// two lapsed offers promotes two waiting entries.
pub struct WaitlistExpirationJob {
    waitlist: Arc<dyn WaitlistRepository>,
    notifier: Arc<dyn MemberNotifier>,
    offer_window: Duration,
}

impl WaitlistExpirationJob {
    pub fn new(
        waitlist: Arc<dyn WaitlistRepository>,
        notifier: Arc<dyn MemberNotifier>,
        offer_window: Duration,
    ) -> Self {
        Self {
            waitlist,
            notifier,
            offer_window,
        }
    }

    async fn expire(&self, mut entry: WaitlistEntry) -> Result<ClassSessionId, DomainError> {
        entry.expire()?;
        self.waitlist.update(&entry).await?;
        Ok(entry.class_session_id)
    }

    /// Offer the freed spot in `session`; `Ok(false)` when nobody is waiting.
    async fn offer_next(&self, session: &ClassSessionId, now: Timestamp) -> Result<bool, DomainError> {
        let Some(mut next) = self.waitlist.next_waiting(session).await? else {
            return Ok(false);
        };
        let expires_at = next.offer(now, self.offer_window)?;
        self.waitlist.update(&next).await?;

        tracing::info!(
            entry_id = %next.id,
            class_session_id = %session,
            member_id = %next.member_id,
            expires_at = %expires_at,
            "Waitlist spot offered"
        );

        let notification = Notification::WaitlistOffer {
            entry_id: next.id,
            member_id: next.member_id.clone(),
            class_session_id: *session,
            expires_at,
        };
        if let Err(e) = self.notifier.notify(notification).await {
            tracing::warn!(entry_id = %next.id, error = %e, "Waitlist offer notification failed");
        }
        Ok(true)
    }
}

#[async_trait]
impl LifecycleJob for WaitlistExpirationJob {
    fn name(&self) -> &'static str {
        "waitlist_expirations"
    }

    async fn run(&self, now: Timestamp) -> Result<JobReport, DomainError> {
        let mut report = JobReport::default();
        let offered = self.waitlist.find_by_status(WaitlistStatus::Offered).await?;

        let mut freed = Vec::new();
        for entry in offered.into_iter().filter(|e| e.offer_elapsed(now)) {
            let entry_id = entry.id;
            match self.expire(entry).await {
                Ok(session) => {
                    tracing::info!(entry_id = %entry_id, class_session_id = %session, "Waitlist offer expired");
                    report.processed += 1;
                    freed.push(session);
                }
                Err(e) => {
                    tracing::warn!(entry_id = %entry_id, error = %e, "Waitlist expiry failed");
                    report.failed += 1;
                }
            }
        }

        for session in freed {
            match self.offer_next(&session, now).await {
                Ok(true) => report.processed += 1,
                Ok(false) => {
                    tracing::debug!(class_session_id = %session, "No one waiting for freed spot");
                }
                Err(e) => {
                    tracing::warn!(class_session_id = %session, error = %e, "Waitlist promotion failed");
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
    use crate::adapters::{InMemoryWaitlistRepository, RecordingNotifier};
    use crate::domain::foundation::{MemberId, WaitlistEntryId};
    use chrono::{TimeZone, Utc};

    fn at(h: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 7, 1, h, 0, 0).unwrap())
    }

    fn waiting(session: ClassSessionId, position: u32) -> WaitlistEntry {
        WaitlistEntry::join(
            WaitlistEntryId::new(),
            session,
            MemberId::new(format!("member-{position}")).unwrap(),
            position,
            at(0),
        )
    }

    fn offered(session: ClassSessionId, position: u32, offered_at: Timestamp) -> WaitlistEntry {
        let mut entry = waiting(session, position);
        entry.offer(offered_at, Duration::hours(2)).unwrap();
        entry
    }

    struct Fixture {
        repo: Arc<InMemoryWaitlistRepository>,
        notifier: Arc<RecordingNotifier>,
        job: WaitlistExpirationJob,
    }

    async fn setup(entries: &[WaitlistEntry]) -> Fixture {
        let repo = Arc::new(InMemoryWaitlistRepository::new());
        for entry in entries {
            repo.save(entry).await.unwrap();
        }
        let notifier = Arc::new(RecordingNotifier::new());
        let job = WaitlistExpirationJob::new(repo.clone(), notifier.clone(), Duration::hours(12));
        Fixture { repo, notifier, job }
    }

    #[tokio::test]
    async fn expires_lapsed_offer_and_promotes_next_in_line() {
        let session = ClassSessionId::new();
        let lapsed = offered(session, 1, at(1));
        let third = waiting(session, 3);
        let second = waiting(session, 2);
        let f = setup(&[lapsed.clone(), third.clone(), second.clone()]).await;

        let report = f.job.run(at(3)).await.unwrap();

        assert_eq!(report, JobReport { processed: 2, failed: 0 });
        let lapsed = f.repo.find_by_id(&lapsed.id).await.unwrap().unwrap();
        assert_eq!(lapsed.status, WaitlistStatus::Expired);

        let promoted = f.repo.find_by_id(&second.id).await.unwrap().unwrap();
        assert_eq!(promoted.status, WaitlistStatus::Offered);
        assert_eq!(promoted.offer_expires_at, Some(at(15)));
        assert_eq!(
            f.repo.find_by_id(&third.id).await.unwrap().unwrap().status,
            WaitlistStatus::Waiting
        );

        let sent = f.notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert!(matches!(
            &sent[0],
            Notification::WaitlistOffer { entry_id, .. } if *entry_id == second.id
        ));
    }

    #[tokio::test]
    async fn open_offer_is_left_alone() {
        let session = ClassSessionId::new();
        let open = offered(session, 1, at(1));
        let f = setup(&[open.clone(), waiting(session, 2)]).await;

        let report = f.job.run(at(2)).await.unwrap();

        assert!(report.is_empty());
        assert_eq!(
            f.repo.find_by_id(&open.id).await.unwrap().unwrap().status,
            WaitlistStatus::Offered
        );
    }

    #[tokio::test]
    async fn expiry_with_empty_queue_offers_nothing() {
        let session = ClassSessionId::new();
        let f = setup(&[offered(session, 1, at(1))]).await;

        let report = f.job.run(at(5)).await.unwrap();

        assert_eq!(report, JobReport { processed: 1, failed: 0 });
        assert!(f.notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn each_lapsed_offer_frees_one_spot() {
        let session = ClassSessionId::new();
        let other = ClassSessionId::new();
        let f = setup(&[
            offered(session, 1, at(1)),
            offered(session, 2, at(1)),
            waiting(session, 3),
            waiting(session, 4),
            waiting(session, 5),
            waiting(other, 1),
        ])
        .await;

        f.job.run(at(4)).await.unwrap();

        let offers = f.repo.find_by_status(WaitlistStatus::Offered).await.unwrap();
        let positions: Vec<_> = offers.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![3, 4]);
        assert_eq!(f.repo.next_waiting(&other).await.unwrap().unwrap().position, 1);
    }
}
