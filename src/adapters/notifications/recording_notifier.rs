//! Notifier that keeps every notification in memory.
//!
//! Used by tests to assert on what members were told. Can be switched into
//! a failing mode to exercise delivery errors.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{MemberNotifier, Notification};

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every delivery fails.
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.set_failing(true);
        notifier
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    // === Test Helpers ===

    /// Every notification delivered so far, in order.
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }

    /// Number of delivered notifications using `template`.
    pub async fn count_of(&self, template: &str) -> usize {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|n| n.template() == template)
            .count()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl MemberNotifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::NotificationFailed,
                format!("Delivery of {} failed", notification.template()),
            ));
        }
        self.sent.lock().await.push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MemberId, MembershipId};

    fn reminder() -> Notification {
        Notification::ActivationReminder {
            membership_id: MembershipId::new(),
            member_id: MemberId::new("member-1").unwrap(),
        }
    }

    #[tokio::test]
    async fn records_in_order() {
        let notifier = RecordingNotifier::new();
        let first = reminder();
        let second = reminder();
        notifier.notify(first.clone()).await.unwrap();
        notifier.notify(second.clone()).await.unwrap();

        assert_eq!(notifier.sent().await, vec![first, second]);
        assert_eq!(notifier.count_of("activation_reminder").await, 2);
        assert_eq!(notifier.count_of("freeze_ended").await, 0);
    }

    #[tokio::test]
    async fn failing_mode_rejects_and_records_nothing() {
        let notifier = RecordingNotifier::failing();
        let err = notifier.notify(reminder()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotificationFailed);
        assert!(notifier.sent().await.is_empty());

        notifier.set_failing(false);
        notifier.notify(reminder()).await.unwrap();
        assert_eq!(notifier.sent().await.len(), 1);
    }
}
