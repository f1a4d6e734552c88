//! MemberNotifier port - outbound notifications to members.
//!
//! The email-delivery service sits behind this port. The domain only decides
//! *what* to tell a member and when.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{ClassSessionId, DomainError, MemberId, MembershipId, Timestamp, WaitlistEntryId};
use crate::domain::membership::Tier;

/// A message the club sends to a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// Signup has not been activated yet.
    ActivationReminder {
        membership_id: MembershipId,
        member_id: MemberId,
    },
    /// Membership activated and the first cycle's credits granted.
    MembershipActivated {
        membership_id: MembershipId,
        member_id: MemberId,
        tier: Tier,
        grants: usize,
    },
    /// A freeze ended and the membership is active again.
    FreezeEnded {
        membership_id: MembershipId,
        member_id: MemberId,
    },
    /// A class spot opened up for a waitlisted member.
    WaitlistOffer {
        entry_id: WaitlistEntryId,
        member_id: MemberId,
        class_session_id: ClassSessionId,
        expires_at: Timestamp,
    },
}

impl Notification {
    /// Member the notification is addressed to.
    pub fn member_id(&self) -> &MemberId {
        match self {
            Notification::ActivationReminder { member_id, .. }
            | Notification::MembershipActivated { member_id, .. }
            | Notification::FreezeEnded { member_id, .. }
            | Notification::WaitlistOffer { member_id, .. } => member_id,
        }
    }

    /// Template key used by the delivery service.
    pub fn template(&self) -> &'static str {
        match self {
            Notification::ActivationReminder { .. } => "activation_reminder",
            Notification::MembershipActivated { .. } => "membership_activated",
            Notification::FreezeEnded { .. } => "freeze_ended",
            Notification::WaitlistOffer { .. } => "waitlist_offer",
        }
    }
}

/// Port for sending member notifications.
#[async_trait]
pub trait MemberNotifier: Send + Sync {
    /// Send one notification.
    ///
    /// # Errors
    ///
    /// - `NotificationFailed` if delivery could not be queued
    async fn notify(&self, notification: Notification) -> Result<(), DomainError>;
}
