//! Notifier that writes each notification to the structured log.
//!
//! Stands in for the email-delivery service in local runs; the log line
//! carries the template key and the full payload as JSON.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{MemberNotifier, Notification};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MemberNotifier for TracingNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&notification).map_err(|e| {
            DomainError::new(
                ErrorCode::NotificationFailed,
                format!("Failed to serialize notification: {}", e),
            )
        })?;

        tracing::info!(
            template = notification.template(),
            member_id = %notification.member_id(),
            payload = %payload,
            "Member notification"
        );
        Ok(())
    }
}
