//! Waitlist repository port.

use async_trait::async_trait;

use crate::domain::foundation::{ClassSessionId, DomainError, WaitlistEntryId};
use crate::domain::waitlist::{WaitlistEntry, WaitlistStatus};

#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Save a new entry.
    async fn save(&self, entry: &WaitlistEntry) -> Result<(), DomainError>;

    /// Update an existing entry.
    ///
    /// # Errors
    ///
    /// - `WaitlistEntryNotFound` if the entry doesn't exist
    async fn update(&self, entry: &WaitlistEntry) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &WaitlistEntryId) -> Result<Option<WaitlistEntry>, DomainError>;

    /// All entries in `status`, across class sessions.
    async fn find_by_status(&self, status: WaitlistStatus) -> Result<Vec<WaitlistEntry>, DomainError>;

    /// Next waiting entry for a class session (lowest position), if any.
    async fn next_waiting(
        &self,
        class_session_id: &ClassSessionId,
    ) -> Result<Option<WaitlistEntry>, DomainError>;
}
