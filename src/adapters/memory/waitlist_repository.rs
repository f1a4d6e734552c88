//! In-memory WaitlistRepository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{ClassSessionId, DomainError, ErrorCode, WaitlistEntryId};
use crate::domain::waitlist::{WaitlistEntry, WaitlistStatus};
use crate::ports::WaitlistRepository;

#[derive(Default)]
pub struct InMemoryWaitlistRepository {
    entries: RwLock<HashMap<WaitlistEntryId, WaitlistEntry>>,
}

impl InMemoryWaitlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WaitlistRepository for InMemoryWaitlistRepository {
    async fn save(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.id) {
            return Err(DomainError::validation("id", "waitlist entry already exists"));
        }
        entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&entry.id) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::WaitlistEntryNotFound,
                format!("Waitlist entry {} not found", entry.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &WaitlistEntryId) -> Result<Option<WaitlistEntry>, DomainError> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn find_by_status(&self, status: WaitlistStatus) -> Result<Vec<WaitlistEntry>, DomainError> {
        let mut found: Vec<WaitlistEntry> = self
            .entries
            .read()
            .await
            .values()
            .filter(|e| e.status == status)
            .cloned()
            .collect();
        found.sort_by_key(|e| (e.class_session_id, e.position));
        Ok(found)
    }

    async fn next_waiting(
        &self,
        class_session_id: &ClassSessionId,
    ) -> Result<Option<WaitlistEntry>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .values()
            .filter(|e| &e.class_session_id == class_session_id && e.status == WaitlistStatus::Waiting)
            .min_by_key(|e| e.position)
            .cloned())
    }
}
