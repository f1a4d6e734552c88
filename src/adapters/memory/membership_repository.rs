//! In-memory MembershipRepository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, MembershipId};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::MembershipRepository;

/// Memberships keyed by id.
#[derive(Default)]
pub struct InMemoryMembershipRepository {
    memberships: RwLock<HashMap<MembershipId, Membership>>,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored memberships.
    pub async fn len(&self) -> usize {
        self.memberships.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.memberships.read().await.is_empty()
    }
}

/// Order in which `find_by_member_id` prefers a member's memberships.
fn lookup_rank(status: MembershipStatus) -> u8 {
    match status {
        MembershipStatus::Active => 0,
        MembershipStatus::Frozen => 1,
        MembershipStatus::Pending => 2,
        MembershipStatus::Cancelled => 3,
        MembershipStatus::Expired => 4,
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut memberships = self.memberships.write().await;
        if memberships.contains_key(&membership.id) {
            return Err(DomainError::validation("id", "membership already exists")
                .with_detail("membership_id", membership.id.to_string()));
        }
        memberships.insert(membership.id, membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut memberships = self.memberships.write().await;
        match memberships.get_mut(&membership.id) {
            Some(stored) => {
                *stored = membership.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("Membership {} not found", membership.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        Ok(self.memberships.read().await.get(id).cloned())
    }

    async fn find_by_member_id(&self, member_id: &MemberId) -> Result<Option<Membership>, DomainError> {
        Ok(self
            .memberships
            .read()
            .await
            .values()
            .filter(|m| &m.member_id == member_id)
            .min_by_key(|m| (lookup_rank(m.status), std::cmp::Reverse(m.created_at)))
            .cloned())
    }

    async fn find_by_status(&self, status: MembershipStatus) -> Result<Vec<Membership>, DomainError> {
        let mut found: Vec<Membership> = self
            .memberships
            .read()
            .await
            .values()
            .filter(|m| m.status == status)
            .cloned()
            .collect();
        found.sort_by_key(|m| m.created_at);
        Ok(found)
    }
}
