//! In-memory CreditGrantRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::domain::membership::{CreditGrant, CreditType};
use crate::ports::CreditGrantRepository;

#[derive(Default)]
pub struct InMemoryCreditGrantRepository {
    grants: RwLock<Vec<CreditGrant>>,
}

impl InMemoryCreditGrantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored grant, in insertion order.
    pub async fn all(&self) -> Vec<CreditGrant> {
        self.grants.read().await.clone()
    }
}

fn same_key(a: &CreditGrant, b: &CreditGrant) -> bool {
    a.member_id == b.member_id && a.credit_type == b.credit_type && a.cycle_start == b.cycle_start
}

#[async_trait]
impl CreditGrantRepository for InMemoryCreditGrantRepository {
    async fn save_all(&self, grants: &[CreditGrant]) -> Result<(), DomainError> {
        self.grants.write().await.extend_from_slice(grants);
        Ok(())
    }

    async fn update(&self, grant: &CreditGrant) -> Result<(), DomainError> {
        let mut grants = self.grants.write().await;
        match grants.iter_mut().find(|stored| same_key(stored, grant)) {
            Some(stored) => {
                *stored = grant.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::GrantNotFound,
                format!(
                    "No {} grant for member {} starting {}",
                    grant.credit_type, grant.member_id, grant.cycle_start
                ),
            )),
        }
    }

    async fn find_for_member(&self, member_id: &MemberId) -> Result<Vec<CreditGrant>, DomainError> {
        let mut found: Vec<CreditGrant> = self
            .grants
            .read()
            .await
            .iter()
            .filter(|g| &g.member_id == member_id)
            .cloned()
            .collect();
        found.sort_by_key(|g| (g.cycle_start, g.credit_type));
        Ok(found)
    }

    async fn find_for_member_and_type(
        &self,
        member_id: &MemberId,
        credit_type: CreditType,
    ) -> Result<Vec<CreditGrant>, DomainError> {
        Ok(self
            .find_for_member(member_id)
            .await?
            .into_iter()
            .filter(|g| g.credit_type == credit_type)
            .collect())
    }

    async fn exists_for_cycle(
        &self,
        member_id: &MemberId,
        cycle_start: NaiveDate,
    ) -> Result<bool, DomainError> {
        Ok(self
            .grants
            .read()
            .await
            .iter()
            .any(|g| &g.member_id == member_id && g.cycle_start == cycle_start))
    }
}
