//! Credit grant repository port.
//!
//! Grants are keyed by (member, credit type, cycle start). The repository does
//! not dedupe; handlers check [`CreditGrantRepository::exists_for_cycle`]
//! before saving a cycle's grants.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::{CreditGrant, CreditType};

#[async_trait]
pub trait CreditGrantRepository: Send + Sync {
    /// Persist the grants of one cycle.
    async fn save_all(&self, grants: &[CreditGrant]) -> Result<(), DomainError>;

    /// Replace a stored grant (matched on member, credit type and cycle start).
    ///
    /// # Errors
    ///
    /// - `GrantNotFound` if no such grant is stored
    async fn update(&self, grant: &CreditGrant) -> Result<(), DomainError>;

    /// All grants of a member, oldest cycle first.
    async fn find_for_member(&self, member_id: &MemberId) -> Result<Vec<CreditGrant>, DomainError>;

    /// Grants of one credit type for a member, oldest cycle first.
    async fn find_for_member_and_type(
        &self,
        member_id: &MemberId,
        credit_type: CreditType,
    ) -> Result<Vec<CreditGrant>, DomainError>;

    /// True if any grant exists for the member's cycle starting on `cycle_start`.
    async fn exists_for_cycle(
        &self,
        member_id: &MemberId,
        cycle_start: NaiveDate,
    ) -> Result<bool, DomainError>;
}
