//! Membership repository port.
//!
//! Defines the contract for persisting and retrieving Membership aggregates.

use crate::domain::foundation::{DomainError, MemberId, MembershipId};
use crate::domain::membership::{Membership, MembershipStatus};
use async_trait::async_trait;

/// Repository port for Membership aggregate persistence.
///
/// Implementations must ensure:
/// - One membership per `MembershipId`
/// - `update` fails for unknown memberships
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Save a new membership.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the membership already exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Update an existing membership.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if membership doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Find a membership by its ID.
    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;

    /// Find the current membership for a member.
    ///
    /// A member who signed up again after an earlier membership ended has
    /// several. Implementations return the live one, preferring `Active`,
    /// then `Frozen`, then `Pending`, then the ended ones; ties go to the
    /// latest `created_at`.
    async fn find_by_member_id(&self, member_id: &MemberId) -> Result<Option<Membership>, DomainError>;

    /// All memberships currently in `status`.
    ///
    /// Used by the lifecycle jobs to find pending and frozen memberships.
    async fn find_by_status(&self, status: MembershipStatus) -> Result<Vec<Membership>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MembershipRepository) {}
    }
}
