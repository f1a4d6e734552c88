//! In-memory repository implementations.
//!
//! State lives behind `tokio::sync::RwLock`; nothing is persisted.

mod credit_grant_repository;
mod membership_repository;
mod waitlist_repository;

pub use credit_grant_repository::InMemoryCreditGrantRepository;
pub use membership_repository::InMemoryMembershipRepository;
pub use waitlist_repository::InMemoryWaitlistRepository;
