//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `MembershipRepository` - Membership aggregate persistence
//! - `CreditGrantRepository` - Credit grant storage and lookup
//! - `WaitlistRepository` - Waitlist entry storage
//!
//! ## Notification Ports
//!
//! - `MemberNotifier` - Outbound member notifications (email delivery lives behind it)

mod credit_grant_repository;
mod member_notifier;
mod membership_repository;
mod waitlist_repository;

pub use credit_grant_repository::CreditGrantRepository;
pub use member_notifier::{MemberNotifier, Notification};
pub use membership_repository::MembershipRepository;
pub use waitlist_repository::WaitlistRepository;
