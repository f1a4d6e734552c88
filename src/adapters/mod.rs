//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory repositories (tests, local runs)
//! - `notifications` - Member notifiers (tracing log sink, recording notifier)

pub mod memory;
pub mod notifications;

pub use memory::{InMemoryCreditGrantRepository, InMemoryMembershipRepository, InMemoryWaitlistRepository};
pub use notifications::{RecordingNotifier, TracingNotifier};
