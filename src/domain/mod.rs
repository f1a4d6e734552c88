//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `membership` - Tiers, credit cycles, entitlements, pricing and membership lifecycle
//! - `waitlist` - Class waitlist entries and offer windows

pub mod foundation;
pub mod membership;
pub mod waitlist;
