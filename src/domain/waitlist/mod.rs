//! Waitlist domain module.
//!
//! A full class keeps a waitlist. When a spot opens, the next waiting member
//! is offered it for a limited window; unclaimed offers expire and pass to the
//! next in line.

mod entry;
mod errors;
mod status;

pub use entry::WaitlistEntry;
pub use errors::WaitlistError;
pub use status::WaitlistStatus;
