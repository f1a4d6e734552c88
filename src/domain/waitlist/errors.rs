//! Waitlist-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, WaitlistEntryId};

/// Waitlist-specific errors.
#[derive(Debug, Clone, Error)]
pub enum WaitlistError {
    #[error("Waitlist entry {0} not found")]
    NotFound(WaitlistEntryId),

    #[error("Cannot {attempted} a waitlist entry that is {current}")]
    InvalidState { current: String, attempted: String },

    #[error("Offer expired at {}", .0.as_datetime())]
    OfferExpired(Timestamp),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl WaitlistError {
    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        WaitlistError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            WaitlistError::NotFound(_) => ErrorCode::WaitlistEntryNotFound,
            WaitlistError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            WaitlistError::OfferExpired(_) => ErrorCode::OfferExpired,
            WaitlistError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for WaitlistError {
    fn from(err: DomainError) -> Self {
        WaitlistError::Infrastructure(err.to_string())
    }
}

impl From<WaitlistError> for DomainError {
    fn from(err: WaitlistError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
