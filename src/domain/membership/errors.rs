//! Membership-specific error types.
//!
//! Errors related to membership lifecycle operations and credit redemption.

use chrono::NaiveDateTime;
use thiserror::Error;

use super::CreditType;
use crate::domain::foundation::{DomainError, ErrorCode, MemberId, MembershipId, ValidationError};

/// Membership-specific errors.
#[derive(Debug, Clone, Error)]
pub enum MembershipError {
    #[error("Membership {0} not found")]
    NotFound(MembershipId),

    #[error("No membership found for member {0}")]
    NotFoundForMember(MemberId),

    #[error("Cannot {attempted} a membership that is {current}")]
    InvalidState { current: String, attempted: String },

    #[error("No usable {credit_type} credits for member {member_id}")]
    GrantNotFound {
        member_id: MemberId,
        credit_type: CreditType,
    },

    #[error("{credit_type} credits expired at {expired_at}")]
    GrantExpired {
        credit_type: CreditType,
        expired_at: NaiveDateTime,
    },

    #[error("Requested {requested} {credit_type} credits but only {remaining} remain")]
    InsufficientCredits {
        credit_type: CreditType,
        requested: u32,
        remaining: u32,
    },

    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl MembershipError {
    pub fn not_found(id: MembershipId) -> Self {
        MembershipError::NotFound(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MembershipError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFound(_) | MembershipError::NotFoundForMember(_) => {
                ErrorCode::MembershipNotFound
            }
            MembershipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::GrantNotFound { .. } => ErrorCode::GrantNotFound,
            MembershipError::GrantExpired { .. } => ErrorCode::GrantExpired,
            MembershipError::InsufficientCredits { .. } => ErrorCode::InsufficientCredits,
            MembershipError::Validation { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => MembershipError::Validation {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        MembershipError::Validation {
            field,
            message: err.to_string(),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
