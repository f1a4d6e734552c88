//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Log level must not be empty")]
    EmptyLogLevel,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),

    #[error("Lifecycle poll interval must be between 1 and 86400 seconds")]
    InvalidPollInterval,

    #[error("Activation reminder delay must be at least one day")]
    InvalidReminderDelay,

    #[error("Waitlist offer window must be between 1 and 168 hours")]
    InvalidOfferWindow,
}
