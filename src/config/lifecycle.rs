//! Lifecycle job configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

const MAX_POLL_INTERVAL_SECS: u64 = 86_400;
const MAX_OFFER_WINDOW_HOURS: u32 = 168;

/// Settings for the background lifecycle jobs
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Seconds between scheduler passes
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Days a membership may stay pending before the activation reminder
    #[serde(default = "default_activation_reminder_days")]
    pub activation_reminder_days: u32,

    /// Hours a waitlisted member has to claim an offered spot
    #[serde(default = "default_waitlist_offer_hours")]
    pub waitlist_offer_hours: u32,
}

impl LifecycleConfig {
    /// Time between scheduler passes
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// How long a waitlist offer stays open
    pub fn offer_window(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.waitlist_offer_hours))
    }

    /// Validate lifecycle configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.poll_interval_secs == 0 || self.poll_interval_secs > MAX_POLL_INTERVAL_SECS {
            return Err(ValidationError::InvalidPollInterval);
        }
        if self.activation_reminder_days == 0 {
            return Err(ValidationError::InvalidReminderDelay);
        }
        if self.waitlist_offer_hours == 0 || self.waitlist_offer_hours > MAX_OFFER_WINDOW_HOURS {
            return Err(ValidationError::InvalidOfferWindow);
        }
        Ok(())
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            activation_reminder_days: default_activation_reminder_days(),
            waitlist_offer_hours: default_waitlist_offer_hours(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    3600
}

fn default_activation_reminder_days() -> u32 {
    3
}

fn default_waitlist_offer_hours() -> u32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_defaults() {
        let config = LifecycleConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(3600));
        assert_eq!(config.activation_reminder_days, 3);
        assert_eq!(config.offer_window(), chrono::Duration::hours(12));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_poll_interval_bounds() {
        let mut config = LifecycleConfig::default();
        config.poll_interval_secs = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidPollInterval));
        config.poll_interval_secs = 86_401;
        assert_eq!(config.validate(), Err(ValidationError::InvalidPollInterval));
        config.poll_interval_secs = 86_400;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reminder_delay_must_be_positive() {
        let config = LifecycleConfig {
            activation_reminder_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidReminderDelay));
    }

    #[test]
    fn test_offer_window_bounds() {
        let mut config = LifecycleConfig::default();
        config.waitlist_offer_hours = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidOfferWindow));
        config.waitlist_offer_hours = 169;
        assert_eq!(config.validate(), Err(ValidationError::InvalidOfferWindow));
        config.waitlist_offer_hours = 168;
        assert!(config.validate().is_ok());
    }
}
