//! Configuration for the lockout tracker.

use chrono::Duration;
use thiserror::Error;

/// Default consecutive-failure threshold before an account is locked.
pub const DEFAULT_MAX_FAILURES: u32 = 10;

/// Default lockout duration in seconds (15 minutes).
pub const DEFAULT_LOCKOUT_SECS: i64 = 900;

/// Errors returned when constructing an invalid [`LockoutConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_failures must be at least 1")]
    ZeroMaxFailures,

    #[error("lockout_duration must be positive")]
    NonPositiveLockoutDuration,
}

/// Tunables for account lockout behavior.
///
/// The defaults (10 failures, 15 minute lockout) follow OWASP guidance for
/// account-based brute force protection. Deployments and tests can shrink
/// them via [`LockoutConfig::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockoutConfig {
    /// Number of consecutive failed attempts that triggers a lockout.
    pub max_failures: u32,
    /// How long an account stays locked once the threshold is reached.
    pub lockout_duration: Duration,
}

impl LockoutConfig {
    /// Create a validated configuration.
    ///
    /// Rejects a zero threshold (which would lock every account on its
    /// first failure check) and a zero or negative duration.
    pub fn new(max_failures: u32, lockout_duration: Duration) -> Result<Self, ConfigError> {
        if max_failures == 0 {
            return Err(ConfigError::ZeroMaxFailures);
        }
        if lockout_duration <= Duration::zero() {
            return Err(ConfigError::NonPositiveLockoutDuration);
        }
        Ok(Self {
            max_failures,
            lockout_duration,
        })
    }
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failures: DEFAULT_MAX_FAILURES,
            lockout_duration: Duration::seconds(DEFAULT_LOCKOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LockoutConfig::default();
        assert_eq!(config.max_failures, 10);
        assert_eq!(config.lockout_duration, Duration::seconds(900));
    }

    #[test]
    fn test_new_accepts_valid_config() {
        let config = LockoutConfig::new(3, Duration::minutes(5)).unwrap();
        assert_eq!(config.max_failures, 3);
        assert_eq!(config.lockout_duration, Duration::minutes(5));
    }

    #[test]
    fn test_new_rejects_zero_threshold() {
        let err = LockoutConfig::new(0, Duration::minutes(5)).unwrap_err();
        assert_eq!(err, ConfigError::ZeroMaxFailures);
    }

    #[test]
    fn test_new_rejects_non_positive_duration() {
        let err = LockoutConfig::new(3, Duration::zero()).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveLockoutDuration);

        let err = LockoutConfig::new(3, Duration::seconds(-1)).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveLockoutDuration);
    }
}
