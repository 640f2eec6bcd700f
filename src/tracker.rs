//! Account lockout tracking for brute force protection.
//!
//! This module implements account-based brute force protection with
//! per-account failed login tracking and automatic, time-bounded lockout.
//!
//! # Features
//!
//! - Per-account consecutive-failure tracking, keyed case-insensitively
//! - Automatic lockout after a configurable number of failed attempts
//! - Lazy lock expiry: an expired lock is observed and cleared on the next
//!   check, with no background timer
//! - Full pardon on successful login
//!
//! # Example
//!
//! ```rust
//! use account_lockout::{LockoutConfig, LockoutTracker};
//!
//! let tracker = LockoutTracker::new(LockoutConfig::default());
//!
//! // Check before verifying credentials
//! let check = tracker.check_login_allowed("user@example.com");
//! if !check.allowed {
//!     // Reject without verifying, surfacing check.retry_after_secs
//! }
//!
//! // Report the outcome of credential verification back
//! tracker.record_failure("user@example.com");
//! tracker.record_success("user@example.com");
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::LockoutConfig;

/// Per-account throttle state.
///
/// An account absent from the registry is equivalent to the default state
/// (no failures, not locked), so entries are created lazily on the first
/// recorded failure.
#[derive(Debug, Default)]
struct AccountState {
    /// Consecutive failed attempts since the last success or observed
    /// lock expiry.
    failures: u32,
    /// When the current lockout ends. `None` means not locked.
    locked_until: Option<DateTime<Utc>>,
}

/// Outcome of [`LockoutTracker::check_login_allowed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCheck {
    /// Whether a login attempt may proceed to credential verification.
    pub allowed: bool,
    /// Whole seconds until the lockout ends, rounded up. Zero when allowed.
    pub retry_after_secs: u64,
}

impl LoginCheck {
    const ALLOWED: Self = Self {
        allowed: true,
        retry_after_secs: 0,
    };

    fn locked(retry_after_secs: u64) -> Self {
        Self {
            allowed: false,
            retry_after_secs,
        }
    }

    /// Time remaining on the lockout, if the attempt was denied.
    pub fn retry_after(&self) -> Option<Duration> {
        (!self.allowed).then(|| Duration::seconds(self.retry_after_secs as i64))
    }
}

/// In-memory registry of failed login attempts with automatic lockout.
///
/// The tracker maps a case-folded account key (typically an email address)
/// to its consecutive-failure count and lockout expiry. State is process
/// local and lost on shutdown; this is a best-effort throttle, not an audit
/// or ban system.
///
/// # Thread Safety
///
/// All operations take `&self` and are safe to call from many threads or
/// tasks concurrently. A single mutex guards the registry for the duration
/// of each operation, which is enough because every critical section is a
/// constant-time map operation with no I/O inside it. For the same reason
/// the methods are synchronous and fine to call from async handlers.
///
/// # Construction
///
/// Build one tracker at application startup and hand it (behind an `Arc`)
/// to whatever performs authentication. [`LockoutTracker::new`] uses the
/// system clock; [`LockoutTracker::with_clock`] accepts any [`Clock`] and
/// exists so tests can drive lock expiry without sleeping.
pub struct LockoutTracker<C: Clock = SystemClock> {
    accounts: Mutex<HashMap<String, AccountState>>,
    config: LockoutConfig,
    clock: C,
}

impl LockoutTracker<SystemClock> {
    /// Create a tracker that reads the system clock.
    pub fn new(config: LockoutConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> LockoutTracker<C> {
    /// Create a tracker with an injected time source.
    pub fn with_clock(config: LockoutConfig, clock: C) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            config,
            clock,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LockoutConfig {
        &self.config
    }

    /// Check whether a login attempt for this account may proceed.
    ///
    /// Returns `allowed: true` for unknown accounts and accounts below the
    /// failure threshold. While a lockout is active, returns
    /// `allowed: false` with the remaining seconds (rounded up) so callers
    /// can surface a retry hint.
    ///
    /// This is not a pure read: observing an expired lock resets the
    /// account's failure count to zero before allowing the attempt.
    /// Failures below the threshold are deliberately NOT reset here; they
    /// represent an ongoing attack window, not an expired lock.
    pub fn check_login_allowed(&self, account: &str) -> LoginCheck {
        let key = normalize_key(account);
        let now = self.clock.now();
        let mut accounts = self.registry();

        let Some(state) = accounts.get_mut(&key) else {
            return LoginCheck::ALLOWED;
        };

        match state.locked_until {
            Some(until) if until > now => LoginCheck::locked(seconds_until(until, now)),
            Some(_) => {
                // Lock expired: lazily reset so the next failure starts a
                // fresh count.
                state.failures = 0;
                state.locked_until = None;
                tracing::debug!(account = %key, "lockout expired, failure count reset");
                LoginCheck::ALLOWED
            }
            None => LoginCheck::ALLOWED,
        }
    }

    /// Record a failed login attempt for this account.
    ///
    /// Increments the consecutive-failure count, creating the entry on the
    /// first failure. Once the count reaches the configured threshold the
    /// lockout expiry is recomputed from "now" — on this failure and on
    /// every later one — so an attacker still hammering a locked account
    /// keeps extending the lock rather than running out the clock.
    pub fn record_failure(&self, account: &str) {
        let key = normalize_key(account);
        let now = self.clock.now();
        let mut accounts = self.registry();

        let state = accounts.entry(key.clone()).or_default();
        state.failures += 1;
        if state.failures >= self.config.max_failures {
            state.locked_until = Some(now + self.config.lockout_duration);
            tracing::warn!(
                account = %key,
                failures = state.failures,
                "account locked after repeated failed login attempts"
            );
        }
    }

    /// Record a successful login for this account.
    ///
    /// Drops the account's throttle state entirely, clearing any failure
    /// count or active lockout. A successful authentication (for example
    /// via an alternate verified channel) fully pardons the account. No-op
    /// for unknown accounts.
    pub fn record_success(&self, account: &str) {
        let key = normalize_key(account);
        if self.registry().remove(&key).is_some() {
            tracing::debug!(account = %key, "failed login history cleared after success");
        }
    }

    /// Current consecutive-failure count for an account.
    ///
    /// Read-only: unlike [`check_login_allowed`](Self::check_login_allowed)
    /// this never performs the lazy expiry reset. Unknown accounts count 0.
    pub fn failure_count(&self, account: &str) -> u32 {
        let key = normalize_key(account);
        self.registry().get(&key).map_or(0, |state| state.failures)
    }

    /// Whether the account is locked right now. Read-only.
    pub fn is_locked(&self, account: &str) -> bool {
        let key = normalize_key(account);
        let now = self.clock.now();
        self.registry()
            .get(&key)
            .and_then(|state| state.locked_until)
            .is_some_and(|until| until > now)
    }

    /// Number of accounts currently holding throttle state.
    ///
    /// Entries for accounts with failures below the threshold linger until
    /// a success clears them or a later lockout expires, so this grows with
    /// the number of distinct accounts that have ever failed a login.
    pub fn tracked_accounts(&self) -> usize {
        self.registry().len()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, AccountState>> {
        // Operations are total; recover the guard if a holder panicked.
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Case-fold an account key so callers need not pre-normalize.
fn normalize_key(account: &str) -> String {
    account.to_lowercase()
}

/// Seconds from `now` until `until`, rounded up. Requires `until > now`.
fn seconds_until(until: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (until - now).num_milliseconds();
    (millis.max(1) as u64).div_ceil(1000)
}
