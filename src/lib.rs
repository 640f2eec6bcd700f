//! In-memory account lockout tracking for brute force protection.
//!
//! This crate throttles repeated failed login attempts per account: after a
//! configurable number of consecutive failures the account is locked out for
//! a configurable duration, and a successful login clears all throttle state.
//! State is process local and lost on shutdown; this is a best-effort
//! throttle, not an audit trail or a ban system.
//!
//! An authentication handler calls [`LockoutTracker::check_login_allowed`]
//! before verifying credentials, rejects the attempt if it is denied, and
//! reports the verification outcome back via
//! [`LockoutTracker::record_failure`] or [`LockoutTracker::record_success`].
//!
//! ```rust
//! use account_lockout::{LockoutConfig, LockoutTracker};
//!
//! let tracker = LockoutTracker::new(LockoutConfig::default());
//!
//! let check = tracker.check_login_allowed("user@example.com");
//! assert!(check.allowed);
//!
//! tracker.record_failure("user@example.com");
//! tracker.record_success("user@example.com");
//! ```
//!
//! See [`tracker`] for the state machine, [`config`] for the tunables, and
//! [`clock`] for the injectable time source used in tests.

pub mod clock;
pub mod config;
pub mod tracker;

pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, LockoutConfig};
pub use tracker::{LockoutTracker, LoginCheck};
