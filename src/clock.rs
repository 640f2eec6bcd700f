//! Wall-clock abstraction for lockout expiry arithmetic.
//!
//! The tracker never calls `Utc::now()` directly; it reads time through the
//! [`Clock`] trait so expiry behavior can be tested deterministically with a
//! controllable clock instead of real sleeps.

use chrono::{DateTime, Utc};

/// Source of the current time for lockout expiry checks.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock, used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
