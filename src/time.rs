//! Shared time abstraction used across runtime code and tests.
//!
//! `Clock` provides an injectable source of the current instant. The store
//! asks it for "now" whenever a blank row is dated or an editor opens on an
//! unscheduled row. `SystemClock` serves production code and `FixedClock`
//! keeps tests deterministic.

#[cfg(test)]
use chrono::Duration;
use chrono::{DateTime, Utc};
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;

/// An abstraction over a source of the current time.
///
/// Implementations must be thread-safe.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that returns the real, current time from the system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A test clock that returns a controlled instant.
#[derive(Debug)]
#[cfg(test)]
pub struct FixedClock {
    inner: Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            inner: Mutex::new(now),
        }
    }

    /// Create a `FixedClock` from an RFC3339 timestamp (e.g. "2024-02-24T09:00:00Z").
    ///
    /// Panics if the input is not a valid RFC3339 timestamp.
    pub fn from_rfc3339(s: &str) -> Self {
        let dt = DateTime::parse_from_rfc3339(s)
            .expect("invalid RFC3339 timestamp")
            .with_timezone(&Utc);
        Self::new(dt)
    }

    /// Advance (or rewind if negative) the current instant by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut guard = self.inner.lock().expect("poisoned FixedClock");
        *guard += delta;
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.inner.lock().expect("poisoned FixedClock")
    }
}

/// A convenient alias for sharing a clock behind an `Arc`.
pub type SharedClock = Arc<dyn Clock>;

pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}

#[cfg(test)]
pub fn fixed_clock(now: DateTime<Utc>) -> SharedClock {
    Arc::new(FixedClock::new(now))
}

/// Shared fixed clock at a standard test time (2024-02-24 09:15:00 UTC).
#[cfg(test)]
pub fn test_clock() -> SharedClock {
    Arc::new(FixedClock::from_rfc3339("2024-02-24T09:15:00Z"))
}
