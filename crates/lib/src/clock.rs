//! Time provider abstraction
//!
//! Account creation and login timestamps come from a [`Clock`] so that production
//! code reads the system time while tests pin it to a known instant.
//!
//! # Example
//!
//! ```
//! use healthconnect::{Clock, SystemClock};
//!
//! let stamp = SystemClock.now_rfc3339();
//! assert!(stamp.ends_with('Z'));
//! ```

use std::fmt::Debug;

use chrono::{DateTime, SecondsFormat, Utc};

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// A time provider for account and session timestamps.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current instant formatted as RFC 3339 with millisecond
    /// precision and a `Z` suffix, e.g. `2024-01-01T00:00:00.000Z`.
    fn now_rfc3339(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Production clock using real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock that only moves when told to.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct FixedClock {
    millis: Mutex<i64>,
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Create a clock pinned at `millis` since the Unix epoch.
    pub fn new(millis: i64) -> Self {
        Self {
            millis: Mutex::new(millis),
        }
    }

    /// Move the clock forward by `ms` milliseconds.
    pub fn advance(&self, ms: i64) {
        *self.lock() += ms;
    }

    /// Pin the clock at a specific time in milliseconds.
    pub fn set(&self, ms: i64) {
        *self.lock() = ms;
    }

    /// Current pinned value in milliseconds.
    pub fn millis(&self) -> i64 {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, i64> {
        // A poisoned clock still holds a valid integer.
        self.millis.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis()).unwrap_or_default()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::new(1_704_067_200_000)
    }
}
