use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A point on a monotonic timeline, in microseconds.
///
/// Only differences between two timestamps from the same [`Clock`] are
/// meaningful; the origin is clock-specific.
///
/// [`Clock`]: crate::traits::clock::Clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp {
    us: i64,
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp { us: 0 };

    pub const fn from_micros(us: i64) -> Self {
        Self { us }
    }

    pub const fn from_millis(ms: i64) -> Self {
        Self { us: ms * 1_000 }
    }

    pub const fn as_micros(&self) -> i64 {
        self.us
    }

    pub const fn as_millis(&self) -> i64 {
        self.us / 1_000
    }

    /// Elapsed time since `earlier`, saturating at zero.
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_micros(self.us.saturating_sub(earlier.us).max(0) as u64)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp::from_micros(self.us.saturating_add(rhs.as_micros() as i64))
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Duration) -> Timestamp {
        Timestamp::from_micros(self.us.saturating_sub(rhs.as_micros() as i64))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.us)
    }
}
