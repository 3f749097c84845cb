use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

use crate::models::time::Timestamp;

/// Source of monotonic time.
pub trait Clock: Send + Sync {
    fn current_time(&self) -> Timestamp;
}

/// Wall-independent clock backed by [`Instant`], with its origin at creation.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn current_time(&self) -> Timestamp {
        Timestamp::from_micros(self.origin.elapsed().as_micros() as i64)
    }
}

/// Manually advanced clock for tests and simulations.
#[derive(Debug, Default)]
pub struct SimulatedClock {
    now_us: AtomicI64,
}

impl SimulatedClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now_us: AtomicI64::new(start.as_micros()),
        }
    }

    pub fn advance(&self, delta: Duration) {
        self.now_us
            .fetch_add(delta.as_micros() as i64, Ordering::SeqCst);
    }
}

impl Clock for SimulatedClock {
    fn current_time(&self) -> Timestamp {
        Timestamp::from_micros(self.now_us.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_clock_advances() {
        let clock = SimulatedClock::new(Timestamp::from_millis(100));
        assert_eq!(clock.current_time(), Timestamp::from_millis(100));
        clock.advance(Duration::from_millis(33));
        assert_eq!(clock.current_time(), Timestamp::from_millis(133));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.current_time();
        let b = clock.current_time();
        assert!(b >= a);
    }
}
