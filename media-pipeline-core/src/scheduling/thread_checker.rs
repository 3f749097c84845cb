use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

/// Asserts that confined state is only touched from one thread.
///
/// Starts detached and binds to the first thread that checks it.
#[derive(Debug, Default)]
pub struct ThreadChecker {
    owner: Mutex<Option<ThreadId>>,
}

impl ThreadChecker {
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn bound_to_current() -> Self {
        Self {
            owner: Mutex::new(Some(thread::current().id())),
        }
    }

    /// Whether the caller is on the owning thread, binding it if detached.
    pub fn is_current(&self) -> bool {
        let current = thread::current().id();
        let mut owner = self.owner.lock();
        *owner.get_or_insert(current) == current
    }

    /// Forget the owning thread; the next check rebinds.
    pub fn detach(&self) {
        *self.owner.lock() = None;
    }

    #[track_caller]
    pub fn check(&self) {
        assert!(
            self.is_current(),
            "called on {:?}, outside the owning thread",
            thread::current().id()
        );
    }
}

/// Detects overlapping calls into a method that must be serialized but may
/// move between threads.
#[derive(Debug, Default)]
pub struct RaceChecker {
    in_use: AtomicBool,
}

impl RaceChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the checked section; overlapping entry panics in debug builds.
    #[track_caller]
    pub fn enter(&self) -> RaceCheckerScope<'_> {
        let was_in_use = self.in_use.swap(true, Ordering::AcqRel);
        debug_assert!(!was_in_use, "concurrent entry into a serialized section");
        RaceCheckerScope {
            checker: self,
            owns: !was_in_use,
        }
    }
}

pub struct RaceCheckerScope<'a> {
    checker: &'a RaceChecker,
    owns: bool,
}

impl Drop for RaceCheckerScope<'_> {
    fn drop(&mut self) {
        if self.owns {
            self.checker.in_use.store(false, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn binds_to_first_caller() {
        let checker = Arc::new(ThreadChecker::detached());
        assert!(checker.is_current());

        let other = Arc::clone(&checker);
        let on_other_thread = thread::spawn(move || other.is_current()).join().unwrap();
        assert!(!on_other_thread);
        assert!(checker.is_current());
    }

    #[test]
    fn detach_allows_rebinding() {
        let checker = Arc::new(ThreadChecker::bound_to_current());
        checker.detach();

        let other = Arc::clone(&checker);
        assert!(thread::spawn(move || other.is_current()).join().unwrap());
        assert!(!checker.is_current());
    }

    #[test]
    fn check_panics_off_thread() {
        let checker = Arc::new(ThreadChecker::bound_to_current());
        let other = Arc::clone(&checker);
        let result = thread::spawn(move || other.check()).join();
        assert!(result.is_err());
    }

    #[test]
    fn sequential_entries_are_fine() {
        let checker = RaceChecker::new();
        drop(checker.enter());
        drop(checker.enter());
    }
}
