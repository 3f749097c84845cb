use std::cell::Cell;
use std::sync::Arc;

use parking_lot::ReentrantMutex;

use crate::traits::task_scheduler::Task;

/// Owner side of a cancellation flag.
///
/// Held by the component that posts work. Dropping it cancels every task
/// bound to one of its tokens that has not started yet, and blocks until a
/// bound task already running on another thread has returned. A bound task
/// may drop its own owner.
#[derive(Debug)]
pub struct ScopedTaskSafety {
    alive: Arc<ReentrantMutex<Cell<bool>>>,
}

impl ScopedTaskSafety {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(ReentrantMutex::new(Cell::new(true))),
        }
    }

    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            alive: Arc::clone(&self.alive),
        }
    }
}

impl Default for ScopedTaskSafety {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScopedTaskSafety {
    fn drop(&mut self) {
        self.alive.lock().set(false);
    }
}

/// Task side of a cancellation flag.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    alive: Arc<ReentrantMutex<Cell<bool>>>,
}

impl CancellationToken {
    pub fn is_alive(&self) -> bool {
        self.alive.lock().get()
    }

    /// Wrap `task` so it only runs while the owner is alive.
    ///
    /// The flag stays locked while `task` runs.
    pub fn bind(self, task: Task) -> Task {
        Box::new(move || {
            let alive = self.alive.lock();
            if alive.get() {
                task();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn bound_task_runs_while_owner_alive() {
        let safety = ScopedTaskSafety::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let task = safety.token().bind(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        task();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn bound_task_dropped_after_owner_destroyed() {
        let safety = ScopedTaskSafety::new();
        let token = safety.token();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let task = token.clone().bind(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        drop(safety);
        assert!(!token.is_alive());
        task();
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn drop_waits_for_running_task() {
        let safety = ScopedTaskSafety::new();
        let finished = Arc::new(AtomicBool::new(false));
        let (started_tx, started_rx) = crossbeam_channel::bounded(1);

        let done = Arc::clone(&finished);
        let task = safety.token().bind(Box::new(move || {
            let _ = started_tx.send(());
            thread::sleep(Duration::from_millis(50));
            done.store(true, Ordering::SeqCst);
        }));
        let worker = thread::spawn(task);

        started_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        drop(safety);
        assert!(finished.load(Ordering::SeqCst));
        worker.join().unwrap();
    }

    #[test]
    fn task_may_drop_its_owner() {
        let safety = ScopedTaskSafety::new();
        let token = safety.token();
        let task = token.clone().bind(Box::new(move || drop(safety)));
        task();
        assert!(!token.is_alive());
    }
}
