use std::collections::VecDeque;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

use crate::traits::task_scheduler::{Task, TaskScheduler};

/// A task queue drained explicitly by its caller.
///
/// Gives tests and simulations full control over when posted work runs.
/// While a task runs, the draining thread counts as the queue's thread.
#[derive(Default)]
pub struct ManualTaskQueue {
    tasks: Mutex<VecDeque<Task>>,
    running_on: Mutex<Option<ThreadId>>,
}

impl ManualTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Run the oldest queued task. Returns `false` if none was queued.
    pub fn run_one(&self) -> bool {
        let Some(task) = self.tasks.lock().pop_front() else {
            return false;
        };
        let previous = self.running_on.lock().replace(thread::current().id());
        task();
        *self.running_on.lock() = previous;
        true
    }

    /// Run tasks, including ones posted meanwhile, until the queue is empty.
    pub fn run_until_idle(&self) -> usize {
        let mut count = 0;
        while self.run_one() {
            count += 1;
        }
        count
    }

    /// Run `f` as if it were a task on this queue.
    pub fn run_on<R>(&self, f: impl FnOnce() -> R) -> R {
        let previous = self.running_on.lock().replace(thread::current().id());
        let result = f();
        *self.running_on.lock() = previous;
        result
    }
}

impl TaskScheduler for ManualTaskQueue {
    fn post(&self, task: Task) {
        self.tasks.lock().push_back(task);
    }

    fn is_current(&self) -> bool {
        *self.running_on.lock() == Some(thread::current().id())
    }
}
