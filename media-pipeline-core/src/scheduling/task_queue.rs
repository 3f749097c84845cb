//! Dedicated-thread task queue.
//!
//! Tasks are sent over a `crossbeam-channel` queue to one named worker
//! thread and run strictly in post order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};

use crossbeam_channel::{Receiver, Sender};

use crate::models::error::PipelineError;
use crate::traits::task_scheduler::{Task, TaskScheduler};

/// A serialized execution context backed by one worker thread.
///
/// Dropping the queue stops the worker. Tasks still queued at that point are
/// dropped without running.
pub struct TaskQueue {
    name: String,
    tx: Option<Sender<Task>>,
    running: Arc<AtomicBool>,
    worker_id: ThreadId,
    handle: Option<JoinHandle<()>>,
}

impl TaskQueue {
    pub fn new(name: &str) -> Result<Self, PipelineError> {
        let (tx, rx) = crossbeam_channel::unbounded::<Task>();
        let running = Arc::new(AtomicBool::new(true));
        let worker_running = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || worker_loop(rx, worker_running))
            .map_err(|e| PipelineError::ThreadSpawn(format!("{}: {}", name, e)))?;

        log::debug!("task queue {} started", name);
        Ok(Self {
            name: name.to_string(),
            tx: Some(tx),
            running,
            worker_id: handle.thread().id(),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `f` on the queue and wait for its result.
    ///
    /// Runs inline when called from the queue itself.
    pub fn blocking_call<R, F>(&self, f: F) -> Result<R, PipelineError>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        if self.is_current() {
            return Ok(f());
        }
        let (result_tx, result_rx) = crossbeam_channel::bounded(1);
        self.post(Box::new(move || {
            let _ = result_tx.send(f());
        }));
        result_rx.recv().map_err(|_| PipelineError::QueueStopped)
    }
}

fn worker_loop(rx: Receiver<Task>, running: Arc<AtomicBool>) {
    while let Ok(task) = rx.recv() {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        task();
    }
}

impl TaskScheduler for TaskQueue {
    fn post(&self, task: Task) {
        let Some(tx) = self.tx.as_ref() else {
            return;
        };
        if tx.send(task).is_err() {
            log::warn!("task posted to stopped queue {}", self.name);
        }
    }

    fn is_current(&self) -> bool {
        thread::current().id() == self.worker_id
    }
}

impl Drop for TaskQueue {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            // A queue dropped by one of its own tasks cannot join itself.
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
        log::debug!("task queue {} stopped", self.name);
    }
}
