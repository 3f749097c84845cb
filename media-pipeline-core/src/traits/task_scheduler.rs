use crate::scheduling::cancellation::CancellationToken;

/// A unit of work posted to a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Strictly serialized execution context.
///
/// Tasks run one at a time, in post order, on a single logical thread.
pub trait TaskScheduler: Send + Sync {
    fn post(&self, task: Task);

    /// Whether the caller is currently running on this scheduler.
    fn is_current(&self) -> bool;

    /// Post `task`, dropping it unrun if `token`'s owner is gone by then.
    fn post_with_token(&self, token: CancellationToken, task: Task) {
        self.post(token.bind(task));
    }
}
