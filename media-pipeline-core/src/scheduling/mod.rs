pub mod cancellation;
pub mod manual_queue;
pub mod task_queue;
pub mod thread_checker;
