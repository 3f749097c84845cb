use crate::models::frame::{FrameRateConstraints, VideoFrame};
use crate::models::time::Timestamp;

/// Receiver of frames redelivered on the owner thread.
///
/// `on_frame` runs on the scheduler's thread; `on_discarded_frame` runs on
/// whichever thread reported the discard.
pub trait FrameCadenceCallback: Send + Sync {
    /// `post_time` is when the frame entered the adapter.
    /// `frames_scheduled_for_processing` counts this frame plus every frame
    /// still queued behind it.
    fn on_frame(&self, post_time: Timestamp, frames_scheduled_for_processing: i32, frame: &VideoFrame);

    fn on_discarded_frame(&self);
}

/// Consumer side of a video source.
pub trait VideoFrameSink: Send + Sync {
    fn on_frame(&self, frame: &VideoFrame);

    fn on_discarded_frame(&self) {}

    fn on_constraints_changed(&self, _constraints: &FrameRateConstraints) {}
}
