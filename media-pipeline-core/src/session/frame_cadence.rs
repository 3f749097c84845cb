use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::models::config::CadenceConfig;
use crate::models::frame::{FrameRateConstraints, VideoFrame};
use crate::models::state::CadenceSession;
use crate::models::time::Timestamp;
use crate::processing::constraint_metrics::report_frame_rate_constraints;
use crate::scheduling::cancellation::ScopedTaskSafety;
use crate::scheduling::thread_checker::RaceChecker;
use crate::traits::clock::Clock;
use crate::traits::field_trials::FieldTrialsView;
use crate::traits::frame_sink::{FrameCadenceCallback, VideoFrameSink};
use crate::traits::metrics_sink::MetricsSink;
use crate::traits::task_scheduler::TaskScheduler;

/// State only touched from tasks running on the owner queue.
struct OwnerState {
    source_constraints: Option<FrameRateConstraints>,
    session: CadenceSession,
}

/// State reachable from posted tasks.
///
/// Tasks hold this through an `Arc` together with a cancellation token; the
/// token is checked before any of it is used.
struct AdapterShared {
    callback: OnceLock<Arc<dyn FrameCadenceCallback>>,
    metrics: Arc<dyn MetricsSink>,
    frames_scheduled_for_processing: AtomicI32,
    // Only locked from the owner queue, so never contended.
    owner: Mutex<OwnerState>,
}

impl AdapterShared {
    fn on_frame_on_owner(&self, post_time: Timestamp, frames_scheduled: i32, frame: &VideoFrame) {
        match self.callback.get() {
            Some(callback) => callback.on_frame(post_time, frames_scheduled, frame),
            None => log::error!("frame {} delivered before initialize, dropping", frame.id),
        }
    }

    fn maybe_report_frame_rate_constraint_metrics(&self) {
        let constraints = {
            let mut owner = self.owner.lock();
            if !owner.session.try_claim_telemetry() {
                return;
            }
            owner.source_constraints
        };
        report_frame_rate_constraints(constraints.as_ref(), self.metrics.as_ref());
    }
}

/// Moves frames from a capture/network thread onto the owner queue.
///
/// Frames arrive through [`VideoFrameSink`] on any single thread at a time
/// and are redelivered on the owner queue, tagged with their arrival time
/// and the number of frames still in flight. The first delivery of each
/// zero-hertz session also reports the source's frame-rate constraints.
///
/// ```text
/// [foreign thread] on_frame ─post─▶ [owner queue] callback.on_frame → telemetry
/// ```
///
/// Dropping the adapter cancels every task it posted that has not run yet.
/// A delivery already running on the owner queue finishes, including its
/// telemetry, before the drop returns.
pub struct FrameCadenceAdapter {
    // Declared first so pending tasks are cancelled before the rest is dropped.
    safety: ScopedTaskSafety,
    clock: Arc<dyn Clock>,
    queue: Arc<dyn TaskScheduler>,
    config: CadenceConfig,
    shared: Arc<AdapterShared>,
    incoming_frame_race_checker: RaceChecker,
}

impl FrameCadenceAdapter {
    pub fn new(
        clock: Arc<dyn Clock>,
        queue: Arc<dyn TaskScheduler>,
        metrics: Arc<dyn MetricsSink>,
        field_trials: &dyn FieldTrialsView,
    ) -> Self {
        Self::with_config(clock, queue, metrics, CadenceConfig::from_field_trials(field_trials))
    }

    pub fn with_config(
        clock: Arc<dyn Clock>,
        queue: Arc<dyn TaskScheduler>,
        metrics: Arc<dyn MetricsSink>,
        config: CadenceConfig,
    ) -> Self {
        log::debug!(
            "frame cadence adapter created, zero-hertz screenshare {}",
            if config.zero_hertz_screenshare_enabled { "enabled" } else { "disabled" }
        );
        Self {
            safety: ScopedTaskSafety::new(),
            clock,
            queue,
            config,
            shared: Arc::new(AdapterShared {
                callback: OnceLock::new(),
                metrics,
                frames_scheduled_for_processing: AtomicI32::new(0),
                owner: Mutex::new(OwnerState {
                    source_constraints: None,
                    session: CadenceSession::new(),
                }),
            }),
            incoming_frame_race_checker: RaceChecker::new(),
        }
    }

    /// Wire the frame receiver. Must happen before the first frame arrives.
    pub fn initialize(&self, callback: Arc<dyn FrameCadenceCallback>) {
        if self.shared.callback.set(callback).is_err() {
            log::warn!("frame cadence adapter already initialized, ignoring new callback");
        }
    }

    pub fn config(&self) -> &CadenceConfig {
        &self.config
    }

    /// Enable or disable zero-hertz mode. Must be called on the owner queue.
    ///
    /// Enabling from disabled starts a new session, which allows one more
    /// constraint report.
    #[track_caller]
    pub fn set_zero_hertz_mode_enabled(&self, enabled: bool) {
        assert!(
            self.queue.is_current(),
            "set_zero_hertz_mode_enabled called off the owner queue"
        );
        let mut owner = self.shared.owner.lock();
        if enabled && !owner.session.is_zero_hertz_enabled() {
            log::info!("zero-hertz session started");
        }
        owner.session.set_zero_hertz_enabled(enabled);
    }

    /// Frames posted to the owner queue but not delivered yet.
    pub fn frames_scheduled_for_processing(&self) -> i32 {
        self.shared
            .frames_scheduled_for_processing
            .load(Ordering::Relaxed)
    }
}

impl VideoFrameSink for FrameCadenceAdapter {
    fn on_frame(&self, frame: &VideoFrame) {
        let _serialized = self.incoming_frame_race_checker.enter();

        let post_time = self.clock.current_time();
        self.shared
            .frames_scheduled_for_processing
            .fetch_add(1, Ordering::Relaxed);

        let shared = Arc::clone(&self.shared);
        let frame = frame.clone();
        self.queue.post_with_token(
            self.safety.token(),
            Box::new(move || {
                let frames_scheduled = shared
                    .frames_scheduled_for_processing
                    .fetch_sub(1, Ordering::Relaxed);
                shared.on_frame_on_owner(post_time, frames_scheduled, &frame);
                shared.maybe_report_frame_rate_constraint_metrics();
            }),
        );
    }

    fn on_discarded_frame(&self) {
        if let Some(callback) = self.shared.callback.get() {
            callback.on_discarded_frame();
        }
    }

    fn on_constraints_changed(&self, constraints: &FrameRateConstraints) {
        log::info!(
            "on_constraints_changed min_fps {} max_fps {}",
            constraints.min_fps.unwrap_or(-1.0),
            constraints.max_fps.unwrap_or(-1.0)
        );
        let shared = Arc::clone(&self.shared);
        let constraints = *constraints;
        self.queue.post_with_token(
            self.safety.token(),
            Box::new(move || {
                shared.owner.lock().source_constraints = Some(constraints);
            }),
        );
    }
}
