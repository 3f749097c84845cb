use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::audio_models::{
    AudioInputStats, RefCountReleaseStatus, SendStreamId, SendingStreamsUpdate, StreamProperties,
};
use crate::models::config::AudioStateConfig;
use crate::models::state::PlayoutMode;
use crate::scheduling::thread_checker::ThreadChecker;
use crate::session::null_poller::NullAudioPoller;
use crate::traits::audio_transport::AudioTransport;

enum PlayoutState {
    Enabled,
    Disabled(NullAudioPoller),
}

struct ConfinedState {
    sending_streams: BTreeMap<SendStreamId, StreamProperties>,
    last_update: SendingStreamsUpdate,
    playout: PlayoutState,
}

/// Audio state shared by every send stream and session object of a call.
///
/// Aggregates the active send streams into one transport format, owns the
/// global playout and recording switches, and keeps a null poller running
/// while playout is disabled.
///
/// Everything except reference counting must happen on one thread, bound on
/// the first confined call. Holders share the state through
/// [`AudioStateRef`]; teardown runs once, when the last reference is
/// released, and requires every send stream to have been removed.
pub struct AudioState {
    config: AudioStateConfig,
    transport: Arc<dyn AudioTransport>,
    thread_checker: ThreadChecker,
    ref_count: AtomicUsize,
    destroyed: AtomicBool,
    // Confined to the owning thread; the lock is never contended and is
    // never held across a transport call.
    state: Mutex<ConfinedState>,
}

impl AudioState {
    /// Create the state and return the first reference to it.
    ///
    /// An invalid `config` is replaced by the defaults.
    pub fn create(config: AudioStateConfig, transport: Arc<dyn AudioTransport>) -> AudioStateRef {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("invalid audio state config ({}), using defaults", e);
                AudioStateConfig::default()
            }
        };
        let state = Arc::new(Self {
            config,
            transport,
            thread_checker: ThreadChecker::detached(),
            ref_count: AtomicUsize::new(1),
            destroyed: AtomicBool::new(false),
            state: Mutex::new(ConfinedState {
                sending_streams: BTreeMap::new(),
                last_update: SendingStreamsUpdate::default(),
                playout: PlayoutState::Enabled,
            }),
        });
        AudioStateRef {
            state,
            released: false,
        }
    }

    pub fn config(&self) -> &AudioStateConfig {
        &self.config
    }

    /// Add a send stream, or update the format of an existing one.
    #[track_caller]
    pub fn add_sending_stream(&self, id: SendStreamId, sample_rate_hz: u32, num_channels: usize) {
        self.check_confined();
        let update = {
            let mut state = self.state.lock();
            state.sending_streams.insert(
                id,
                StreamProperties {
                    sample_rate_hz,
                    num_channels,
                },
            );
            Self::record_sending_streams_update(&mut state)
        };
        self.update_transport_with_sending_streams(update);
    }

    /// Remove a send stream. The stream must have been added.
    #[track_caller]
    pub fn remove_sending_stream(&self, id: SendStreamId) {
        self.check_confined();
        let update = {
            let mut state = self.state.lock();
            assert!(
                state.sending_streams.remove(&id).is_some(),
                "removing unknown send stream {}",
                id
            );
            Self::record_sending_streams_update(&mut state)
        };
        self.update_transport_with_sending_streams(update);
    }

    #[track_caller]
    pub fn set_playout(&self, enabled: bool) {
        log::info!("set_playout({})", enabled);
        self.check_confined();
        if enabled == (self.playout_mode() == PlayoutMode::Enabled) {
            return;
        }
        if enabled {
            let previous = std::mem::replace(&mut self.state.lock().playout, PlayoutState::Enabled);
            // The poller must be gone before real playout pulls audio again.
            drop(previous);
            self.transport.set_playout_enabled(true);
        } else {
            self.transport.set_playout_enabled(false);
            let poller = NullAudioPoller::start(Arc::clone(&self.transport), &self.config);
            self.state.lock().playout = PlayoutState::Disabled(poller);
        }
    }

    /// Forwarded as-is; repeated calls are not deduplicated.
    #[track_caller]
    pub fn set_recording(&self, enabled: bool) {
        log::info!("set_recording({})", enabled);
        self.check_confined();
        self.transport.set_recording_enabled(enabled);
    }

    #[track_caller]
    pub fn audio_input_stats(&self) -> AudioInputStats {
        self.check_confined();
        let level = self.transport.audio_level();
        debug_assert!(level.level_full_range <= 32767);
        debug_assert!(level.level <= 9);
        AudioInputStats {
            audio_level: level.level_full_range,
            quantized_audio_level: level.level,
            total_energy: level.total_energy,
            total_duration: level.total_duration,
        }
    }

    #[track_caller]
    pub fn set_stereo_channel_swapping(&self, enabled: bool) {
        self.check_confined();
        self.transport.set_stereo_channel_swapping(enabled);
    }

    /// Current send streams, ordered by id.
    #[track_caller]
    pub fn sending_streams(&self) -> Vec<(SendStreamId, StreamProperties)> {
        self.check_confined();
        self.state
            .lock()
            .sending_streams
            .iter()
            .map(|(id, properties)| (*id, *properties))
            .collect()
    }

    /// The aggregate most recently pushed to the transport.
    #[track_caller]
    pub fn sending_streams_update(&self) -> SendingStreamsUpdate {
        self.check_confined();
        self.state.lock().last_update.clone()
    }

    #[track_caller]
    pub fn playout_mode(&self) -> PlayoutMode {
        self.check_confined();
        match self.state.lock().playout {
            PlayoutState::Enabled => PlayoutMode::Enabled,
            PlayoutState::Disabled(_) => PlayoutMode::Disabled,
        }
    }

    /// Id of the active null poller, if playout is disabled.
    #[track_caller]
    pub fn null_poller_id(&self) -> Option<u64> {
        self.check_confined();
        match &self.state.lock().playout {
            PlayoutState::Enabled => None,
            PlayoutState::Disabled(poller) => Some(poller.id()),
        }
    }

    pub fn add_ref(&self) {
        let previous = self.ref_count.fetch_add(1, Ordering::Relaxed);
        assert!(previous > 0, "add_ref on a destroyed audio state");
    }

    /// Drop one reference, tearing the state down if it was the last.
    pub fn release(&self) -> RefCountReleaseStatus {
        let mut current = self.ref_count.load(Ordering::Acquire);
        loop {
            assert!(current > 0, "release without a matching reference");
            match self.ref_count.compare_exchange_weak(
                current,
                current - 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
        if current == 1 {
            self.tear_down();
            RefCountReleaseStatus::DroppedLastRef
        } else {
            RefCountReleaseStatus::OtherRefsRemained
        }
    }

    pub fn ref_count(&self) -> usize {
        self.ref_count.load(Ordering::Acquire)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }

    fn tear_down(&self) {
        self.destroyed.store(true, Ordering::Release);
        let mut state = self.state.lock();
        assert!(
            state.sending_streams.is_empty(),
            "audio state destroyed with {} active send streams",
            state.sending_streams.len()
        );
        let previous = std::mem::replace(&mut state.playout, PlayoutState::Enabled);
        drop(state);
        drop(previous);
        log::debug!("audio state destroyed");
    }

    #[track_caller]
    fn check_confined(&self) {
        self.thread_checker.check();
        debug_assert!(!self.is_destroyed(), "audio state used after destruction");
    }

    fn record_sending_streams_update(state: &mut ConfinedState) -> SendingStreamsUpdate {
        let update = SendingStreamsUpdate::from_streams(&state.sending_streams);
        state.last_update = update.clone();
        update
    }

    // Called without the state lock held; the transport may read the state back.
    fn update_transport_with_sending_streams(&self, update: SendingStreamsUpdate) {
        self.transport.update_sending_streams(
            update.streams,
            update.max_sample_rate_hz,
            update.max_num_channels,
        );
    }
}

/// Counted handle to an [`AudioState`].
///
/// Cloning adds a reference and dropping releases it. [`release`] does the
/// same as dropping but reports whether this was the last reference.
///
/// [`release`]: AudioStateRef::release
pub struct AudioStateRef {
    state: Arc<AudioState>,
    released: bool,
}

impl AudioStateRef {
    pub fn release(mut self) -> RefCountReleaseStatus {
        self.released = true;
        self.state.release()
    }
}

impl Clone for AudioStateRef {
    fn clone(&self) -> Self {
        self.state.add_ref();
        Self {
            state: Arc::clone(&self.state),
            released: false,
        }
    }
}

impl Deref for AudioStateRef {
    type Target = AudioState;

    fn deref(&self) -> &AudioState {
        &self.state
    }
}

impl Drop for AudioStateRef {
    fn drop(&mut self) {
        if !self.released {
            self.state.release();
        }
    }
}
