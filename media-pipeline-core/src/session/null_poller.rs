use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use crate::models::config::AudioStateConfig;
use crate::traits::audio_transport::AudioTransport;

static NEXT_POLLER_ID: AtomicU64 = AtomicU64::new(1);

/// Keeps the playout mixing path running while real playout is disabled.
///
/// A background thread pulls one interval's worth of audio from the
/// transport on every tick and discards it. Dropping the poller stops and
/// joins the thread.
pub struct NullAudioPoller {
    id: u64,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl NullAudioPoller {
    pub fn start(transport: Arc<dyn AudioTransport>, config: &AudioStateConfig) -> Self {
        let id = NEXT_POLLER_ID.fetch_add(1, Ordering::Relaxed);
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);

        let interval = config.poll_interval();
        let samples_per_channel = config.poll_samples_per_channel();
        let channels = config.poll_channels;
        let sample_rate_hz = config.poll_sample_rate_hz;

        let handle = thread::Builder::new()
            .name("null-audio-poller".into())
            .spawn(move || {
                let mut buffer = vec![0i16; samples_per_channel * channels];
                while thread_running.load(Ordering::SeqCst) {
                    transport.need_more_play_data(
                        samples_per_channel,
                        channels,
                        sample_rate_hz,
                        &mut buffer,
                    );
                    thread::sleep(interval);
                }
            });

        let handle = match handle {
            Ok(handle) => {
                log::debug!("null audio poller {} started", id);
                Some(handle)
            }
            Err(e) => {
                log::error!("failed to spawn null audio poller: {}", e);
                None
            }
        };

        Self {
            id,
            running,
            handle,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some() && self.running.load(Ordering::SeqCst)
    }
}

impl Drop for NullAudioPoller {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        log::debug!("null audio poller {} stopped", self.id);
    }
}
