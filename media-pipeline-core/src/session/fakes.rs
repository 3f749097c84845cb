//! Recording transport shared by the session tests.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::models::audio_models::{AudioLevelSnapshot, SendStreamId, SendingStreamsUpdate};
use crate::processing::audio_level::AudioLevel;
use crate::traits::audio_transport::AudioTransport;

/// Duration of one captured block fed to the level meter.
const CAPTURE_BLOCK_SECS: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    SendingStreams(SendingStreamsUpdate),
    Playout(bool),
    Recording(bool),
    StereoSwapping(bool),
    Poll {
        samples_per_channel: usize,
        num_channels: usize,
        sample_rate_hz: u32,
    },
}

#[derive(Default)]
pub struct FakeAudioTransport {
    events: Mutex<Vec<TransportEvent>>,
    meter: Mutex<AudioLevel>,
}

impl FakeAudioTransport {
    pub fn events(&self) -> Vec<TransportEvent> {
        self.events.lock().clone()
    }

    pub fn playout_calls(&self) -> Vec<bool> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                TransportEvent::Playout(enabled) => Some(*enabled),
                _ => None,
            })
            .collect()
    }

    pub fn recording_calls(&self) -> Vec<bool> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                TransportEvent::Recording(enabled) => Some(*enabled),
                _ => None,
            })
            .collect()
    }

    pub fn sending_updates(&self) -> Vec<SendingStreamsUpdate> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                TransportEvent::SendingStreams(update) => Some(update.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn poll_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, TransportEvent::Poll { .. }))
            .count()
    }

    /// Run `blocks` captured 10 ms blocks of `samples` through the level meter.
    pub fn capture(&self, samples: &[i16], blocks: usize) {
        let mut meter = self.meter.lock();
        for _ in 0..blocks {
            meter.compute_level(samples, false, CAPTURE_BLOCK_SECS);
        }
    }

    /// Wait until at least `count` polls were seen, up to two seconds.
    pub fn wait_for_polls(&self, count: usize) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if self.poll_count() >= count {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        false
    }
}

impl AudioTransport for FakeAudioTransport {
    fn update_sending_streams(
        &self,
        streams: Vec<SendStreamId>,
        max_sample_rate_hz: u32,
        max_num_channels: usize,
    ) {
        self.events
            .lock()
            .push(TransportEvent::SendingStreams(SendingStreamsUpdate {
                streams,
                max_sample_rate_hz,
                max_num_channels,
            }));
    }

    fn set_playout_enabled(&self, enabled: bool) {
        self.events.lock().push(TransportEvent::Playout(enabled));
    }

    fn set_recording_enabled(&self, enabled: bool) {
        self.events.lock().push(TransportEvent::Recording(enabled));
    }

    fn audio_level(&self) -> AudioLevelSnapshot {
        self.meter.lock().snapshot()
    }

    fn set_stereo_channel_swapping(&self, enabled: bool) {
        self.events.lock().push(TransportEvent::StereoSwapping(enabled));
    }

    fn need_more_play_data(
        &self,
        samples_per_channel: usize,
        num_channels: usize,
        sample_rate_hz: u32,
        out: &mut [i16],
    ) -> usize {
        out.fill(0);
        self.events.lock().push(TransportEvent::Poll {
            samples_per_channel,
            num_channels,
            sample_rate_hz,
        });
        samples_per_channel
    }
}
