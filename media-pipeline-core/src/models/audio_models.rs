use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest sample rate reported to the transport, even with no send streams.
pub const MIN_SENDING_SAMPLE_RATE_HZ: u32 = 8000;

/// Lowest channel count reported to the transport, even with no send streams.
pub const MIN_SENDING_CHANNELS: usize = 1;

/// Identity of an outbound audio stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SendStreamId(Uuid);

impl SendStreamId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SendStreamId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SendStreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Format of a single send stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamProperties {
    pub sample_rate_hz: u32,
    pub num_channels: usize,
}

/// Session-wide send parameters derived from every active send stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendingStreamsUpdate {
    pub streams: Vec<SendStreamId>,
    pub max_sample_rate_hz: u32,
    pub max_num_channels: usize,
}

impl SendingStreamsUpdate {
    /// Aggregate every stream, in iteration order, into one update.
    ///
    /// Rates and channel counts never drop below
    /// [`MIN_SENDING_SAMPLE_RATE_HZ`] and [`MIN_SENDING_CHANNELS`].
    pub fn from_streams<'a>(
        streams: impl IntoIterator<Item = (&'a SendStreamId, &'a StreamProperties)>,
    ) -> Self {
        streams
            .into_iter()
            .fold(Self::default(), |mut update, (id, properties)| {
                update.streams.push(*id);
                update.max_sample_rate_hz = update.max_sample_rate_hz.max(properties.sample_rate_hz);
                update.max_num_channels = update.max_num_channels.max(properties.num_channels);
                update
            })
    }
}

impl Default for SendingStreamsUpdate {
    fn default() -> Self {
        Self {
            streams: Vec::new(),
            max_sample_rate_hz: MIN_SENDING_SAMPLE_RATE_HZ,
            max_num_channels: MIN_SENDING_CHANNELS,
        }
    }
}

/// Input level snapshot published by the audio transport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioLevelSnapshot {
    /// Full-range level, 0..=32767.
    pub level_full_range: u16,
    /// Quantized level, 0..=9.
    pub level: u8,
    pub total_energy: f64,
    pub total_duration: f64,
}

/// Microphone statistics exposed by [`AudioState`](crate::session::audio_state::AudioState).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioInputStats {
    pub audio_level: u16,
    pub quantized_audio_level: u8,
    pub total_energy: f64,
    pub total_duration: f64,
}

/// Outcome of dropping one reference to a shared object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCountReleaseStatus {
    DroppedLastRef,
    OtherRefsRemained,
}
