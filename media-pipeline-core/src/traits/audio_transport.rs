use crate::models::audio_models::{AudioLevelSnapshot, SendStreamId};

/// The audio device/mixing stack driven by [`AudioState`].
///
/// Implementations are shared with the null poller thread and must be
/// thread-safe.
///
/// [`AudioState`]: crate::session::audio_state::AudioState
pub trait AudioTransport: Send + Sync {
    /// Replace the set of send streams and the format they are fed with.
    fn update_sending_streams(
        &self,
        streams: Vec<SendStreamId>,
        max_sample_rate_hz: u32,
        max_num_channels: usize,
    );

    fn set_playout_enabled(&self, enabled: bool);

    fn set_recording_enabled(&self, enabled: bool);

    /// Current microphone level snapshot.
    fn audio_level(&self) -> AudioLevelSnapshot;

    fn set_stereo_channel_swapping(&self, enabled: bool);

    /// Pull mixed playout audio into `out` (interleaved, `samples_per_channel
    /// * num_channels` long). Returns the number of samples per channel
    /// produced.
    fn need_more_play_data(
        &self,
        samples_per_channel: usize,
        num_channels: usize,
        sample_rate_hz: u32,
        out: &mut [i16],
    ) -> usize;
}
