use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::PipelineError;
use crate::traits::field_trials::FieldTrialsView;

/// Field trial gating zero-hertz screenshare support.
pub const ZERO_HERTZ_SCREENSHARE_TRIAL: &str = "WebRTC-ZeroHertzScreenshare";

/// Configuration for a [`FrameCadenceAdapter`](crate::session::frame_cadence::FrameCadenceAdapter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    /// Whether screenshare frames may be delivered at rates down to 0 Hz.
    pub zero_hertz_screenshare_enabled: bool,
}

impl CadenceConfig {
    pub fn from_field_trials(trials: &dyn FieldTrialsView) -> Self {
        Self {
            zero_hertz_screenshare_enabled: trials.is_enabled(ZERO_HERTZ_SCREENSHARE_TRIAL),
        }
    }
}

const MIN_POLL_INTERVAL_MS: u64 = 1;

/// Configuration for [`AudioState`](crate::session::audio_state::AudioState).
///
/// The null poller settings describe how much audio is pulled from the
/// transport, and how often, while playout is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioStateConfig {
    /// Interval between pulls, in milliseconds (default: 10).
    pub poll_interval_ms: u64,

    /// Sample rate requested on each pull (default: 48000).
    pub poll_sample_rate_hz: u32,

    /// Channels requested on each pull (default: 1).
    pub poll_channels: usize,
}

impl AudioStateConfig {
    /// Interval between pulls, never shorter than one millisecond.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    /// Samples per channel covering one poll interval.
    pub fn poll_samples_per_channel(&self) -> usize {
        let interval_ms = self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
        (self.poll_sample_rate_hz as u64 * interval_ms / 1000) as usize
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval_ms == 0 {
            return Err("poll interval must be positive".into());
        }
        if self.poll_sample_rate_hz < 8000 {
            return Err(format!(
                "unsupported poll sample rate: {}",
                self.poll_sample_rate_hz
            ));
        }
        if ![1, 2].contains(&self.poll_channels) {
            return Err(format!("unsupported poll channel count: {}", self.poll_channels));
        }
        Ok(())
    }
}

impl Default for AudioStateConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            poll_sample_rate_hz: 48000,
            poll_channels: 1,
        }
    }
}

/// Top-level configuration, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub cadence: CadenceConfig,
    pub audio: AudioStateConfig,
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig = serde_json::from_str(json).map_err(|e| {
            PipelineError::ConfigurationFailed(format!("failed to parse config: {}", e))
        })?;
        config.validate().map_err(PipelineError::ConfigurationFailed)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.audio.validate()
    }
}
