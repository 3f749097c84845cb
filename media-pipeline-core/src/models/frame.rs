use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::time::Timestamp;

/// A captured video frame.
///
/// The payload is opaque to this crate and shared by reference, so cloning a
/// frame to hand it across threads never copies pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub id: u16,
    pub capture_time: Timestamp,
    payload: Arc<[u8]>,
}

impl VideoFrame {
    pub fn new(id: u16, capture_time: Timestamp, payload: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id,
            capture_time,
            payload: payload.into(),
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether two frames share the same payload allocation.
    pub fn shares_payload_with(&self, other: &VideoFrame) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

/// Frame rate limits requested by a video source.
///
/// Either bound may be absent. Values are not validated: `min_fps > max_fps`
/// is representable and is reported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameRateConstraints {
    pub min_fps: Option<f64>,
    pub max_fps: Option<f64>,
}

impl FrameRateConstraints {
    pub fn new(min_fps: Option<f64>, max_fps: Option<f64>) -> Self {
        Self { min_fps, max_fps }
    }
}
