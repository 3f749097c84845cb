use std::fs;
use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::models::error::PipelineError;
use crate::traits::metrics_sink::MetricsSink;

/// Histogram family an observation was recorded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    Boolean,
    Counts100,
    Enumeration { boundary: i32 },
}

/// A single recorded sample. Booleans are stored as 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub name: String,
    pub kind: ObservationKind,
    pub sample: i32,
}

/// Thread-safe [`MetricsSink`] that keeps every observation in memory.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    observations: Mutex<Vec<Observation>>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observations(&self) -> Vec<Observation> {
        self.observations.lock().clone()
    }

    /// Samples recorded under `name`, in recording order.
    pub fn samples(&self, name: &str) -> Vec<i32> {
        self.observations
            .lock()
            .iter()
            .filter(|o| o.name == name)
            .map(|o| o.sample)
            .collect()
    }

    /// Enumeration boundary used for `name`, if it was recorded as one.
    pub fn boundary(&self, name: &str) -> Option<i32> {
        self.observations
            .lock()
            .iter()
            .find_map(|o| match o.kind {
                ObservationKind::Enumeration { boundary } if o.name == name => Some(boundary),
                _ => None,
            })
    }

    pub fn len(&self) -> usize {
        self.observations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.lock().is_empty()
    }

    pub fn clear(&self) {
        self.observations.lock().clear();
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        let observations = self.observations.lock();
        serde_json::to_string_pretty(&*observations).map_err(|e| {
            PipelineError::StorageError(format!("failed to serialize metrics: {}", e))
        })
    }

    /// Write all observations as a JSON array to `path`.
    pub fn write_snapshot(&self, path: &Path) -> Result<(), PipelineError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| {
            PipelineError::StorageError(format!(
                "failed to write metrics snapshot {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn push(&self, name: &'static str, kind: ObservationKind, sample: i32) {
        self.observations.lock().push(Observation {
            name: name.to_string(),
            kind,
            sample,
        });
    }
}

impl MetricsSink for InMemoryMetrics {
    fn record_boolean(&self, name: &'static str, sample: bool) {
        self.push(name, ObservationKind::Boolean, i32::from(sample));
    }

    fn record_counts_100(&self, name: &'static str, sample: i32) {
        self.push(name, ObservationKind::Counts100, sample);
    }

    fn record_enumeration(&self, name: &'static str, sample: i32, boundary: i32) {
        self.push(name, ObservationKind::Enumeration { boundary }, sample);
    }
}
