//! Frame-rate constraint telemetry for zero-hertz screenshare sessions.
//!
//! Observation names are consumed by external dashboards and must not change.

use crate::models::frame::FrameRateConstraints;
use crate::traits::metrics_sink::MetricsSink;

pub const CONSTRAINTS_EXISTS: &str = "WebRTC.Screenshare.FrameRateConstraints.Exists";
pub const MIN_EXISTS: &str = "WebRTC.Screenshare.FrameRateConstraints.Min.Exists";
pub const MIN_VALUE: &str = "WebRTC.Screenshare.FrameRateConstraints.Min.Value";
pub const MAX_EXISTS: &str = "WebRTC.Screenshare.FrameRateConstraints.Max.Exists";
pub const MAX_VALUE: &str = "WebRTC.Screenshare.FrameRateConstraints.Max.Value";
pub const MIN_UNSET_MAX: &str = "WebRTC.Screenshare.FrameRateConstraints.MinUnset.Max";
pub const MIN_LESS_THAN_MAX_MIN: &str = "WebRTC.Screenshare.FrameRateConstraints.MinLessThanMax.Min";
pub const MIN_LESS_THAN_MAX_MAX: &str = "WebRTC.Screenshare.FrameRateConstraints.MinLessThanMax.Max";
pub const MIN_MAX_COMBINED: &str = "WebRTC.Screenshare.FrameRateConstraints.60MinPlusMaxMinusOne";

/// Bucket bound for [`MIN_MAX_COMBINED`]: min and max both range over 0..=60.
pub const MIN_MAX_COMBINED_BOUNDARY: i32 = 60 * 60 + 60 - 1;

/// Joint encoding of a (min, max) pair as a single sparse bucket.
pub fn combined_min_max_bucket(min_fps: f64, max_fps: f64) -> i32 {
    (min_fps * 60.0 + max_fps - 1.0) as i32
}

/// Report one snapshot of the source's constraints.
///
/// Absent constraints only report that fact. The joint min/max observations
/// are recorded only when both bounds are set and `min < max`.
pub fn report_frame_rate_constraints(
    constraints: Option<&FrameRateConstraints>,
    sink: &dyn MetricsSink,
) {
    sink.record_boolean(CONSTRAINTS_EXISTS, constraints.is_some());
    let Some(constraints) = constraints else {
        return;
    };

    sink.record_boolean(MIN_EXISTS, constraints.min_fps.is_some());
    if let Some(min_fps) = constraints.min_fps {
        sink.record_counts_100(MIN_VALUE, min_fps as i32);
    }
    sink.record_boolean(MAX_EXISTS, constraints.max_fps.is_some());
    if let Some(max_fps) = constraints.max_fps {
        sink.record_counts_100(MAX_VALUE, max_fps as i32);
    }

    match (constraints.min_fps, constraints.max_fps) {
        (None, Some(max_fps)) => {
            sink.record_counts_100(MIN_UNSET_MAX, max_fps as i32);
        }
        (Some(min_fps), Some(max_fps)) if min_fps < max_fps => {
            sink.record_counts_100(MIN_LESS_THAN_MAX_MIN, min_fps as i32);
            sink.record_counts_100(MIN_LESS_THAN_MAX_MAX, max_fps as i32);
            sink.record_enumeration(
                MIN_MAX_COMBINED,
                combined_min_max_bucket(min_fps, max_fps),
                MIN_MAX_COMBINED_BOUNDARY,
            );
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::metrics_store::InMemoryMetrics;

    fn report(min_fps: Option<f64>, max_fps: Option<f64>) -> InMemoryMetrics {
        let metrics = InMemoryMetrics::new();
        report_frame_rate_constraints(Some(&FrameRateConstraints::new(min_fps, max_fps)), &metrics);
        metrics
    }

    #[test]
    fn boundary_covers_sixty_fps() {
        assert_eq!(MIN_MAX_COMBINED_BOUNDARY, 3659);
        assert_eq!(combined_min_max_bucket(60.0, 60.0), 3659);
    }

    #[test]
    fn absent_constraints_only_report_existence() {
        let metrics = InMemoryMetrics::new();
        report_frame_rate_constraints(None, &metrics);
        assert_eq!(metrics.samples(CONSTRAINTS_EXISTS), vec![0]);
        assert_eq!(metrics.len(), 1);
    }

    #[test]
    fn empty_constraints() {
        let metrics = report(None, None);
        assert_eq!(metrics.samples(CONSTRAINTS_EXISTS), vec![1]);
        assert_eq!(metrics.samples(MIN_EXISTS), vec![0]);
        assert_eq!(metrics.samples(MAX_EXISTS), vec![0]);
        assert!(metrics.samples(MIN_VALUE).is_empty());
        assert!(metrics.samples(MAX_VALUE).is_empty());
        assert!(metrics.samples(MIN_UNSET_MAX).is_empty());
    }

    #[test]
    fn only_max() {
        let metrics = report(None, Some(25.0));
        assert_eq!(metrics.samples(MIN_EXISTS), vec![0]);
        assert_eq!(metrics.samples(MAX_EXISTS), vec![1]);
        assert_eq!(metrics.samples(MAX_VALUE), vec![25]);
        assert_eq!(metrics.samples(MIN_UNSET_MAX), vec![25]);
        assert!(metrics.samples(MIN_MAX_COMBINED).is_empty());
    }

    #[test]
    fn only_min() {
        let metrics = report(Some(5.0), None);
        assert_eq!(metrics.samples(MIN_VALUE), vec![5]);
        assert_eq!(metrics.samples(MAX_EXISTS), vec![0]);
        assert!(metrics.samples(MIN_UNSET_MAX).is_empty());
        assert!(metrics.samples(MIN_LESS_THAN_MAX_MIN).is_empty());
    }

    #[test]
    fn min_less_than_max() {
        let metrics = report(Some(10.0), Some(30.0));
        assert_eq!(metrics.samples(MIN_VALUE), vec![10]);
        assert_eq!(metrics.samples(MAX_VALUE), vec![30]);
        assert_eq!(metrics.samples(MIN_LESS_THAN_MAX_MIN), vec![10]);
        assert_eq!(metrics.samples(MIN_LESS_THAN_MAX_MAX), vec![30]);
        assert_eq!(metrics.samples(MIN_MAX_COMBINED), vec![629]);
        assert_eq!(metrics.boundary(MIN_MAX_COMBINED), Some(3659));
        assert!(metrics.samples(MIN_UNSET_MAX).is_empty());
    }

    #[test]
    fn inverted_constraints_skip_joint_observations() {
        let metrics = report(Some(30.0), Some(10.0));
        assert_eq!(metrics.samples(MIN_VALUE), vec![30]);
        assert_eq!(metrics.samples(MAX_VALUE), vec![10]);
        assert!(metrics.samples(MIN_LESS_THAN_MAX_MIN).is_empty());
        assert!(metrics.samples(MIN_LESS_THAN_MAX_MAX).is_empty());
        assert!(metrics.samples(MIN_MAX_COMBINED).is_empty());
    }

    #[test]
    fn equal_bounds_skip_joint_observations() {
        let metrics = report(Some(15.0), Some(15.0));
        assert!(metrics.samples(MIN_MAX_COMBINED).is_empty());
        assert_eq!(metrics.len(), 5);
    }
}
