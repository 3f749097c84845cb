/// Destination for named histogram observations.
///
/// Observation names are a compatibility contract with whatever consumes the
/// sink; see [`crate::processing::constraint_metrics`] for the ones this crate
/// emits.
pub trait MetricsSink: Send + Sync {
    fn record_boolean(&self, name: &'static str, sample: bool);

    /// Count in the 1..=100 range (values outside are recorded as given).
    fn record_counts_100(&self, name: &'static str, sample: i32);

    /// Sparse enumeration with values in `0..boundary`.
    fn record_enumeration(&self, name: &'static str, sample: i32, boundary: i32);
}
