/// Gauge holding the block-set size, labelled by source location.
pub const BLOCKLIST_SIZE_GAUGE: &str = "blocklist_size";

/// Counter of decisions, labelled by domain and status (`blocked`/`allowed`).
pub const BLOCKER_REQUESTS_COUNTER: &str = "blocker_requests";

/// Receiving end for the numbers the blocker produces.
///
/// Registration and export belong to whoever implements this trait.
pub trait MetricsSink: Send + Sync {
    fn set_gauge(&self, name: &'static str, labels: &[&str], value: f64);
    fn increment_counter(&self, name: &'static str, labels: &[&str]);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn set_gauge(&self, _name: &'static str, _labels: &[&str], _value: f64) {}

    fn increment_counter(&self, _name: &'static str, _labels: &[&str]) {}
}
