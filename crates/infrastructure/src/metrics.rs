use dashmap::DashMap;
use dns_blocker_application::ports::MetricsSink;
use std::sync::Arc;

type MetricKey = (&'static str, Box<[Box<str>]>);

fn metric_key(name: &'static str, labels: &[&str]) -> MetricKey {
    (name, labels.iter().map(|label| Box::from(*label)).collect())
}

/// Process-local metrics store, cheap to clone and share.
#[derive(Clone, Default)]
pub struct InMemoryMetrics {
    counters: Arc<DashMap<MetricKey, u64>>,

    gauges: Arc<DashMap<MetricKey, f64>>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, name: &'static str, labels: &[&str]) -> u64 {
        self.counters
            .get(&metric_key(name, labels))
            .map(|v| *v)
            .unwrap_or(0)
    }

    pub fn gauge(&self, name: &'static str, labels: &[&str]) -> Option<f64> {
        self.gauges.get(&metric_key(name, labels)).map(|v| *v)
    }

    /// Highest counters for `name`, largest first.
    pub fn top_counters(&self, name: &str, n: usize) -> Vec<(Vec<String>, u64)> {
        let mut counters: Vec<_> = self
            .counters
            .iter()
            .filter(|entry| entry.key().0 == name)
            .map(|entry| {
                let labels: Vec<String> =
                    entry.key().1.iter().map(|l| l.to_string()).collect();
                (labels, *entry.value())
            })
            .collect();

        counters.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counters.truncate(n);
        counters
    }

    pub fn reset(&self) {
        self.counters.clear();
        self.gauges.clear();
    }
}

impl MetricsSink for InMemoryMetrics {
    fn set_gauge(&self, name: &'static str, labels: &[&str], value: f64) {
        self.gauges.insert(metric_key(name, labels), value);
    }

    fn increment_counter(&self, name: &'static str, labels: &[&str]) {
        self.counters
            .entry(metric_key(name, labels))
            .and_modify(|c| *c += 1)
            .or_insert(1);
    }
}

impl std::fmt::Debug for InMemoryMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryMetrics")
            .field("counters", &self.counters.len())
            .field("gauges", &self.gauges.len())
            .finish()
    }
}
