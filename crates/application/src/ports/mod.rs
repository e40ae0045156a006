mod block_decision;
mod blocklist_fetcher;
mod metrics_sink;

pub use block_decision::{BlockDecisionPort, FilterDecision, UpdateSummary};
pub use blocklist_fetcher::BlocklistFetcher;
pub use metrics_sink::{MetricsSink, NoopMetrics, BLOCKER_REQUESTS_COUNTER, BLOCKLIST_SIZE_GAUGE};
