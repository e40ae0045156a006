use crate::ports::{BlockDecisionPort, FilterDecision, MetricsSink, BLOCKER_REQUESTS_COUNTER};
use dns_blocker_domain::fqdn;
use std::sync::Arc;
use tracing::debug;

pub struct CheckDomainUseCase {
    engine: Arc<dyn BlockDecisionPort>,
    metrics: Arc<dyn MetricsSink>,
}

impl CheckDomainUseCase {
    pub fn new(engine: Arc<dyn BlockDecisionPort>, metrics: Arc<dyn MetricsSink>) -> Self {
        Self { engine, metrics }
    }

    pub fn execute(&self, domain: &str) -> FilterDecision {
        let decision = if self.engine.is_domain_blocked(domain) {
            FilterDecision::Block
        } else {
            FilterDecision::Allow
        };

        let canonical = fqdn(domain);
        self.metrics
            .increment_counter(BLOCKER_REQUESTS_COUNTER, &[&canonical, decision.to_str()]);
        debug!(domain = %canonical, decision = %decision, "Blocklist decision");

        decision
    }
}
