use dns_blocker_application::ports::{BlockDecisionPort, MetricsSink};
use dns_blocker_application::use_cases::CheckDomainUseCase;
use dns_blocker_domain::Config;
use dns_blocker_infrastructure::dns::{
    prepare_blocklist_from_config, BlocklistResolver, PreparedBlocklist, SourceFetcher,
};
use dns_blocker_infrastructure::metrics::InMemoryMetrics;
use std::sync::Arc;
use tracing::info;

pub struct BlockerServices {
    pub engine: Arc<dyn BlockDecisionPort>,
    pub resolver: Arc<BlocklistResolver>,
    pub check_domain: Arc<CheckDomainUseCase>,
    pub metrics: InMemoryMetrics,
    prepared: PreparedBlocklist,
}

impl BlockerServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let metrics = InMemoryMetrics::new();
        let sink: Arc<dyn MetricsSink> = Arc::new(metrics.clone());
        let fetcher = Arc::new(SourceFetcher::new()?);

        let prepared =
            prepare_blocklist_from_config(&config.blocklist, fetcher, Arc::clone(&sink)).await?;

        info!(
            format = %prepared.engine.format(),
            domains = prepared.engine.blocked_domain_count(),
            "Blocklist ready"
        );

        Ok(Self {
            engine: Arc::clone(&prepared.engine),
            resolver: Arc::clone(&prepared.resolver),
            check_domain: Arc::new(CheckDomainUseCase::new(
                Arc::clone(&prepared.engine),
                sink,
            )),
            metrics,
            prepared,
        })
    }

    pub fn shutdown(self) -> anyhow::Result<()> {
        self.prepared.shutdown()?;
        Ok(())
    }
}
