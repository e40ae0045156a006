use super::filter_list::FilterListDecisionEngine;
use super::hosts::HostsDecisionEngine;
use crate::dns::blocklist::BlocklistResolver;
use dns_blocker_application::ports::{BlockDecisionPort, BlocklistFetcher, MetricsSink};
use dns_blocker_domain::{
    BlocklistConfig, BlocklistFormat, BlocklistSource, DomainError, UpdateMode,
};
use std::sync::Arc;
use tracing::{error, info};

pub type ShutdownHook = Box<dyn FnOnce() -> Result<(), DomainError> + Send>;

/// Everything needed to build one engine.
#[derive(Debug, Clone)]
pub struct BlocklistSettings {
    pub source: BlocklistSource,
    pub format: BlocklistFormat,
    pub update_mode: UpdateMode,
}

impl BlocklistSettings {
    /// Parses the raw location / interval / format triple.
    pub fn parse(uri: &str, refresh_interval: &str, format: &str) -> Result<Self, DomainError> {
        Ok(Self {
            source: BlocklistSource::parse(uri, refresh_interval)?,
            format: format.parse()?,
            update_mode: UpdateMode::default(),
        })
    }

    pub fn from_config(config: &BlocklistConfig) -> Result<Self, DomainError> {
        Ok(Self {
            source: config.source()?,
            format: config.format()?,
            update_mode: config.update_mode,
        })
    }

    pub fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }
}

pub struct PreparedBlocklist {
    pub engine: Arc<dyn BlockDecisionPort>,
    pub resolver: Arc<BlocklistResolver>,
    pub shutdown_hooks: Vec<ShutdownHook>,
}

impl PreparedBlocklist {
    /// Runs every shutdown hook, returning the first error after all ran.
    pub fn shutdown(self) -> Result<(), DomainError> {
        let mut first_error = None;
        for hook in self.shutdown_hooks {
            if let Err(e) = hook() {
                error!(error = %e, "Blocklist shutdown hook failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Constructs the engine variant for `format`, subscribed to `resolver`.
pub fn build_engine(
    format: BlocklistFormat,
    resolver: &BlocklistResolver,
    update_mode: UpdateMode,
    metrics: Arc<dyn MetricsSink>,
) -> Arc<dyn BlockDecisionPort> {
    match format {
        BlocklistFormat::Hosts => HostsDecisionEngine::subscribe_to(resolver, update_mode, metrics),
        BlocklistFormat::FilterList => {
            FilterListDecisionEngine::subscribe_to(resolver, update_mode, metrics)
        }
    }
}

/// Builds the resolver and engine, loads the blocklist once and starts the
/// refresh schedule.
///
/// The first fetch is awaited: an unreachable or unreadable source fails
/// here and no engine is returned.
pub async fn prepare_blocklist(
    settings: BlocklistSettings,
    fetcher: Arc<dyn BlocklistFetcher>,
    metrics: Arc<dyn MetricsSink>,
) -> Result<PreparedBlocklist, DomainError> {
    info!(
        uri = %settings.source,
        format = %settings.format,
        mode = %settings.update_mode,
        interval_secs = settings.source.refresh_interval().as_secs(),
        "Preparing blocklist"
    );

    let resolver = Arc::new(BlocklistResolver::new(settings.source, fetcher));
    let engine = build_engine(settings.format, &resolver, settings.update_mode, metrics);

    let snapshot = resolver.fetch().await.map_err(|e| {
        error!(uri = %resolver.source(), error = %e, "Initial blocklist fetch failed");
        e
    })?;
    engine.update_blocklist(&snapshot)?;

    resolver.start();

    let stop_resolver: ShutdownHook = {
        let resolver = Arc::clone(&resolver);
        Box::new(move || {
            resolver.stop();
            info!("Blocklist refresh schedule stopped");
            Ok(())
        })
    };

    Ok(PreparedBlocklist {
        engine,
        resolver,
        shutdown_hooks: vec![stop_resolver],
    })
}

pub async fn prepare_blocklist_from_config(
    config: &BlocklistConfig,
    fetcher: Arc<dyn BlocklistFetcher>,
    metrics: Arc<dyn MetricsSink>,
) -> Result<PreparedBlocklist, DomainError> {
    let settings = BlocklistSettings::from_config(config)?;
    prepare_blocklist(settings, fetcher, metrics).await
}
