use super::block_set::{new_domain_set, BlockSet, DomainSet};
use crate::dns::blocklist::{BlocklistResolver, SnapshotReceiver};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use dns_blocker_application::ports::{
    BlockDecisionPort, MetricsSink, UpdateSummary, BLOCKLIST_SIZE_GAUGE,
};
use dns_blocker_domain::{fqdn, BlocklistFormat, DomainError, UpdateMode};
use std::marker::PhantomData;
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, PartialEq, Eq)]
pub enum ParsedLine {
    /// A domain to block, not yet canonicalized
    Entry(String),
    /// Blank line or comment
    Ignored,
    /// Line that does not follow the format; skipped with a warning
    Malformed,
}

/// Format-specific half of a decision engine: how a line is read and how a
/// canonical name is tested against the block-set.
pub trait BlocklistRules: Send + Sync + 'static {
    const FORMAT: BlocklistFormat;

    fn parse_line(line: &str) -> ParsedLine;

    fn is_blocked(block_set: &BlockSet, fqdn: &str) -> bool;
}

pub struct ParsedSnapshot {
    pub entries: DomainSet,
    pub accepted: usize,
    pub skipped: usize,
}

pub fn parse_snapshot<R: BlocklistRules>(contents: &str) -> ParsedSnapshot {
    let mut entries = new_domain_set(contents.len() / 32);
    let mut accepted = 0;
    let mut skipped = 0;

    for line in contents.lines() {
        match R::parse_line(line) {
            ParsedLine::Entry(domain) => {
                entries.insert(CompactString::from(fqdn(&domain)));
                accepted += 1;
            }
            ParsedLine::Ignored => {}
            ParsedLine::Malformed => {
                warn!(format = %R::FORMAT, line = %line, "Skipping malformed blocklist line");
                skipped += 1;
            }
        }
    }

    ParsedSnapshot {
        entries,
        accepted,
        skipped,
    }
}

/// Decision engine shared by both formats.
///
/// Owns its block-set exclusively; lookups take the read lock, updates are
/// parsed outside the lock and merged in one write section.
pub struct BlocklistEngine<R: BlocklistRules> {
    block_set: BlockSet,
    source_uri: Arc<str>,
    update_mode: UpdateMode,
    metrics: Arc<dyn MetricsSink>,
    _rules: PhantomData<fn() -> R>,
}

impl<R: BlocklistRules> BlocklistEngine<R> {
    /// Engine that is only fed through [`BlockDecisionPort::update_blocklist`].
    pub fn new(
        source_uri: impl Into<Arc<str>>,
        update_mode: UpdateMode,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            block_set: BlockSet::new(),
            source_uri: source_uri.into(),
            update_mode,
            metrics,
            _rules: PhantomData,
        }
    }

    /// Engine subscribed to `resolver`, applying published snapshots from a
    /// dedicated consumer task. A snapshot that arrives while another is
    /// being applied waits; a newer one replaces it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn subscribe_to(
        resolver: &BlocklistResolver,
        update_mode: UpdateMode,
        metrics: Arc<dyn MetricsSink>,
    ) -> Arc<Self> {
        let engine = Arc::new(Self::new(
            resolver.source().shared_uri(),
            update_mode,
            metrics,
        ));

        spawn_update_consumer(Arc::downgrade(&engine), resolver.subscribe());

        engine
    }

    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }
}

fn spawn_update_consumer<R: BlocklistRules>(
    engine: Weak<BlocklistEngine<R>>,
    mut rx: SnapshotReceiver,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(contents) = rx.recv().await {
            let Some(engine) = engine.upgrade() else {
                break;
            };
            info!(
                format = %R::FORMAT,
                length = contents.len(),
                "Received updated blocklist contents"
            );
            // Parsing and merging a large list is CPU-bound.
            match tokio::task::spawn_blocking(move || engine.update_blocklist(&contents)).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    warn!(format = %R::FORMAT, error = %e, "Failed to apply blocklist update");
                }
                Err(e) => {
                    warn!(format = %R::FORMAT, error = %e, "Blocklist update task panicked");
                }
            }
        }
        debug!(format = %R::FORMAT, "Blocklist subscription closed");
    })
}

impl<R: BlocklistRules> BlockDecisionPort for BlocklistEngine<R> {
    fn format(&self) -> BlocklistFormat {
        R::FORMAT
    }

    #[inline]
    fn is_domain_blocked(&self, domain: &str) -> bool {
        R::is_blocked(&self.block_set, &fqdn(domain))
    }

    fn update_blocklist(&self, contents: &str) -> Result<UpdateSummary, DomainError> {
        let parsed = parse_snapshot::<R>(contents);
        let applied = self.block_set.apply(parsed.entries, self.update_mode);

        info!(
            format = %R::FORMAT,
            source = %self.source_uri,
            mode = %self.update_mode,
            accepted = parsed.accepted,
            skipped = parsed.skipped,
            before = applied.before,
            after = applied.after,
            last_updated_before = ?applied.previous_update,
            last_updated = %applied.updated_at,
            "Updated blocklist"
        );
        self.metrics.set_gauge(
            BLOCKLIST_SIZE_GAUGE,
            &[&*self.source_uri],
            applied.after as f64,
        );

        Ok(UpdateSummary {
            accepted: parsed.accepted,
            skipped: parsed.skipped,
            before: applied.before,
            after: applied.after,
            previous_update: applied.previous_update,
            updated_at: applied.updated_at,
        })
    }

    fn blocked_domain_count(&self) -> usize {
        self.block_set.len()
    }

    fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.block_set.last_updated()
    }
}
