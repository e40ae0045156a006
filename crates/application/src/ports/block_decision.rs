use chrono::{DateTime, Utc};
use dns_blocker_domain::{BlocklistFormat, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Block,
    Allow,
}

impl FilterDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, FilterDecision::Block)
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            FilterDecision::Block => "blocked",
            FilterDecision::Allow => "allowed",
        }
    }
}

impl std::fmt::Display for FilterDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Outcome of applying one snapshot to a block-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Entries parsed out of the snapshot
    pub accepted: usize,
    /// Lines dropped with a warning
    pub skipped: usize,
    /// Block-set size before the update
    pub before: usize,
    /// Block-set size after the update
    pub after: usize,
    pub previous_update: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Contract between a decision engine and the request-filtering layer.
pub trait BlockDecisionPort: Send + Sync {
    fn format(&self) -> BlocklistFormat;

    /// Pure query; the name is canonicalized before lookup.
    fn is_domain_blocked(&self, domain: &str) -> bool;

    /// Parses `contents` and applies it to the block-set.
    ///
    /// Malformed lines are skipped with a warning and never fail the update.
    fn update_blocklist(&self, contents: &str) -> Result<UpdateSummary, DomainError>;

    fn blocked_domain_count(&self) -> usize;

    fn last_updated(&self) -> Option<DateTime<Utc>>;
}
