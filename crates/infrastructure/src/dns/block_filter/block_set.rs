use chrono::{DateTime, Utc};
use compact_str::CompactString;
use dns_blocker_domain::UpdateMode;
use rustc_hash::FxBuildHasher;
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type DomainSet = HashSet<CompactString, FxBuildHasher>;

pub fn new_domain_set(capacity: usize) -> DomainSet {
    HashSet::with_capacity_and_hasher(capacity, FxBuildHasher)
}

struct BlockSetState {
    domains: DomainSet,
    last_updated: Option<DateTime<Utc>>,
}

/// Sizes and timestamps observed while applying one update.
#[derive(Debug, Clone, Copy)]
pub struct AppliedUpdate {
    pub before: usize,
    pub after: usize,
    pub previous_update: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Canonical FQDNs currently blocked by one engine.
///
/// Readers never observe a half-applied update: every snapshot is merged
/// inside a single write section.
pub struct BlockSet {
    state: RwLock<BlockSetState>,
}

impl BlockSet {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BlockSetState {
                domains: new_domain_set(0),
                last_updated: None,
            }),
        }
    }

    #[inline]
    pub fn contains(&self, fqdn: &str) -> bool {
        self.read().domains.contains(fqdn)
    }

    /// True if any candidate is present, checked in iteration order under
    /// one read guard.
    #[inline]
    pub fn contains_any<'a>(&self, mut candidates: impl Iterator<Item = &'a str>) -> bool {
        let state = self.read();
        candidates.any(|candidate| state.domains.contains(candidate))
    }

    pub fn apply(&self, entries: DomainSet, mode: UpdateMode) -> AppliedUpdate {
        let mut state = self.write();
        let before = state.domains.len();

        match mode {
            UpdateMode::Cumulative => state.domains.extend(entries),
            UpdateMode::Replace => state.domains = entries,
        }

        let previous_update = state.last_updated;
        let updated_at = Utc::now();
        state.last_updated = Some(updated_at);

        AppliedUpdate {
            before,
            after: state.domains.len(),
            previous_update,
            updated_at,
        }
    }

    pub fn len(&self) -> usize {
        self.read().domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.read().last_updated
    }

    // The set is only replaced or extended wholesale, so a poisoned lock
    // still guards a consistent value.
    fn read(&self) -> RwLockReadGuard<'_, BlockSetState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BlockSetState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for BlockSet {
    fn default() -> Self {
        Self::new()
    }
}
