#![allow(dead_code)]

use chrono::{DateTime, Utc};
use dns_blocker_application::ports::{BlockDecisionPort, MetricsSink, UpdateSummary};
use dns_blocker_domain::{fqdn, BlocklistFormat, DomainError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

pub struct MockDecisionEngine {
    blocked: RwLock<HashSet<String>>,
    lookups: Arc<AtomicU64>,
}

impl MockDecisionEngine {
    pub fn new() -> Self {
        Self {
            blocked: RwLock::new(HashSet::new()),
            lookups: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_blocked_domains(domains: Vec<&str>) -> Self {
        let engine = Self::new();
        {
            let mut blocked = engine.blocked.write().unwrap();
            for domain in domains {
                blocked.insert(fqdn(domain));
            }
        }
        engine
    }

    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl BlockDecisionPort for MockDecisionEngine {
    fn format(&self) -> BlocklistFormat {
        BlocklistFormat::Hosts
    }

    fn is_domain_blocked(&self, domain: &str) -> bool {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.blocked.read().unwrap().contains(&fqdn(domain))
    }

    fn update_blocklist(&self, contents: &str) -> Result<UpdateSummary, DomainError> {
        let mut blocked = self.blocked.write().unwrap();
        let before = blocked.len();
        let mut accepted = 0;
        for line in contents.lines().filter(|l| !l.trim().is_empty()) {
            blocked.insert(fqdn(line.trim()));
            accepted += 1;
        }
        Ok(UpdateSummary {
            accepted,
            skipped: 0,
            before,
            after: blocked.len(),
            previous_update: None,
            updated_at: Utc::now(),
        })
    }

    fn blocked_domain_count(&self) -> usize {
        self.blocked.read().unwrap().len()
    }

    fn last_updated(&self) -> Option<DateTime<Utc>> {
        None
    }
}

#[derive(Default)]
pub struct RecordingMetrics {
    counters: RwLock<HashMap<(String, Vec<String>), u64>>,
    gauges: RwLock<HashMap<(String, Vec<String>), f64>>,
}

impl RecordingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, name: &str, labels: &[&str]) -> u64 {
        let key = Self::key(name, labels);
        self.counters.read().unwrap().get(&key).copied().unwrap_or(0)
    }

    pub fn gauge(&self, name: &str, labels: &[&str]) -> Option<f64> {
        let key = Self::key(name, labels);
        self.gauges.read().unwrap().get(&key).copied()
    }

    pub fn total_increments(&self) -> u64 {
        self.counters.read().unwrap().values().sum()
    }

    fn key(name: &str, labels: &[&str]) -> (String, Vec<String>) {
        (
            name.to_string(),
            labels.iter().map(|l| l.to_string()).collect(),
        )
    }
}

impl MetricsSink for RecordingMetrics {
    fn set_gauge(&self, name: &'static str, labels: &[&str], value: f64) {
        self.gauges
            .write()
            .unwrap()
            .insert(Self::key(name, labels), value);
    }

    fn increment_counter(&self, name: &'static str, labels: &[&str]) {
        *self
            .counters
            .write()
            .unwrap()
            .entry(Self::key(name, labels))
            .or_insert(0) += 1;
    }
}
