use async_trait::async_trait;
use dns_blocker_application::ports::BlocklistFetcher;
use dns_blocker_domain::{BlocklistSource, DomainError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// Fetcher returning canned contents, with switchable failure and latency.
pub struct MockFetcher {
    contents: RwLock<String>,
    should_fail: AtomicBool,
    delay: Duration,
    calls: AtomicU64,
    in_flight: AtomicU64,
    max_in_flight: AtomicU64,
}

impl MockFetcher {
    pub fn new(contents: &str) -> Self {
        Self {
            contents: RwLock::new(contents.to_string()),
            should_fail: AtomicBool::new(false),
            delay: Duration::ZERO,
            calls: AtomicU64::new(0),
            in_flight: AtomicU64::new(0),
            max_in_flight: AtomicU64::new(0),
        }
    }

    pub fn failing() -> Self {
        let fetcher = Self::new("");
        fetcher.set_should_fail(true);
        fetcher
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_contents(&self, contents: &str) {
        *self.contents.write().unwrap() = contents.to_string();
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most fetches ever observed running at the same time.
    pub fn max_in_flight(&self) -> u64 {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlocklistFetcher for MockFetcher {
    async fn fetch(&self, source: &BlocklistSource) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::BlocklistFetchError(format!(
                "mock failure for {}",
                source.uri()
            )));
        }

        Ok(self.contents.read().unwrap().clone())
    }
}
