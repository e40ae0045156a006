use dns_blocker_application::ports::BlocklistFetcher;
use dns_blocker_domain::{BlocklistSource, DomainError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub type Snapshot = Arc<str>;

type Slot = Option<(u64, Snapshot)>;

/// Receiving end of one subscription.
///
/// Holds at most one pending snapshot; a newer one replaces it, so a slow
/// consumer always resumes on the latest contents.
pub struct SnapshotReceiver {
    rx: watch::Receiver<Slot>,
    consumed: Arc<AtomicU64>,
}

impl SnapshotReceiver {
    /// Waits for the newest snapshot not taken yet. `None` once the resolver
    /// is gone and nothing is pending.
    pub async fn recv(&mut self) -> Option<Snapshot> {
        loop {
            self.rx.changed().await.ok()?;
            let slot = self.rx.borrow_and_update().clone();
            if let Some((generation, snapshot)) = slot {
                self.consumed.store(generation, Ordering::Release);
                return Some(snapshot);
            }
        }
    }
}

struct Subscription {
    tx: watch::Sender<Slot>,
    consumed: Arc<AtomicU64>,
}

impl Subscription {
    /// Whether the slot still holds a snapshot the receiver never took.
    fn has_pending(&self) -> bool {
        let pending = self.tx.borrow().as_ref().map_or(0, |(generation, _)| *generation);
        pending > self.consumed.load(Ordering::Acquire)
    }
}

/// Fetches a blocklist on a schedule or on demand and fans the raw text out
/// to every subscriber. Knows nothing about blocklist formats.
///
/// One background task runs the schedule:
///   - waits on cancellation, an immediate-update request, or the periodic tick
///   - runs one fetch-and-publish cycle at a time
///   - shares a fetch lock with direct [`Self::fetch`] callers, so fetches
///     never overlap
///   - the first tick fires one full interval after `start()`
pub struct BlocklistResolver {
    source: BlocklistSource,
    fetcher: Arc<dyn BlocklistFetcher>,
    subscribers: RwLock<Vec<Subscription>>,
    generation: AtomicU64,
    fetch_lock: tokio::sync::Mutex<()>,
    update_tx: mpsc::Sender<()>,
    update_rx: Mutex<Option<mpsc::Receiver<()>>>,
    shutdown: CancellationToken,
    started: AtomicBool,
}

impl BlocklistResolver {
    pub fn new(source: BlocklistSource, fetcher: Arc<dyn BlocklistFetcher>) -> Self {
        // One pending request at most; extra requests collapse into it.
        let (update_tx, update_rx) = mpsc::channel(1);

        Self {
            source,
            fetcher,
            subscribers: RwLock::new(Vec::new()),
            generation: AtomicU64::new(0),
            fetch_lock: tokio::sync::Mutex::new(()),
            update_tx,
            update_rx: Mutex::new(Some(update_rx)),
            shutdown: CancellationToken::new(),
            started: AtomicBool::new(false),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn source(&self) -> &BlocklistSource {
        &self.source
    }

    /// Spawns the scheduling loop. Calling it again is a no-op.
    pub fn start(self: &Arc<Self>) {
        if self.started.swap(true, Ordering::AcqRel) {
            debug!(uri = %self.source, "Blocklist resolver already started");
            return;
        }

        let update_rx = self
            .update_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(update_rx) = update_rx else {
            return;
        };

        let resolver = Arc::clone(self);
        tokio::spawn(async move { resolver.run(update_rx).await });
    }

    /// Cancels the scheduling loop and any fetch in flight. Idempotent.
    pub fn stop(&self) {
        if !self.shutdown.is_cancelled() {
            info!(uri = %self.source, "Stopping blocklist resolver");
        }
        self.shutdown.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::Acquire) && !self.shutdown.is_cancelled()
    }

    /// Asks the loop for an out-of-band fetch.
    ///
    /// Returns `false` when a request is already pending; the new one is
    /// dropped rather than queued.
    pub fn schedule_immediate_update(&self) -> bool {
        match self.update_tx.try_send(()) {
            Ok(()) => {
                debug!(uri = %self.source, "Immediate blocklist update scheduled");
                true
            }
            Err(TrySendError::Full(())) => {
                debug!(uri = %self.source, "Immediate blocklist update already pending");
                false
            }
            Err(TrySendError::Closed(())) => false,
        }
    }

    pub fn subscribe(&self) -> SnapshotReceiver {
        let (tx, rx) = watch::channel(None);
        let consumed = Arc::new(AtomicU64::new(0));

        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscription {
                tx,
                consumed: Arc::clone(&consumed),
            });

        SnapshotReceiver { rx, consumed }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Fetches one snapshot without publishing it.
    ///
    /// Waits for any fetch already running. Bounded by the resolver's
    /// cancellation on top of the fetcher's own timeout.
    pub async fn fetch(&self) -> Result<Snapshot, DomainError> {
        tokio::select! {
            _ = self.shutdown.cancelled() => {
                Err(DomainError::BlocklistFetchCancelled(self.source.uri().to_string()))
            }
            result = self.fetch_exclusive() => result,
        }
    }

    async fn fetch_exclusive(&self) -> Result<Snapshot, DomainError> {
        let _guard = self.fetch_lock.lock().await;
        info!(uri = %self.source, remote = self.source.is_remote(), "Fetching blocklist");
        self.fetcher.fetch(&self.source).await.map(Snapshot::from)
    }

    /// Fetches and publishes; returns how many subscribers took the snapshot.
    pub async fn refresh(&self) -> Result<usize, DomainError> {
        let snapshot = self.fetch().await?;
        Ok(self.publish(snapshot))
    }

    /// Hands `snapshot` to every subscriber without waiting.
    ///
    /// A snapshot still pending for a busy subscriber is replaced by this
    /// one; a closed subscriber is removed.
    pub fn publish(&self, snapshot: Snapshot) -> usize {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let mut delivered = 0;
        let mut closed = 0;

        {
            let subscribers = self
                .subscribers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            for subscription in subscribers.iter() {
                if subscription.tx.is_closed() {
                    closed += 1;
                    continue;
                }
                if subscription.has_pending() {
                    warn!(
                        uri = %self.source,
                        generation,
                        "Subscriber still busy; replacing its unread snapshot with this one"
                    );
                }
                subscription
                    .tx
                    .send_replace(Some((generation, Arc::clone(&snapshot))));
                delivered += 1;
            }
        }

        if closed > 0 {
            self.subscribers
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|subscription| !subscription.tx.is_closed());
            debug!(uri = %self.source, removed = closed, "Removed closed blocklist subscribers");
        }

        info!(
            uri = %self.source,
            length = snapshot.len(),
            delivered,
            "Published blocklist snapshot"
        );
        delivered
    }

    async fn run(self: Arc<Self>, mut update_rx: mpsc::Receiver<()>) {
        let period = self.source.refresh_interval();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            uri = %self.source,
            interval_secs = period.as_secs(),
            "Starting blocklist resolver"
        );

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    info!(uri = %self.source, "Blocklist resolver: shutting down");
                    break;
                }
                Some(()) = update_rx.recv() => {
                    debug!(uri = %self.source, "Blocklist resolver: immediate update");
                    self.run_cycle().await;
                }
                _ = ticker.tick() => {
                    debug!(uri = %self.source, "Blocklist resolver: scheduled update");
                    self.run_cycle().await;
                }
            }
        }
    }

    async fn run_cycle(&self) {
        match self.refresh().await {
            Ok(_) => {}
            Err(DomainError::BlocklistFetchCancelled(_)) => {
                debug!(uri = %self.source, "Blocklist fetch cancelled");
            }
            Err(e) => {
                error!(
                    uri = %self.source,
                    error = %e,
                    "Error reading blocklist; keeping previous contents"
                );
            }
        }
    }
}
