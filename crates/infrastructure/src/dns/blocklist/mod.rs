pub mod fetcher;
pub mod resolver;

pub use fetcher::{SourceFetcher, FETCH_TIMEOUT, USER_AGENT};
pub use resolver::{BlocklistResolver, Snapshot, SnapshotReceiver};
