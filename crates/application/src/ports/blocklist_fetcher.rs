use async_trait::async_trait;
use dns_blocker_domain::{BlocklistSource, DomainError};

/// Retrieves the raw text of a blocklist snapshot.
#[async_trait]
pub trait BlocklistFetcher: Send + Sync {
    async fn fetch(&self, source: &BlocklistSource) -> Result<String, DomainError>;
}
