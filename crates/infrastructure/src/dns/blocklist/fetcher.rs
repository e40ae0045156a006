use async_trait::async_trait;
use dns_blocker_application::ports::BlocklistFetcher;
use dns_blocker_domain::{BlocklistSource, DomainError, SourceKind};
use std::time::Duration;
use tracing::debug;

pub const USER_AGENT: &str = "DNS-Blocker/1.0";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Reads blocklists from local files or over HTTP(S).
pub struct SourceFetcher {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl SourceFetcher {
    pub fn new() -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| DomainError::BlocklistFetchError(e.to_string()))?;

        Ok(Self {
            http_client,
            timeout: FETCH_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn read_from_file(&self, path: &str) -> Result<String, DomainError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DomainError::IoError(format!("{}: {}", path, e)))?;

        debug!(path = %path, bytes = bytes.len(), "Read blocklist file");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn read_from_remote(&self, url: &str) -> Result<String, DomainError> {
        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::BlocklistFetchError(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::BlocklistFetchError(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::BlocklistFetchError(format!("{}: {}", url, e)))?;

        debug!(url = %url, bytes = body.len(), "Downloaded blocklist");
        Ok(body)
    }
}

#[async_trait]
impl BlocklistFetcher for SourceFetcher {
    async fn fetch(&self, source: &BlocklistSource) -> Result<String, DomainError> {
        match source.kind() {
            SourceKind::Remote => self.read_from_remote(source.uri()).await,
            SourceKind::File => self.read_from_file(source.uri()).await,
        }
    }
}
