use crate::duration::parse_duration;
use crate::DomainError;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `http://` or `https://` location, fetched with a GET request.
    Remote,
    /// Anything else is read as a local file path.
    File,
}

/// Where a blocklist lives and how often it is fetched again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlocklistSource {
    uri: Arc<str>,
    refresh_interval: Duration,
}

impl BlocklistSource {
    pub fn new(uri: impl Into<Arc<str>>, refresh_interval: Duration) -> Result<Self, DomainError> {
        let uri: Arc<str> = uri.into();
        if uri.trim().is_empty() {
            return Err(DomainError::InvalidBlocklistSource(
                "blocklist location cannot be empty".to_string(),
            ));
        }
        if refresh_interval.is_zero() {
            return Err(DomainError::InvalidDuration(
                "refresh interval must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            uri,
            refresh_interval,
        })
    }

    /// Builds a source from a location and a duration string like `"24h"`.
    pub fn parse(uri: impl Into<Arc<str>>, refresh_interval: &str) -> Result<Self, DomainError> {
        let interval = parse_duration(refresh_interval)?;
        Self::new(uri, interval)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn shared_uri(&self) -> Arc<str> {
        Arc::clone(&self.uri)
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn kind(&self) -> SourceKind {
        let lower = self.uri.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceKind::Remote
        } else {
            SourceKind::File
        }
    }

    pub fn is_remote(&self) -> bool {
        self.kind() == SourceKind::Remote
    }
}

impl std::fmt::Display for BlocklistSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}
