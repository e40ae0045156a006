use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Unknown blocklist format: {0}")]
    UnknownBlocklistFormat(String),

    #[error("Unknown update mode: {0}")]
    UnknownUpdateMode(String),

    #[error("Invalid blocklist source: {0}")]
    InvalidBlocklistSource(String),

    #[error("Blocklist fetch error: {0}")]
    BlocklistFetchError(String),

    #[error("Blocklist fetch cancelled for {0}")]
    BlocklistFetchCancelled(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
