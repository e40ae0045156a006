use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to write config file {0}: {1}")]
    FileWrite(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    /// `[blocklist]` section names a source or format that cannot be used
    #[error("Invalid [blocklist] section: {0}")]
    Blocklist(#[from] DomainError),
}
