//! DNS Blocker Domain Layer
pub mod blocklist_format;
pub mod blocklist_source;
pub mod config;
pub mod duration;
pub mod errors;
pub mod fqdn;
pub mod update_mode;

pub use blocklist_format::BlocklistFormat;
pub use blocklist_source::{BlocklistSource, SourceKind};
pub use config::{BlocklistConfig, CliOverrides, Config, ConfigError, LoggingConfig};
pub use duration::parse_duration;
pub use errors::DomainError;
pub use fqdn::fqdn;
pub use update_mode::UpdateMode;
