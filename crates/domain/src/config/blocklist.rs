use crate::{BlocklistFormat, BlocklistSource, DomainError, UpdateMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlocklistConfig {
    /// Local file path or `http(s)://` URL of the blocklist
    #[serde(default)]
    pub uri: String,

    /// How often the blocklist is fetched again, e.g. `"24h"` or `"30m"`
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,

    /// `"hosts"` or `"abp"`
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default)]
    pub update_mode: UpdateMode,
}

impl BlocklistConfig {
    pub fn source(&self) -> Result<BlocklistSource, DomainError> {
        BlocklistSource::parse(self.uri.as_str(), &self.refresh_interval)
    }

    pub fn format(&self) -> Result<BlocklistFormat, DomainError> {
        self.format.parse()
    }
}

impl Default for BlocklistConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            refresh_interval: default_refresh_interval(),
            format: default_format(),
            update_mode: UpdateMode::default(),
        }
    }
}

fn default_refresh_interval() -> String {
    "24h".to_string()
}

fn default_format() -> String {
    BlocklistFormat::Hosts.to_str().to_string()
}
